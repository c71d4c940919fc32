pub struct Config {
    pub buffer_days: i64,
    pub volume_window: usize,
    pub data_dir: String,
    pub output_dir: String,
    pub yahoo_base_url: String,
    pub user_agent: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            buffer_days: 30,
            volume_window: 20,
            data_dir: "data".to_string(),
            output_dir: ".".to_string(),
            yahoo_base_url: "https://query1.finance.yahoo.com".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
        }
    }

    // 起始日期之前额外抓取的自然日数，保证滚动均值有足够的历史
    pub fn with_buffer_days(mut self, days: i64) -> Self {
        self.buffer_days = days;
        self
    }

    pub fn with_volume_window(mut self, window: usize) -> Self {
        self.volume_window = window;
        self
    }

    pub fn with_data_dir(mut self, dir: &str) -> Self {
        self.data_dir = dir.to_string();
        self
    }

    pub fn with_output_dir(mut self, dir: &str) -> Self {
        self.output_dir = dir.to_string();
        self
    }

    pub fn with_yahoo_base_url(mut self, url: &str) -> Self {
        self.yahoo_base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, agent: &str) -> Self {
        self.user_agent = agent.to_string();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
