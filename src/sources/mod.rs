pub mod base;
pub mod csv_file;
pub mod memory;
pub mod yahoo;

pub use base::MarketDataSource;
pub use csv_file::CsvFileSource;
pub use memory::InMemorySource;
pub use yahoo::YahooSource;
