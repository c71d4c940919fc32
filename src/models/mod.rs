pub mod bar;
pub mod breakout;
pub mod request;
