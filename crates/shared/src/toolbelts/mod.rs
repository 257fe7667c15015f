pub mod calculator;
pub mod weather;

pub use calculator::Calculator;
pub use weather::Weather;
