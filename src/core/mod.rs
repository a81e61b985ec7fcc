pub mod breakpoints;
pub mod config;
pub mod error;
pub mod series;
pub mod word;
