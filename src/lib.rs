pub mod analyzer;
pub mod config;
pub mod fetcher;
pub mod model;
pub mod parser;
pub mod session;
pub mod ui;
pub mod utils;
