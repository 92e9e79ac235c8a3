pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod locale;
pub mod ports;
pub mod render;
pub mod storage;
pub mod terminal;
pub mod types;
pub mod utils;
