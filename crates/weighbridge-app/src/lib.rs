//! Application service layer - capture session, queries, config, export

pub mod app;
pub mod config;
pub mod export;
pub mod logging;
pub mod repository;
