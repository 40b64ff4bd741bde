pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod excerpt;
pub mod scanner;
pub mod scraper;
pub mod text;

use std::sync::Arc;
use config::Config;
use scanner::Scanner;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scanner: Arc<Scanner>,
}

impl AppState {
    pub fn new(config: Config) -> error::Result<Self> {
        let scanner = Scanner::new(&config)?;
        Ok(AppState {
            config: Arc::new(config),
            scanner: Arc::new(scanner),
        })
    }
}
