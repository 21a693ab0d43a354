use std::env;

#[derive(Clone)]
pub struct Config {
    pub storage_backend: String,
    pub storage_path: String,
    pub storage_slot: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            storage_backend: env::var("TRACKER_STORAGE_BACKEND")
                .unwrap_or_else(|_| "sqlite".to_string()),
            storage_path: env::var("TRACKER_STORAGE_PATH")
                .unwrap_or_else(|_| "./.db/transactions.db".to_string()),
            storage_slot: env::var("TRACKER_STORAGE_SLOT")
                .unwrap_or_else(|_| "tracked-transactions".to_string()),
        }
    }
}
