use std::path::PathBuf;

/// Default location of the tips document, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/copilot_tips.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
}

impl Config {
    /// Optional:
    /// - `TIPS_DATA_PATH` (default: "data/copilot_tips.json")
    ///
    /// The path is not checked here. An absent document is handled at load
    /// time by starting with an empty catalog.
    pub fn from_env() -> Self {
        let data_path = std::env::var("TIPS_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH));
        Self { data_path }
    }
}
