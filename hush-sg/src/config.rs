//! hush-sg specific configuration

use std::path::PathBuf;

/// Story generator configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for persisted assets
    pub assets_root: PathBuf,
    /// HTTP listen port
    pub port: u16,
    /// Remote story backend base URL, if one is configured
    pub backend_url: Option<String>,
    /// Explicit narration voice override
    pub voice_override: Option<String>,
}
