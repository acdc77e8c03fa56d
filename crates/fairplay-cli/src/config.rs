use std::path::PathBuf;

/// Settings for an interactive session
#[derive(Debug, Clone)]
pub struct PlayConfig {
    /// Columns shown per page of the help table
    pub page_size: usize,
    /// Append every completed round as a JSON line
    pub transcript: Option<PathBuf>,
    pub color: bool,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            page_size: 7,
            transcript: None,
            color: true,
        }
    }
}
