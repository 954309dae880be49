use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};

/// Configuration for token persistence
#[derive(Debug, DisplaySimple, Serialize, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// JSON file holding the token pair and cached user; memory only when unset
    pub token_file: Option<String>,
}
