use std::env;

use serde::{Deserialize, Serialize};

fn default_format() -> String {
    "compact".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    /// Default report format when the caller gives none: "compact" or "rich"
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default)]
    pub debug: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            debug: false,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        let format = env::var("OUTPUT_FORMAT").unwrap_or_else(|_| default_format());

        Self {
            format,
            debug: false,
        }
    }
}
