use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::output::OutputConfig;

pub mod dictionary;
pub mod output;

#[derive(Default, Serialize, Deserialize)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub output: OutputConfig,
}

impl Config {
    pub fn new() -> Self {
        Config {
            dictionary: DictionaryConfig::new(),
            output: OutputConfig::new(),
        }
    }
}
