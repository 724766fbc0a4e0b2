pub mod cache;
pub mod fallback;
pub mod processor;
pub mod store;

pub use cache::FallbackCache;
pub use fallback::{FlatDictionary, FlatDictionaryLoader};
pub use processor::{PaliProcessor, SourceSelection};
pub use store::DpdStore;
