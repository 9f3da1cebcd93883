//! Query pipeline module
//!
//! This module turns a raw free-text query into ranked results:
//! - Spelling correction against the indexed vocabulary
//! - Query assembly and execution against the document index

mod corrector;
mod pipeline;

pub use corrector::{DictionaryCorrector, SpellCorrector};
pub use pipeline::QueryPipeline;
