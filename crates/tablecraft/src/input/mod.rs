//! File import: delimited-text decoding into datasets.

mod parser;
mod source;

pub use parser::{Importer, ImporterConfig};
pub use source::SourceMetadata;
