pub mod output;
pub mod source;

pub use output::{create_writer, OutputFormat, OutputWriter};
pub use source::{JsonFileSource, MemorySource, ObservationSource};
