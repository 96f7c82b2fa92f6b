pub mod reader;
pub mod types;

pub use reader::{CommandReader, RawReader, StructuredReader, read_payload, reader_for};
pub use types::{Extracted, ToolInvocationRequest};
