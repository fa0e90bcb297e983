pub mod config;
pub mod error;
pub mod line;
mod deserialize;
mod sink;
mod source;

pub use config::{HandoffConfig, Partitioner, ProduceConfig};
pub use deserialize::{deserialize_lines, record_from_line, spawn_deserializer};
pub use error::PipelineError;
pub use line::{Line, LineFields, classify_line};
pub use sink::{SinkSummary, spawn_sink_task};
pub use source::{LineInput, open_input, spawn_line_reader};
