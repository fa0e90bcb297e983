mod encoding;
mod error;
mod record;
mod sink;

pub use encoding::Encoding;
pub use error::{ErrorKind, ProduceError};
pub use record::{ProducerMessage, Record};
pub use sink::RecordSink;
