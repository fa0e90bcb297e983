use std::future::Future;
use std::pin::Pin;

use crate::{ProduceError, ProducerMessage};

/// Broker client boundary: receives produced messages one at a time.
///
/// Implementations own the network write, retries and acknowledgments.
/// `send` is awaited before the next message is handed over.
pub trait RecordSink: Send {
    /// Deliver one message.
    fn send(&mut self, message: &ProducerMessage)
        -> Pin<Box<dyn Future<Output = Result<(), ProduceError>> + Send + '_>>;

    /// Flush buffers at end of input.
    fn flush(&mut self) -> Pin<Box<dyn Future<Output = Result<(), ProduceError>> + Send + '_>>;
}
