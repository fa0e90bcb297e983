/// Category of a produce error. Lets the caller decide whether to skip
/// a single record or stop the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid configuration — permanent, fail at startup.
    Config,
    /// I/O error on the input or output side.
    Io,
    /// Record could not be decoded/encoded — skip the record.
    Format,
    /// Error reported by the broker client.
    Broker,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Config => f.write_str("config"),
            ErrorKind::Io => f.write_str("io"),
            ErrorKind::Format => f.write_str("format"),
            ErrorKind::Broker => f.write_str("broker"),
        }
    }
}

/// Unified error type for the record handoff boundary.
///
/// Carries an `ErrorKind` and a human-readable message. `From` impls
/// assign the kind automatically so `?` works in sink implementations.
#[derive(Clone, PartialEq, Eq)]
pub struct ProduceError {
    kind: ErrorKind,
    message: String,
}

impl ProduceError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Config, message: msg.into() }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Io, message: msg.into() }
    }

    pub fn format_err(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Format, message: msg.into() }
    }

    pub fn broker(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Broker, message: msg.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Prepend context to the message, keeping the kind.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        Self { kind: self.kind, message: format!("{ctx}: {}", self.message) }
    }
}

impl std::fmt::Debug for ProduceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::fmt::Display for ProduceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ProduceError {}

impl From<std::io::Error> for ProduceError {
    fn from(e: std::io::Error) -> Self { Self::io(e.to_string()) }
}

impl From<serde_json::Error> for ProduceError {
    fn from(e: serde_json::Error) -> Self { Self::format_err(e.to_string()) }
}

impl From<base64::DecodeError> for ProduceError {
    fn from(e: base64::DecodeError) -> Self { Self::format_err(format!("base64: {e}")) }
}

impl From<hex::FromHexError> for ProduceError {
    fn from(e: hex::FromHexError) -> Self { Self::format_err(format!("hex: {e}")) }
}
