use std::str::FromStr;

use base64::Engine;
use serde::Deserialize;

use crate::ProduceError;

// ════════════════════════════════════════════════════════════════
//  Encoding
// ════════════════════════════════════════════════════════════════

/// How the textual key/value of a record maps to the bytes sent to the broker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// UTF-8 bytes of the text as-is.
    #[default]
    String,
    /// Text is a hex dump of the payload.
    Hex,
    /// Text is standard (padded) base64.
    Base64,
}

impl Encoding {
    pub fn decode(self, text: &str) -> Result<Vec<u8>, ProduceError> {
        match self {
            Encoding::String => Ok(text.as_bytes().to_vec()),
            Encoding::Hex => Ok(hex::decode(text)?),
            Encoding::Base64 => Ok(base64::engine::general_purpose::STANDARD.decode(text)?),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::String => f.write_str("string"),
            Encoding::Hex => f.write_str("hex"),
            Encoding::Base64 => f.write_str("base64"),
        }
    }
}

impl FromStr for Encoding {
    type Err = ProduceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Encoding::String),
            "hex" => Ok(Encoding::Hex),
            "base64" => Ok(Encoding::Base64),
            other => Err(ProduceError::config(format!(
                "unsupported encoding '{other}' (expected string, hex or base64)"
            ))),
        }
    }
}
