use std::future::Future;
use std::pin::Pin;

use base64::Engine;
use serde_json::{Value, json};
use tokio::io::{AsyncWriteExt, BufWriter, Stdout};

use produce_api::{ProduceError, ProducerMessage, RecordSink};

/// Dry-run broker client: writes every message as one JSON object to stdout.
pub struct StdoutSink {
    out: BufWriter<Stdout>,
    pretty: bool,
}

impl StdoutSink {
    pub fn new(pretty: bool) -> Self {
        Self { out: BufWriter::new(tokio::io::stdout()), pretty }
    }
}

impl RecordSink for StdoutSink {
    fn send(&mut self, message: &ProducerMessage)
        -> Pin<Box<dyn Future<Output = Result<(), ProduceError>> + Send + '_>>
    {
        let rendered = render(message, self.pretty);
        Box::pin(async move {
            let mut line = rendered?;
            line.push('\n');
            self.out.write_all(line.as_bytes()).await?;
            Ok(())
        })
    }

    fn flush(&mut self) -> Pin<Box<dyn Future<Output = Result<(), ProduceError>> + Send + '_>> {
        Box::pin(async move {
            self.out.flush().await?;
            Ok(())
        })
    }
}

fn render(message: &ProducerMessage, pretty: bool) -> Result<String, ProduceError> {
    let doc = json!({
        "topic": message.topic,
        "partition": message.partition,
        "key": bytes_to_json(message.key.as_deref()),
        "value": bytes_to_json(message.value.as_deref()),
    });
    let text = if pretty { serde_json::to_string_pretty(&doc)? } else { serde_json::to_string(&doc)? };
    Ok(text)
}

/// UTF-8 payloads print as strings, anything else as `{"base64": "..."}`.
fn bytes_to_json(bytes: Option<&[u8]>) -> Value {
    match bytes {
        None => Value::Null,
        Some(b) => match std::str::from_utf8(b) {
            Ok(s) => Value::String(s.to_string()),
            Err(_) => json!({ "base64": base64::engine::general_purpose::STANDARD.encode(b) }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(key: Option<&[u8]>, value: Option<&[u8]>) -> ProducerMessage {
        ProducerMessage {
            topic: "events".into(),
            key: key.map(<[u8]>::to_vec),
            value: value.map(<[u8]>::to_vec),
            partition: 2,
        }
    }

    #[test]
    fn renders_one_line() {
        let line = render(&message(Some(b"hans"), Some(b"123")), false).unwrap();
        let doc: Value = serde_json::from_str(&line).unwrap();
        assert!(!line.contains('\n'));
        assert_eq!(doc, json!({"topic": "events", "partition": 2, "key": "hans", "value": "123"}));
    }

    #[test]
    fn absent_key_is_null() {
        let doc: Value = serde_json::from_str(&render(&message(None, Some(b"v")), true).unwrap()).unwrap();
        assert_eq!(doc["key"], Value::Null);
    }

    #[test]
    fn binary_value_is_base64() {
        let doc: Value =
            serde_json::from_str(&render(&message(None, Some(&[0xff, 0x00])), false).unwrap()).unwrap();
        assert_eq!(doc["value"], json!({"base64": "/wA="}));
    }
}
