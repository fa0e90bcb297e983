use crate::{Encoding, ProduceError};

// ════════════════════════════════════════════════════════════════
//  Record
// ════════════════════════════════════════════════════════════════

/// One produced record: key, value and the partition it is routed to.
///
/// `partition` is always set once a record leaves the line pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: Option<String>,
    pub value: Option<String>,
    pub partition: i32,
}

impl Record {
    pub fn new(key: Option<String>, value: Option<String>, partition: i32) -> Self {
        Self { key, value, partition }
    }
}

// ════════════════════════════════════════════════════════════════
//  ProducerMessage
// ════════════════════════════════════════════════════════════════

/// Record as handed to a broker client: target topic plus decoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerMessage {
    pub topic: String,
    pub key: Option<Vec<u8>>,
    pub value: Option<Vec<u8>>,
    pub partition: i32,
}

impl ProducerMessage {
    /// Decode key and value of `record` with the given encodings.
    pub fn from_record(
        topic: &str,
        record: &Record,
        key_encoding: Encoding,
        value_encoding: Encoding,
    ) -> Result<Self, ProduceError> {
        let key = record
            .key
            .as_deref()
            .map(|k| key_encoding.decode(k))
            .transpose()
            .map_err(|e| e.with_context("key"))?;
        let value = record
            .value
            .as_deref()
            .map(|v| value_encoding.decode(v))
            .transpose()
            .map_err(|e| e.with_context("value"))?;

        Ok(Self {
            topic: topic.to_string(),
            key,
            value,
            partition: record.partition,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_stay_absent() {
        let record = Record::new(None, None, 0);
        let msg = ProducerMessage::from_record("events", &record, Encoding::Hex, Encoding::Base64).unwrap();
        assert_eq!(msg.key, None);
        assert_eq!(msg.value, None);
        assert_eq!(msg.topic, "events");
    }

    #[test]
    fn key_and_value_use_their_own_encoding() {
        let record = Record::new(Some("6b6579".into()), Some("dmFsdWU=".into()), 3);
        let msg = ProducerMessage::from_record("events", &record, Encoding::Hex, Encoding::Base64).unwrap();
        assert_eq!(msg.key.as_deref(), Some(&b"key"[..]));
        assert_eq!(msg.value.as_deref(), Some(&b"value"[..]));
        assert_eq!(msg.partition, 3);
    }

    #[test]
    fn decode_failure_names_the_field() {
        let record = Record::new(Some("hans".into()), Some("zz".into()), 0);
        let err = ProducerMessage::from_record("events", &record, Encoding::String, Encoding::Hex).unwrap_err();
        assert!(err.message().starts_with("value: hex:"), "{err}");
    }
}
