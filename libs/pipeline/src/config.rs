use std::str::FromStr;

use serde::Deserialize;

use produce_api::Encoding;

use crate::PipelineError;

// ═══════════════════════════════════════════════════════════════
//  Partitioner
// ═══════════════════════════════════════════════════════════════

/// Partition selection for records that carry no explicit partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Partitioner {
    /// Java `String.hashCode` of the key.
    #[default]
    #[serde(rename = "hashCode")]
    HashCode,
    /// Java `String.hashCode` of the value.
    #[serde(rename = "hashCodeByValue")]
    HashCodeByValue,
    /// Always the configured `partition`.
    #[serde(rename = "fixed")]
    Fixed,
}

impl Partitioner {
    /// Whether this mode needs the topic's partition count.
    pub fn is_hash_based(self) -> bool {
        matches!(self, Partitioner::HashCode | Partitioner::HashCodeByValue)
    }
}

impl std::fmt::Display for Partitioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Partitioner::HashCode => f.write_str("hashCode"),
            Partitioner::HashCodeByValue => f.write_str("hashCodeByValue"),
            Partitioner::Fixed => f.write_str("fixed"),
        }
    }
}

impl FromStr for Partitioner {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hashCode" => Ok(Partitioner::HashCode),
            "hashCodeByValue" => Ok(Partitioner::HashCodeByValue),
            "fixed" => Ok(Partitioner::Fixed),
            other => Err(format!(
                "unknown partitioner '{other}' (expected hashCode, hashCodeByValue or fixed)"
            )),
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  ProduceConfig
// ═══════════════════════════════════════════════════════════════

/// Read-only line → record policy. Resolved once before the pipeline
/// starts and shared by every stage that needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProduceConfig {
    /// Take every line verbatim as the value, skipping JSON parsing.
    #[serde(default)]
    pub literal: bool,
    #[serde(default)]
    pub partitioner: Partitioner,
    /// Fixed partition for literal mode and `Partitioner::Fixed`.
    #[serde(default)]
    pub partition: i32,
}

impl ProduceConfig {
    pub fn structured(partitioner: Partitioner) -> Self {
        Self { literal: false, partitioner, partition: 0 }
    }

    pub fn literal(partition: i32) -> Self {
        Self { literal: true, partitioner: Partitioner::Fixed, partition }
    }

    /// Whether records can ever be routed by hash under this config.
    pub fn uses_hash(&self) -> bool {
        !self.literal && self.partitioner.is_hash_based()
    }

    /// Reject settings that would route records to no valid partition.
    pub fn validate(&self, partition_count: i32) -> Result<(), PipelineError> {
        if self.uses_hash() {
            partitioner::try_hash_code_partition("", partition_count)?;
        }
        if (self.literal || self.partitioner == Partitioner::Fixed) && self.partition < 0 {
            return Err(PipelineError::Config {
                field: "partition",
                detail: format!("fixed partition must be >= 0, got {}", self.partition),
            });
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════
//  HandoffConfig
// ═══════════════════════════════════════════════════════════════

/// How records are turned into broker messages by the sink task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandoffConfig {
    pub topic: String,
    pub key_encoding: Encoding,
    pub value_encoding: Encoding,
}

impl HandoffConfig {
    pub fn new(topic: impl Into<String>) -> Self {
        Self { topic: topic.into(), ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partitioner::PartitionError;

    #[test]
    fn partitioner_names_round_trip_through_display() {
        for p in [Partitioner::HashCode, Partitioner::HashCodeByValue, Partitioner::Fixed] {
            assert_eq!(p.to_string().parse::<Partitioner>(), Ok(p));
        }
        assert!("random".parse::<Partitioner>().is_err());
    }

    #[test]
    fn hash_mode_needs_partitions() {
        let cfg = ProduceConfig::structured(Partitioner::HashCode);
        assert!(cfg.validate(3).is_ok());
        assert!(matches!(
            cfg.validate(0),
            Err(PipelineError::Partition(PartitionError::InvalidPartitionCount(0)))
        ));
    }

    #[test]
    fn literal_mode_ignores_partition_count() {
        assert!(ProduceConfig::literal(2).validate(0).is_ok());
        assert!(matches!(
            ProduceConfig::literal(-1).validate(4),
            Err(PipelineError::Config { field: "partition", .. })
        ));
    }

    #[test]
    fn deserializes_partitioner_names() {
        let cfg: ProduceConfig =
            serde_json::from_str(r#"{"partitioner":"hashCodeByValue","partition":1}"#).unwrap();
        assert_eq!(cfg.partitioner, Partitioner::HashCodeByValue);
        assert!(!cfg.literal);
        assert_eq!(cfg.partition, 1);
    }
}
