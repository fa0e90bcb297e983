use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use produce_api::Record;

use crate::config::{Partitioner, ProduceConfig};
use crate::line::{Line, classify_line};

// ═══════════════════════════════════════════════════════════════
//  Line → Record
// ═══════════════════════════════════════════════════════════════

/// Build the record for one input line.
///
/// Literal mode takes the line verbatim with the fixed partition.
/// Otherwise an explicit `partition` field wins over the configured
/// partitioner. Total over all lines and partition counts.
pub fn record_from_line(config: &ProduceConfig, line: String, partition_count: i32) -> Record {
    if config.literal {
        return Record::new(None, Some(line), config.partition);
    }

    let (key, value, explicit) = match classify_line(line) {
        Line::Structured(fields) => (fields.key, fields.value, fields.partition),
        Line::Raw(text) => (None, (!text.is_empty()).then_some(text), None),
    };

    let partition = match explicit {
        Some(p) => p,
        None => assign_partition(config, key.as_deref(), value.as_deref(), partition_count),
    };

    Record::new(key, value, partition)
}

/// Computed partition for a record without an explicit one.
///
/// An absent hash input maps to partition 0 regardless of the count;
/// an empty one goes through the empty-key rule and lands there too.
fn assign_partition(
    config: &ProduceConfig,
    key: Option<&str>,
    value: Option<&str>,
    partition_count: i32,
) -> i32 {
    let input = match config.partitioner {
        Partitioner::HashCode => key,
        Partitioner::HashCodeByValue => value,
        Partitioner::Fixed => return config.partition,
    };
    match input {
        Some(s) => partitioner::hash_code_partition(s, partition_count),
        None => 0,
    }
}

// ═══════════════════════════════════════════════════════════════
//  Deserializer stage
// ═══════════════════════════════════════════════════════════════

/// Turn every line from `input` into exactly one record on `output`.
///
/// Lines are handled strictly in arrival order. Each record is awaited on
/// `output` before the next line is taken, so a slow consumer throttles
/// the upstream reader. Returns when `input` is closed and drained
/// (dropping `output` closes it for the consumer) or when the consumer
/// has gone away.
pub async fn deserialize_lines(
    mut input: mpsc::Receiver<String>,
    output: mpsc::Sender<Record>,
    partition_count: i32,
    config: &ProduceConfig,
) {
    let mut produced: u64 = 0;

    while let Some(line) = input.recv().await {
        let record = record_from_line(config, line, partition_count);
        if output.send(record).await.is_err() {
            tracing::debug!(produced, "record consumer closed, stopping");
            return;
        }
        produced += 1;
    }

    tracing::debug!(produced, "input closed");
}

/// Run [`deserialize_lines`] as its own task.
pub fn spawn_deserializer(
    input: mpsc::Receiver<String>,
    output: mpsc::Sender<Record>,
    partition_count: i32,
    config: Arc<ProduceConfig>,
) -> JoinHandle<()> {
    tokio::spawn(async move { deserialize_lines(input, output, partition_count, &config).await })
}
