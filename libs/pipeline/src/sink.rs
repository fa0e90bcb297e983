use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use produce_api::{ProduceError, ProducerMessage, Record, RecordSink};

use crate::config::HandoffConfig;

/// Outcome of a sink task run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SinkSummary {
    pub sent: u64,
    pub failed: u64,
}

// ═══════════════════════════════════════════════════════════════
//  Sink task — records channel → sink.send()
// ═══════════════════════════════════════════════════════════════

/// Hand every record from `rx` to `sink`, one at a time and in order.
///
/// A record that cannot be converted or delivered is logged and counted as
/// failed; the task keeps going. At end of stream the sink is flushed.
pub fn spawn_sink_task(
    mut sink: Box<dyn RecordSink>,
    handoff: HandoffConfig,
    mut rx: mpsc::Receiver<Record>,
) -> JoinHandle<SinkSummary> {
    tokio::spawn(async move {
        let mut summary = SinkSummary::default();

        while let Some(record) = rx.recv().await {
            match deliver(&mut *sink, &handoff, &record).await {
                Ok(()) => summary.sent += 1,
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!(
                        topic = %handoff.topic,
                        partition = record.partition,
                        kind = %e.kind(),
                        error = %e,
                        "record not produced"
                    );
                }
            }
        }

        if let Err(e) = sink.flush().await {
            tracing::error!(topic = %handoff.topic, error = %e, "sink flush error");
        }
        tracing::info!(topic = %handoff.topic, sent = summary.sent, failed = summary.failed, "sink finished");
        summary
    })
}

async fn deliver(
    sink: &mut dyn RecordSink,
    handoff: &HandoffConfig,
    record: &Record,
) -> Result<(), ProduceError> {
    if record.partition < 0 {
        return Err(ProduceError::config(format!(
            "no valid partition ({}) for record",
            record.partition
        )));
    }
    let message = ProducerMessage::from_record(
        &handoff.topic,
        record,
        handoff.key_encoding,
        handoff.value_encoding,
    )?;
    sink.send(&message).await
}
