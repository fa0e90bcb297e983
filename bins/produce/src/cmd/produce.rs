use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use pipeline::{open_input, spawn_deserializer, spawn_line_reader, spawn_sink_task};

use crate::config::Effective;
use crate::error::CliError;
use crate::stdout_sink::StdoutSink;

/// input reader → line pipeline → sink, wired with bounded channels.
pub async fn run(eff: Effective) -> Result<(), CliError> {
    tracing::info!(
        topic = %eff.handoff.topic,
        brokers = ?eff.brokers,
        partitions = eff.partition_count,
        partitioner = %eff.produce.partitioner,
        literal = eff.produce.literal,
        input = eff.file.as_deref().unwrap_or("stdin"),
        "kt-produce starting"
    );
    tracing::warn!("no broker client configured, writing messages to stdout");

    let input = open_input(eff.file.as_deref()).await?;
    let token = CancellationToken::new();

    let (line_tx, line_rx) = mpsc::channel::<String>(eff.buffer);
    let (record_tx, record_rx) = mpsc::channel(eff.buffer);

    let sink = spawn_sink_task(Box::new(StdoutSink::new(eff.pretty)), eff.handoff.clone(), record_rx);
    let deserializer =
        spawn_deserializer(line_rx, record_tx, eff.partition_count, Arc::new(eff.produce.clone()));
    let reader = spawn_line_reader(input, line_tx, token.clone());

    let signal_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, closing input");
            signal_token.cancel();
        }
    });

    // Closing the input drains everything behind it in order.
    let read = reader.await?;
    deserializer.await?;
    let summary = sink.await?;

    let lines = read?;
    tracing::info!(lines, sent = summary.sent, failed = summary.failed, "done");

    if summary.failed > 0 {
        return Err(CliError::Incomplete {
            failed: summary.failed,
            total: summary.sent + summary.failed,
        });
    }
    Ok(())
}
