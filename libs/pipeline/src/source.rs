use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::PipelineError;

// ═══════════════════════════════════════════════════════════════
//  Input
// ═══════════════════════════════════════════════════════════════

pub type LineInput = Box<dyn AsyncBufRead + Unpin + Send>;

/// Open the line source: a file, or stdin for `None` / `"-"`.
pub async fn open_input(path: Option<&str>) -> Result<LineInput, PipelineError> {
    match path {
        None | Some("-") => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
        Some(path) => {
            let file = tokio::fs::File::open(path).await?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Reader task — input → lines channel
// ═══════════════════════════════════════════════════════════════

/// Read `reader` line by line into `tx`.
///
/// Line terminators (`\n`, `\r\n`) are stripped; a last line without a
/// terminator is still sent. Invalid UTF-8 is replaced, not rejected.
/// The channel is closed (sender dropped) at EOF, on cancellation, or on a
/// read error, which is returned. Yields the number of lines sent.
pub fn spawn_line_reader<R>(
    mut reader: R,
    tx: mpsc::Sender<String>,
    token: CancellationToken,
) -> JoinHandle<Result<u64, PipelineError>>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::with_capacity(4096);
        let mut sent: u64 = 0;

        loop {
            buf.clear();
            let n = tokio::select! {
                read = reader.read_until(b'\n', &mut buf) => match read {
                    Ok(n) => n,
                    Err(e) => {
                        tracing::error!(error = %e, sent, "input read error");
                        return Err(PipelineError::Io(e));
                    }
                },
                _ = token.cancelled() => {
                    tracing::info!(sent, "input cancelled");
                    break;
                }
            };
            if n == 0 {
                tracing::debug!(sent, "input EOF");
                break;
            }

            let line = decode_line(&buf);
            tokio::select! {
                res = tx.send(line) => {
                    if res.is_err() {
                        tracing::debug!(sent, "line consumer closed, stopping");
                        break;
                    }
                }
                _ = token.cancelled() => {
                    tracing::info!(sent, "input cancelled");
                    break;
                }
            }
            sent += 1;
        }

        Ok(sent)
    })
}

fn decode_line(raw: &[u8]) -> String {
    let mut end = raw.len();
    if raw[..end].ends_with(b"\n") {
        end -= 1;
        if raw[..end].ends_with(b"\r") {
            end -= 1;
        }
    }
    match std::str::from_utf8(&raw[..end]) {
        Ok(s) => s.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "line is not valid UTF-8, replacing invalid bytes");
            String::from_utf8_lossy(&raw[..end]).into_owned()
        }
    }
}
