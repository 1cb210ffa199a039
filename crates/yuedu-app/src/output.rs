use kanal::AsyncReceiver;
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use yuedu_core::types::{AppEvent, LookupResponse, RequestId, SegmentResponse};

/// One JSON line written back to the reading surface
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputMessage {
    Segments(SegmentResponse),
    Entry(LookupResponse),
    Unavailable { id: RequestId, reason: String },
}

impl OutputMessage {
    pub fn from_event(event: AppEvent) -> Option<Self> {
        match event {
            AppEvent::ShowSegments(response) => Some(Self::Segments(response)),
            AppEvent::ShowEntry(response) => Some(Self::Entry(response)),
            AppEvent::DictionaryUnavailable { id, reason } => {
                Some(Self::Unavailable { id, reason })
            }
            _ => None,
        }
    }
}

/// Writes results as JSON lines until the event loop shuts down
pub async fn output_loop<W>(output_rx: AsyncReceiver<AppEvent>, mut writer: W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        let event = output_rx.recv().await?;
        if matches!(event, AppEvent::Shutdown) {
            break;
        }

        if let Some(message) = OutputMessage::from_event(event) {
            let mut line = serde_json::to_vec(&message)?;
            line.push(b'\n');
            writer.write_all(&line).await?;
            writer.flush().await?;
        }
    }

    tracing::info!("Output loop stopping");
    Ok(())
}
