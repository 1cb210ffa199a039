use kanal::AsyncSender;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use yuedu_core::types::{AppEvent, RequestId};

/// Prefix that turns an input line into a headword lookup
pub const LOOKUP_PREFIX: char = '?';

/// Turn one input line into a request; blank lines are ignored
pub fn parse_request(id: RequestId, line: &str) -> Option<AppEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match line.strip_prefix(LOOKUP_PREFIX) {
        Some(word) => Some(AppEvent::Lookup {
            id,
            word: word.trim().to_string(),
        }),
        None => Some(AppEvent::TextInput {
            id,
            text: line.to_string(),
        }),
    }
}

/// Reads requests line by line until EOF or cancellation
pub async fn input_io<R>(
    reader: R,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut next_id: RequestId = 0;

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = cancel.cancelled() => {
                tracing::info!("Input reader stopping");
                return Ok(());
            }
        };

        let Some(line) = line else {
            tracing::info!("Input closed");
            event_tx.send(AppEvent::Shutdown).await?;
            return Ok(());
        };

        next_id += 1;
        if let Some(event) = parse_request(next_id, &line) {
            event_tx.send(event).await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        assert!(parse_request(1, "   ").is_none());

        match parse_request(2, "?學生 ") {
            Some(AppEvent::Lookup { id, word }) => {
                assert_eq!(id, 2);
                assert_eq!(word, "學生");
            }
            other => panic!("unexpected {:?}", other),
        }

        match parse_request(3, "我们是学生。") {
            Some(AppEvent::TextInput { id, text }) => {
                assert_eq!(id, 3);
                assert_eq!(text, "我们是学生。");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
