use std::time::Duration;

use yuedu_core::language::LanguageProcessor;
use yuedu_core::types::{AppEvent, LookupResponse, RequestId};
use yuedu_lang_chinese::processor::summarize;

use super::EventContext;

/// Exact headword lookup for the definition panel and cross-reference taps
pub async fn handle_lookup(ctx: &EventContext, id: RequestId, word: String) -> anyhow::Result<()> {
    let Some(processor) = ctx.processor.clone() else {
        ctx.event_tx
            .send(AppEvent::DictionaryUnavailable {
                id,
                reason: "dictionary disabled".to_string(),
            })
            .await?;
        return Ok(());
    };

    let timeout = {
        let config = ctx.state.config.read().await;
        Duration::from_millis(config.lookup_timeout_ms)
    };

    let query = word.clone();
    let work = tokio::task::spawn_blocking(move || processor.lookup(&query));
    let entry = match tokio::time::timeout(timeout, work).await {
        Ok(joined) => joined?,
        Err(_) => {
            tracing::warn!("Lookup #{} exceeded {:?}", id, timeout);
            ctx.event_tx
                .send(AppEvent::DictionaryUnavailable {
                    id,
                    reason: format!("no answer within {} ms", timeout.as_millis()),
                })
                .await?;
            return Ok(());
        }
    };

    tracing::debug!(
        "Lookup #{} '{}': {} readings",
        id,
        word,
        entry.as_ref().map_or(0, |e| e.readings.len())
    );

    let response = LookupResponse {
        id,
        summary: entry.as_ref().map(summarize),
        entry: entry.as_ref().map(serde_json::to_value).transpose()?,
        word,
    };

    ctx.event_tx.send(AppEvent::ShowEntry(response)).await?;
    Ok(())
}
