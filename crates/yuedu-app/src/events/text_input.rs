use std::time::Duration;

use yuedu_core::types::{AppEvent, RequestId, SegmentResponse};
use yuedu_lang_chinese::MembershipCache;

use super::EventContext;

pub async fn handle_text_input(
    ctx: EventContext,
    id: RequestId,
    text: String,
) -> anyhow::Result<()> {
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

    let warm_cache = ctx.warm_cache.clone();
    let work = tokio::task::spawn_blocking(move || match warm_cache {
        Some(cache) => {
            let mut cache = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            processor.tokenize_with_cache(&text, &mut cache)
        }
        None => processor.tokenize_with_cache(&text, &mut MembershipCache::new()),
    });

    let tokens = match tokio::time::timeout(timeout, work).await {
        Ok(joined) => joined?,
        Err(_) => {
            tracing::warn!("Text request #{} exceeded {:?}", id, timeout);
            if !ctx.state.is_current(id) {
                tracing::debug!("Request #{} superseded, not reporting the timeout", id);
                return Ok(());
            }
            ctx.event_tx
                .send(AppEvent::DictionaryUnavailable {
                    id,
                    reason: format!("no answer within {} ms", timeout.as_millis()),
                })
                .await?;
            return Ok(());
        }
    };

    // A newer run arrived while this one was computing
    if !ctx.state.is_current(id) {
        tracing::debug!("Discarding stale result for request #{}", id);
        return Ok(());
    }

    tracing::debug!("Request #{} segmented into {} tokens", id, tokens.len());
    ctx.event_tx
        .send(AppEvent::ShowSegments(SegmentResponse { id, tokens }))
        .await?;

    Ok(())
}

