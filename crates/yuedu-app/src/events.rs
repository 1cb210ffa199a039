use std::sync::{Arc, Mutex};

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use yuedu_core::types::AppEvent;
use yuedu_lang_chinese::{ChineseProcessor, MembershipCache};

use crate::state::AppState;

pub mod lookup;
pub mod text_input;

use lookup::handle_lookup;
use text_input::handle_text_input;

/// Everything a request handler needs, cheap to clone into a task
#[derive(Clone)]
pub struct EventContext {
    pub state: Arc<AppState>,
    /// `None` when the dictionary is disabled
    pub processor: Option<Arc<ChineseProcessor>>,
    /// Shared across requests only when the warm cache is enabled
    pub warm_cache: Option<Arc<Mutex<MembershipCache>>>,
    pub event_tx: AsyncSender<AppEvent>,
}

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    output_tx: AsyncSender<AppEvent>,
    processor: Option<Arc<ChineseProcessor>>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let warm_cache = {
        let config = state.config.read().await;
        config
            .segmentation
            .warm_cache
            .then(|| Arc::new(Mutex::new(MembershipCache::new())))
    };

    if processor.is_none() {
        tracing::warn!("Dictionary disabled, every request will report it unavailable");
    }

    let ctx = EventContext {
        state,
        processor,
        warm_cache,
        event_tx: output_tx,
    };

    let mut in_flight = JoinSet::new();

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            event = input_rx.recv() => event?,
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
        };

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );
        if !handle_event(&ctx, &mut in_flight, event).await? {
            break;
        }
        while in_flight.try_join_next().is_some() {}
    }

    // Finish answering what was asked before stopping the output side
    while in_flight.join_next().await.is_some() {}
    let _ = ctx.event_tx.send(AppEvent::Shutdown).await;
    Ok(())
}

/// Returns `false` once the loop should stop
async fn handle_event(
    ctx: &EventContext,
    in_flight: &mut JoinSet<()>,
    event: AppEvent,
) -> anyhow::Result<bool> {
    match event {
        AppEvent::TextInput { id, text } => {
            tracing::debug!("TextInput #{} received: {} chars", id, text.chars().count());
            ctx.state.begin_text_request(id);

            // Runs in the background so a newer run can supersede it
            let ctx = ctx.clone();
            in_flight.spawn(async move {
                if let Err(e) = handle_text_input(ctx, id, text).await {
                    tracing::error!("Text request #{} failed: {}", id, e);
                }
            });
        }
        AppEvent::Lookup { id, word } => {
            handle_lookup(ctx, id, word).await?;
        }
        AppEvent::Shutdown => {
            tracing::info!("Shutdown requested");
            return Ok(false);
        }
        AppEvent::ShowSegments(_)
        | AppEvent::ShowEntry(_)
        | AppEvent::DictionaryUnavailable { .. } => {
            // Output-only events, nothing to do in the backend
        }
    }

    Ok(true)
}
