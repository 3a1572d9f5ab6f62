//! One-shot resolution of today's duty shortly after boot.
//!
//! There is no recurring scheduler: the day is otherwise resolved lazily by
//! `GET /current-assignee`. Running once at startup makes sure a freshly
//! started instance has today's assignment even before anyone asks.

use std::sync::Arc;
use std::time::Duration;

use dishduty_core::action_log::{self, action_types};
use dishduty_core::clock::Clock;
use dishduty_core::resolver;
use dishduty_core::store::DutyStore;
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// Wait `delay`, then resolve today once.
///
/// Returns early without resolving if `cancel` fires during the delay.
/// Failures are logged, never propagated.
pub async fn run(
    store: Arc<dyn DutyStore>,
    clock: Arc<dyn Clock>,
    delay: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(delay_secs = delay.as_secs(), "Startup resolve scheduled");

    tokio::select! {
        _ = cancel.cancelled() => {
            tracing::info!("Startup resolve cancelled before running");
            return;
        }
        _ = tokio::time::sleep(delay) => {}
    }

    let today = clock.today();
    match resolver::resolve_day(store.as_ref(), today).await {
        Ok(resolution) => {
            tracing::info!(
                date = %today,
                worker = %resolution.worker.name,
                source = ?resolution.source,
                "Startup resolve complete"
            );
        }
        Err(e) => {
            tracing::error!(date = %today, error = %e, "Startup resolve failed");
            action_log::record(
                store.as_ref(),
                action_types::DAILY_ASSIGNMENT_ERROR,
                json!({ "date": today, "error": e.to_string(), "trigger": "startup" }),
            )
            .await;
        }
    }
}
