//! Periodic user-count reporter.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

use crate::domain::repositories::UserRepository;

/// Logs the total number of users every `period` until `shutdown` fires.
///
/// The first count happens one full period after start. A failed count is
/// logged and the loop keeps going.
pub async fn run_user_counter<R: UserRepository>(
    repository: Arc<R>,
    period: Duration,
    shutdown: CancellationToken,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!("User counter stopped");
                return;
            }
            _ = ticker.tick() => match repository.count().await {
                Ok(count) => tracing::info!(count, "User count"),
                Err(e) => tracing::warn!(error = %e, "Failed to count users"),
            },
        }
    }
}
