use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, info_span, Instrument};
use crate::state::AppState;

const HOUSEKEEPING_INTERVAL: Duration = Duration::from_secs(60);

/// Drops rate-limiter entries for clients whose budget has fully refilled,
/// so the keyed store does not grow with every address ever seen.
pub async fn start_rate_limit_housekeeping(state: Arc<AppState>) {
    info!("Starting rate limiter housekeeping...");

    loop {
        sleep(HOUSEKEEPING_INTERVAL).await;

        let limiter = state.rate_limiter.clone();
        async move {
            let before = limiter.len();
            limiter.retain_recent();
            limiter.shrink_to_fit();
            debug!(before, after = limiter.len(), "Pruned idle rate limiter keys");
        }
            .instrument(info_span!("rate_limit_housekeeping"))
            .await;
    }
}
