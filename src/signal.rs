//! Ctrl+C as a cancellation signal for in-flight network calls

use log::{debug, warn};

/// Completes when the process receives Ctrl+C.
///
/// If the handler cannot be installed the future never completes, so the
/// guarded operation simply runs to its own timeout.
pub async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => debug!("Received interrupt"),
        Err(e) => {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
