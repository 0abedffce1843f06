use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// Trailing-edge debounce: at most one timer is live, and scheduling a new
/// one cancels the previous.
///
/// Must be used from within a Tokio runtime.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<CancellationToken>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends `msg` on `tx` once `delay` passes without another `schedule`.
    pub fn schedule<M>(&mut self, delay: Duration, msg: M, tx: UnboundedSender<M>)
    where
        M: Send + 'static,
    {
        self.cancel();
        let token = CancellationToken::new();
        let cancelled = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(msg);
                }
            }
        });
        self.pending = Some(token);
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
