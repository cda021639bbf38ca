//! Single-flight renewal coordination.
//!
//! At most one renewal request is in flight per session. The first caller
//! to hit an expired token becomes the leader and performs the actual
//! refresh; callers arriving while it runs enqueue a continuation and
//! suspend. When the renewal settles, the queue is drained exactly once
//! and every waiter observes the same outcome.

use std::future::Future;

use tokio::sync::{Mutex, oneshot};
use tracing::debug;

use crate::error::ClientError;

/// A caller blocked on the in-flight renewal.
type Waiter = oneshot::Sender<Result<String, ClientError>>;

#[derive(Debug, Default)]
struct RenewState {
    /// Whether a renewal request is currently in flight.
    renewing: bool,
    /// FIFO of callers waiting for that renewal's outcome.
    waiters: Vec<Waiter>,
}

/// Collapses concurrent renewal triggers into one underlying refresh call.
#[derive(Debug, Default)]
pub struct RenewalCoordinator {
    state: Mutex<RenewState>,
}

enum Flight {
    Leader,
    Follower(oneshot::Receiver<Result<String, ClientError>>),
}

impl RenewalCoordinator {
    /// Creates an idle coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh access token, performing at most one renewal.
    ///
    /// If no renewal is in flight, the caller becomes the leader and
    /// `do_renew` runs; otherwise the caller suspends until the leader's
    /// outcome arrives. The leader settles every queued waiter with a
    /// clone of its result before returning.
    pub async fn renew_or_wait<F, Fut>(&self, do_renew: F) -> Result<String, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, ClientError>>,
    {
        let flight = {
            let mut state = self.state.lock().await;
            if state.renewing {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Flight::Follower(rx)
            } else {
                state.renewing = true;
                Flight::Leader
            }
        };

        match flight {
            Flight::Follower(rx) => {
                debug!("Queued behind in-flight renewal");
                // The leader always drains the queue before releasing the
                // renewing flag, so a dropped sender means its task died.
                rx.await.unwrap_or(Err(ClientError::SessionExpired))
            }
            Flight::Leader => {
                debug!("Starting renewal");
                let outcome = do_renew().await;

                let waiters = {
                    let mut state = self.state.lock().await;
                    state.renewing = false;
                    std::mem::take(&mut state.waiters)
                };

                debug!(waiters = waiters.len(), ok = outcome.is_ok(), "Renewal settled");
                for waiter in waiters {
                    let _ = waiter.send(outcome.clone());
                }

                outcome
            }
        }
    }
}
