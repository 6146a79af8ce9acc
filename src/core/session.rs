//! # WatchSession: one registered watch.
//!
//! Keeps a single cache key fresh with repeated blocking fetches and writes an
//! [`UpdateEvent`] to the consumer's channel each time the index advances.
//!
//! ## Loop
//! ```text
//! index = 0, failures = 0
//!
//! loop {
//!   ├─► cancelled?                        → exit
//!   ├─► fetch_once(min_index = index)     (cancellable)
//!   ├─► cancelled?                        → exit
//!   ├─► index < meta.index?
//!   │     ├─► send UpdateEvent            (cancellable, never dropped)
//!   │     │     └─ channel closed         → exit
//!   │     ├─► capacity 1? wait until taken (cancellable)
//!   │     └─► index = meta.index
//!   ├─► no error and meta.index > 0 ? failures = 0 : failures += 1
//!   ├─► delay = backoff.delay(failures)
//!   │     └─► delay > 0 → sleep(delay)    (cancellable)
//!   └─► index = max(index, 1)
//! }
//! ```
//!
//! ## Rules
//! - Index 0 is only ever requested on the first iteration; it returns the
//!   currently known value without waiting. Every later fetch blocks.
//! - A fetch returning index 0 counts as a failure even without an error, so
//!   a backend that never reports an index is polled with backoff, not in a
//!   busy loop.
//! - The cursor advances after a successful send even when the fetch carried
//!   an error; the backend's index is authoritative.
//! - The send completes before the next fetch starts. A consumer that stops
//!   reading stalls this session only.
//! - A channel of capacity 1 runs in rendezvous mode: after each send the
//!   session waits until the consumer has received the event, so no fetch
//!   runs while an event sits unread in the buffer.
//! - The session never closes the channel and never reports an error; it
//!   exits silently on cancellation or when the receiver is gone.

use rand::{rngs::StdRng, SeedableRng};
use tokio::{select, sync::mpsc, time};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{config::WatchConfig, fetch::fetch_once},
    events::UpdateEvent,
    types::{Fetched, Request, TypeRef},
};

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    /// The governing token was cancelled.
    Cancelled,
    /// The consumer dropped the receiving half of the channel.
    ChannelClosed,
}

impl SessionExit {
    /// Returns a short stable label for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SessionExit::Cancelled => "cancelled",
            SessionExit::ChannelClosed => "channel_closed",
        }
    }
}

/// State and collaborators of one watch.
pub struct WatchSession {
    type_name: String,
    ty: TypeRef,
    request: Request,
    correlation_id: String,
    tx: mpsc::Sender<UpdateEvent>,
    cfg: WatchConfig,
    rng: StdRng,
}

impl WatchSession {
    /// Creates a session for an already-validated type.
    pub fn new(
        type_name: impl Into<String>,
        ty: TypeRef,
        request: Request,
        correlation_id: impl Into<String>,
        tx: mpsc::Sender<UpdateEvent>,
        cfg: WatchConfig,
    ) -> Self {
        let rng = match cfg.jitter_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            type_name: type_name.into(),
            ty,
            request,
            correlation_id: correlation_id.into(),
            tx,
            cfg,
            rng,
        }
    }

    /// Runs the refresh loop until `token` is cancelled or the channel closes.
    ///
    /// ### Cancellation semantics
    /// `token` is observed before and after every fetch, and races the fetch,
    /// the send and the backoff sleep. Once it is observed nothing else is
    /// fetched or sent.
    pub async fn run(mut self, token: CancellationToken) -> SessionExit {
        let mut index: u64 = 0;
        let mut failures: u32 = 0;

        loop {
            if token.is_cancelled() {
                return self.exit(SessionExit::Cancelled, index);
            }

            let fetched = select! {
                biased;
                _ = token.cancelled() => return self.exit(SessionExit::Cancelled, index),
                fetched = fetch_once(
                    self.ty.as_ref(),
                    &self.request,
                    index,
                    self.cfg.fetch_timeout(),
                ) => fetched,
            };

            if token.is_cancelled() {
                return self.exit(SessionExit::Cancelled, index);
            }

            let Fetched { value, meta, error } = fetched;
            let progressed = error.is_none() && meta.index > 0;

            if let Some(err) = &error {
                tracing::debug!(
                    correlation_id = %self.correlation_id,
                    type_name = %self.type_name,
                    min_index = index,
                    index = meta.index,
                    error = %err,
                    label = err.as_label(),
                    "fetch failed"
                );
            }

            if index < meta.index {
                let event = UpdateEvent {
                    correlation_id: self.correlation_id.clone(),
                    result: value,
                    meta,
                    err: error,
                };
                select! {
                    biased;
                    _ = token.cancelled() => return self.exit(SessionExit::Cancelled, index),
                    sent = self.tx.send(event) => {
                        if sent.is_err() {
                            return self.exit(SessionExit::ChannelClosed, index);
                        }
                    }
                }
                if self.tx.max_capacity() == 1 {
                    // Rendezvous: the slot frees only once the consumer took the event.
                    select! {
                        biased;
                        _ = token.cancelled() => return self.exit(SessionExit::Cancelled, index),
                        permit = self.tx.reserve() => {
                            if permit.is_err() {
                                return self.exit(SessionExit::ChannelClosed, index);
                            }
                        }
                    }
                }
                tracing::trace!(
                    correlation_id = %self.correlation_id,
                    prev = index,
                    index = meta.index,
                    "update delivered"
                );
                index = meta.index;
            }

            if progressed {
                failures = 0;
            } else {
                failures = failures.saturating_add(1);
            }

            let delay = self.cfg.backoff.delay(failures, &mut self.rng);
            if !delay.is_zero() {
                self.log_backoff(failures, delay, index);

                let sleep = time::sleep(delay);
                tokio::pin!(sleep);
                select! {
                    biased;
                    _ = token.cancelled() => return self.exit(SessionExit::Cancelled, index),
                    _ = &mut sleep => {}
                }
            }

            if index < 1 {
                index = 1;
            }
        }
    }

    fn log_backoff(&self, failures: u32, delay: std::time::Duration, index: u64) {
        if self.cfg.should_warn(failures) {
            tracing::warn!(
                correlation_id = %self.correlation_id,
                type_name = %self.type_name,
                failures,
                ?delay,
                index,
                "watch backing off"
            );
        } else {
            tracing::debug!(
                correlation_id = %self.correlation_id,
                type_name = %self.type_name,
                failures,
                ?delay,
                index,
                "watch backing off"
            );
        }
    }

    fn exit(&self, reason: SessionExit, index: u64) -> SessionExit {
        tracing::debug!(
            correlation_id = %self.correlation_id,
            type_name = %self.type_name,
            index,
            reason = reason.as_label(),
            "watch stopped"
        );
        reason
    }
}
