//! Watch events delivered to consumers.
//!
//! This module groups the **data model** written by watch sessions to the
//! consumer-owned delivery channel.
//!
//! ## Contents
//! - [`UpdateEvent`] one change notification
//! - [`ResultMeta`]  fetch metadata, including the blocking-query index
//!
//! ## Quick reference
//! - **Producers**: `core::session::WatchSession`, one per `Cache::notify` call.
//! - **Consumers**: whoever holds the `mpsc::Receiver<UpdateEvent>` passed to
//!   `notify`. Several watches may share one channel; use
//!   [`UpdateEvent::correlation_id`] to tell them apart.

mod update;

pub use update::{ResultMeta, UpdateEvent};
