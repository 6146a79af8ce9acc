//! Scripted backend for watch tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::types::{CacheType, FetchOptions, Fetched, Request};

/// One recorded call to [`ScriptedType::fetch`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct FetchCall {
    pub min_index: u64,
    pub at: Instant,
}

/// Blocking type that replays a fixed script, then blocks forever.
///
/// Every call is reported on the receiver returned by [`ScriptedType::new`]
/// before the scripted outcome is returned.
pub(crate) struct ScriptedType {
    script: Mutex<VecDeque<Fetched>>,
    calls: mpsc::UnboundedSender<FetchCall>,
}

impl ScriptedType {
    pub(crate) fn new(script: Vec<Fetched>) -> (Arc<Self>, mpsc::UnboundedReceiver<FetchCall>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let ty = Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: tx,
        });
        (ty, rx)
    }
}

#[async_trait]
impl CacheType for ScriptedType {
    fn supports_blocking(&self) -> bool {
        true
    }

    async fn fetch(&self, opts: FetchOptions, _request: Request) -> Fetched {
        let _ = self.calls.send(FetchCall {
            min_index: opts.min_index,
            at: Instant::now(),
        });
        let next = self.script.lock().expect("script lock").pop_front();
        match next {
            Some(fetched) => fetched,
            None => std::future::pending().await,
        }
    }
}
