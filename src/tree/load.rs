use std::fmt;
use std::future::Future;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

/// Final state of an image load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The image decoded and is displayable.
    Loaded,
    /// The image failed to load; it renders as a broken region.
    Failed,
}

/// Shareable completion handle for one image load.
///
/// Cloning the handle (for example when the composition tree is cloned) shares the same
/// underlying operation, so every clone observes the same outcome.
#[derive(Clone)]
pub struct ImageLoad(LoadState);

#[derive(Clone)]
enum LoadState {
    Settled(LoadOutcome),
    Pending(Shared<BoxFuture<'static, LoadOutcome>>),
}

impl ImageLoad {
    /// A load that already finished.
    pub fn settled(outcome: LoadOutcome) -> Self {
        Self(LoadState::Settled(outcome))
    }

    /// A load that finishes when `fut` resolves.
    pub fn pending<F>(fut: F) -> Self
    where
        F: Future<Output = LoadOutcome> + Send + 'static,
    {
        Self(LoadState::Pending(fut.boxed().shared()))
    }

    /// Outcome if the load already settled.
    pub fn outcome(&self) -> Option<LoadOutcome> {
        match &self.0 {
            LoadState::Settled(o) => Some(*o),
            LoadState::Pending(fut) => fut.peek().copied(),
        }
    }

    /// `true` once the load settled, successfully or not.
    pub fn is_complete(&self) -> bool {
        self.outcome().is_some()
    }

    /// Wait until the load settles.
    pub async fn wait(&self) -> LoadOutcome {
        match &self.0 {
            LoadState::Settled(o) => *o,
            LoadState::Pending(fut) => fut.clone().await,
        }
    }
}

impl Default for ImageLoad {
    fn default() -> Self {
        Self::settled(LoadOutcome::Loaded)
    }
}

impl fmt::Debug for ImageLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome() {
            Some(o) => f.debug_tuple("ImageLoad").field(&o).finish(),
            None => f.write_str("ImageLoad(Pending)"),
        }
    }
}
