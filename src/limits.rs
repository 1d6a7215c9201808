use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Shared flag used to stop a running exact search from another thread.
///
/// Clones refer to the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that has not been cancelled.
    pub fn new() -> Self {
        Default::default()
    }

    /// Request that every search holding this token stop at its next step.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns whether `cancel` has been called on this token or a clone of it.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Budgets for the exact solver. When one is exhausted the solver stops and
/// returns the best packing found so far. The default has no limits.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    /// Maximum number of search nodes to expand.
    pub max_nodes: Option<u64>,

    /// Maximum wall-clock time to search.
    pub time_limit: Option<Duration>,

    /// Token checked before each node is expanded.
    #[cfg_attr(feature = "serialize", serde(skip))]
    pub cancel_token: Option<CancelToken>,
}

impl SearchLimits {
    /// No limits.
    pub fn new() -> Self {
        Default::default()
    }

    /// Stop after expanding `max_nodes` search nodes.
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Stop once `time_limit` has elapsed.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Stop when `token` is cancelled.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel_token = Some(token);
        self
    }
}

/// Why an exact search stopped before proving optimality.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AbortReason {
    /// The node budget was used up.
    NodeLimit,
    /// The time budget was used up.
    TimeLimit,
    /// The cancel token was triggered.
    Cancelled,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::NodeLimit => write!(f, "node limit reached"),
            AbortReason::TimeLimit => write!(f, "time limit reached"),
            AbortReason::Cancelled => write!(f, "search cancelled"),
        }
    }
}

/// Tracks one search's use of its `SearchLimits`.
pub(crate) struct Budget<'a> {
    limits: &'a SearchLimits,
    start: Instant,
}

impl<'a> Budget<'a> {
    /// Check the clock every 1024 nodes (2^10).
    const CLOCK_CHECK_MASK: u64 = 0x3FF;

    pub(crate) fn start(limits: &'a SearchLimits) -> Self {
        Budget {
            limits,
            start: Instant::now(),
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns the reason to stop, if any, before expanding another node
    /// when `nodes` have been expanded so far.
    pub(crate) fn exhausted(&self, nodes: u64) -> Option<AbortReason> {
        if let Some(ref token) = self.limits.cancel_token {
            if token.is_cancelled() {
                return Some(AbortReason::Cancelled);
            }
        }

        if let Some(max_nodes) = self.limits.max_nodes {
            if nodes >= max_nodes {
                return Some(AbortReason::NodeLimit);
            }
        }

        if let Some(time_limit) = self.limits.time_limit {
            if nodes & Self::CLOCK_CHECK_MASK == 0 && self.elapsed() >= time_limit {
                return Some(AbortReason::TimeLimit);
            }
        }

        None
    }
}
