use {
    std::fmt::{self, Display},
    wasm_hooks_types::{StdError, StdResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasTracker {
    Limitless { used: u64 },
    Limited { limit: u64, remaining: u64 },
}

impl GasTracker {
    pub fn new_limitless() -> Self {
        GasTracker::Limitless { used: 0 }
    }

    pub fn new_limited(limit: u64) -> Self {
        GasTracker::Limited {
            limit,
            remaining: limit,
        }
    }

    pub fn limit(&self) -> Option<u64> {
        match self {
            GasTracker::Limitless { .. } => None,
            GasTracker::Limited { limit, .. } => Some(*limit),
        }
    }

    pub fn remaining(&self) -> Option<u64> {
        match self {
            GasTracker::Limitless { .. } => None,
            GasTracker::Limited { remaining, .. } => Some(*remaining),
        }
    }

    pub fn used(&self) -> u64 {
        match self {
            GasTracker::Limitless { used } => *used,
            GasTracker::Limited { limit, remaining } => limit - remaining,
        }
    }

    /// Deduct the given amount of gas. If not enough remains, nothing is
    /// deducted and an `OutOfGas` error is returned.
    pub fn deduct(&mut self, consumed: u64, comment: &'static str) -> StdResult<()> {
        match self {
            GasTracker::Limitless { used } => {
                *used = used.saturating_add(consumed);
                Ok(())
            },
            GasTracker::Limited { limit, remaining } => {
                if *remaining < consumed {
                    let used = (*limit - *remaining).saturating_add(consumed);

                    #[cfg(feature = "tracing")]
                    tracing::warn!(limit = *limit, used, comment, "Out of gas");

                    Err(StdError::OutOfGas {
                        limit: *limit,
                        used,
                        comment,
                    })
                } else {
                    *remaining -= consumed;

                    Ok(())
                }
            },
        }
    }
}

impl Display for GasTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GasTracker::Limitless { used } => write!(f, "Gas info: limitless, used: {}", used),
            GasTracker::Limited { limit, remaining } => {
                write!(f, "Gas info: limit: {}, used: {}", limit, limit - remaining)
            },
        }
    }
}
