//! Escalation tiers for the fallback orchestrator.
//!
//! The orchestrator moves forward through these tiers until the
//! minimum-result target is met or every tier is exhausted. It never
//! loops back to an earlier tier.
//!
//! ```text
//! Primary ──► Variations ──► ExtraEngines ──► StaticFallback ──► Done
//! ```

/// One stage of the fallback state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// All configured primary engines against the original query.
    Primary,
    /// Primary engines against generated query variations.
    Variations,
    /// Secondary/slower engines not used in the first tier.
    ExtraEngines,
    /// Synthetic reference results to top up the count.
    StaticFallback,
    /// Terminal state.
    Done,
}

impl Tier {
    /// The tier that follows this one. `Done` is absorbing.
    pub fn next(self) -> Tier {
        match self {
            Self::Primary => Self::Variations,
            Self::Variations => Self::ExtraEngines,
            Self::ExtraEngines => Self::StaticFallback,
            Self::StaticFallback | Self::Done => Self::Done,
        }
    }

    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Variations => "variations",
            Self::ExtraEngines => "extra-engines",
            Self::StaticFallback => "static-fallback",
            Self::Done => "done",
        }
    }
}
