//! Fallback orchestrator: tiered escalation, concurrent fan-out, admission.
//!
//! This module drives the whole aggregation: it fans queries out to the
//! configured engines tier by tier, normalizes and scores whatever
//! arrives, admits results through the domain-diversity filter, and
//! escalates — query variations, extra engines, static fallback — until
//! the minimum-result target is met or every tier is exhausted.

pub mod search;
pub mod tiers;
