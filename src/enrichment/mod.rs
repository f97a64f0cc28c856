//! Enrichment running-score computation.
//!
//! Recomputes the classic weighted Kolmogorov-Smirnov-style running statistic
//! (Subramanian et al. 2005) for a single pathway over a ranked feature list,
//! producing the step curve, hit tick positions and signed peak that the
//! enrichment plot panel displays. Significance is not computed here; it
//! arrives precomputed in the embedded result tables.

pub mod curve;

pub use curve::{EnrichmentCurve, rank_features, running_score};
