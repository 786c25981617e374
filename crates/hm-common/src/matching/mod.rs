pub mod adapter;
pub mod label;
pub mod location;
pub mod pipeline;
pub mod prefilter;
pub mod scoring;
pub mod weights;

pub use adapter::{Party, ProfileSource};
pub use label::{label_for, CompatibilityLabel, LabelConfig};
pub use pipeline::{match_stats, RankingEngine, RankingEngineConfig};
pub use prefilter::{ListingFilter, RejectReason, RoommateFilter};
pub use scoring::{score, CompatibilityEngine, MatchScore, MatchingConfig, ScoringResult};
