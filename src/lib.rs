//! Core selection and continuity logic for personalized market briefings.
//!
//! Two independent components, invoked sequentially by the briefing
//! orchestrator:
//!
//! - the diversifier (`services::diversifier_service`) picks a small set of
//!   pairwise non-redundant news articles out of a scored candidate pool;
//! - the story tracker (`services::story_tracker_service`) maintains
//!   per-user, cross-day continuity state for recurring narratives behind an
//!   injected [`store::StoryTrackerStore`].

pub mod db;
pub mod errors;
pub mod logging;
pub mod models;
pub mod services;
pub mod store;
