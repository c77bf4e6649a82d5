pub mod categorizer;
pub mod diversifier_service;
pub mod story_tracker_service;
pub mod text_analysis;
