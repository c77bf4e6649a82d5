pub mod story_tracker_queries;
