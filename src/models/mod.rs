mod article;
mod story_tracker;

pub use article::{Article, NewsCategory};
pub use story_tracker::{StoryMention, StoryStatus, StoryTrackerRecord, StoryTrackerUpdate};
