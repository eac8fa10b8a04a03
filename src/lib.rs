pub mod categorizer;
pub mod config;
pub mod content;
pub mod display;
pub mod extractor;
pub mod fetcher;

pub use categorizer::{Category, FeedItem, categorize, categorize_item};
pub use content::{ContentOutcome, ContentPipeline, ExtractionStage, NO_CONTENT};
