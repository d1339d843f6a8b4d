pub mod analytics;
pub mod celebration;
pub mod entry;
pub mod interaction;
pub mod mood;
pub mod profile;
pub mod prompt;
pub mod rewind;
pub mod wellness;
