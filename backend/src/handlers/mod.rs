pub mod analytics;
pub mod birthday;
pub mod entries;
pub mod health;
pub mod profile;
pub mod prompts;
pub mod rewinds;
pub mod wellness;
