pub mod aggregate;
pub mod birthday;
pub mod heuristics;
pub mod journal;
pub mod profile;
pub mod prompts;
pub mod rewind;
pub mod wellness;

use std::sync::Arc;

use crate::ai::AnalysisService;
use crate::store::JournalStore;

use aggregate::Aggregator;
use birthday::BirthdayResolver;
use journal::JournalService;
use profile::ProfileService;
use prompts::PromptService;
use rewind::RewindGenerator;
use wellness::WellnessService;

/// Service graph shared by every request handler.
#[derive(Clone)]
pub struct Services {
    pub journal: JournalService,
    pub aggregator: Aggregator,
    pub rewinds: RewindGenerator,
    pub birthdays: BirthdayResolver,
    pub profiles: ProfileService,
    pub prompts: PromptService,
    pub wellness: WellnessService,
}

impl Services {
    pub fn new<S: JournalStore + 'static>(
        store: Arc<S>,
        ai: Arc<dyn AnalysisService>,
        model_version: impl Into<String>,
    ) -> Self {
        let aggregator = Aggregator::new(store.clone(), store.clone());
        Self {
            journal: JournalService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                ai,
                aggregator.clone(),
                model_version,
            ),
            rewinds: RewindGenerator::new(store.clone(), store.clone()),
            birthdays: BirthdayResolver::new(store.clone(), store.clone(), store.clone(), store.clone()),
            profiles: ProfileService::new(store.clone()),
            prompts: PromptService::new(store.clone()),
            wellness: WellnessService::new(store),
            aggregator,
        }
    }
}
