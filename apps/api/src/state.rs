use std::sync::Arc;

use crate::config::Config;
use crate::lexicon::Lexicon;
use crate::matching::scorer::{KeywordMatchScorer, MatchScorer, ScoringWeights};

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; requests never share mutable data.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Stopwords, aliases, phrases and heading lists used by every analysis step.
    pub lexicon: Arc<Lexicon>,
    /// Pluggable match scorer. Default: KeywordMatchScorer with weights from config.
    pub scorer: Arc<dyn MatchScorer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let scorer = KeywordMatchScorer::new(ScoringWeights {
            skills: config.skills_weight,
            text: config.text_weight,
        });
        Self {
            config,
            lexicon: Arc::new(Lexicon::default()),
            scorer: Arc::new(scorer),
        }
    }
}
