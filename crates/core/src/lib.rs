pub mod config;
pub mod facet;
pub mod favorites;
pub mod filter;
pub mod metrics;
pub mod recommender;
pub mod resolver;
pub mod testing;
pub mod text_source;
pub mod verse;
pub mod wizard;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, JourneysConfig,
    RecommenderBackend, SanitizedConfig, TextSourceBackend,
};
pub use facet::{Facet, FacetCatalog, FacetOption, FacetSelection, FacetStep};
pub use favorites::{
    FavoritesError, FavoritesStore, InMemoryFavoritesStore, SqliteFavoritesStore,
};
pub use filter::{filter_verses, matches_selection};
pub use recommender::{
    CorpusRecommender, FallbackRecommender, RecommendError, Recommendation, Recommender,
    RemoteRecommender, RemoteRecommenderConfig,
};
pub use resolver::{
    create_resolver, load_corpus, DegradedField, Failure, FailureKind, IndexPicker,
    RecommendationResolver, ResolutionOutcome, SeededPicker, SetupError, ThreadRngPicker,
};
pub use text_source::{
    AlQuranCloudClient, AlQuranCloudConfig, AyahText, CorpusTextSource, TextPart, TextSource,
    TextSourceError,
};
pub use verse::{
    AudioUrlTemplate, Corpus, CorpusError, FacetTags, InvalidReference, ReferencePair,
    VerseRecord, VerseRef,
};
pub use wizard::{Advance, SelectionWizard, WizardError, WizardState};
