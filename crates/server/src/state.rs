use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;
use verse_core::{
    Config, Corpus, FavoritesStore, RecommendationResolver, ResolutionOutcome, SanitizedConfig,
    SelectionWizard,
};

use crate::metrics::JOURNEYS_ACTIVE;

/// One user's run through the wizard.
#[derive(Debug, Clone)]
pub struct Journey {
    pub wizard: SelectionWizard,
    /// Outcome of the latest resolution, once the wizard is terminal.
    pub outcome: Option<ResolutionOutcome>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Journey {
    pub fn new(wizard: SelectionWizard) -> Self {
        let now = Utc::now();
        Self {
            wizard,
            outcome: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Whether the journey has gone untouched for at least `ttl`.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        (now - self.updated_at)
            .to_std()
            .is_ok_and(|idle| idle >= ttl)
    }
}

/// Shared application state
pub struct AppState {
    config: Config,
    resolver: Arc<RecommendationResolver>,
    corpus: Arc<Corpus>,
    favorites: Arc<dyn FavoritesStore>,
    journeys: RwLock<HashMap<Uuid, Journey>>,
    journey_ttl: Duration,
    max_journeys: usize,
}

impl AppState {
    pub fn new(
        config: Config,
        resolver: Arc<RecommendationResolver>,
        corpus: Arc<Corpus>,
        favorites: Arc<dyn FavoritesStore>,
    ) -> Self {
        let journey_ttl = Duration::from_secs(config.journeys.ttl_secs);
        let max_journeys = config.journeys.max_active.max(1);
        Self {
            config,
            resolver,
            corpus,
            favorites,
            journeys: RwLock::new(HashMap::new()),
            journey_ttl,
            max_journeys,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn resolver(&self) -> &RecommendationResolver {
        self.resolver.as_ref()
    }

    pub fn corpus(&self) -> &Corpus {
        self.corpus.as_ref()
    }

    pub fn favorites(&self) -> &dyn FavoritesStore {
        self.favorites.as_ref()
    }

    /// Store a new journey and return its id.
    ///
    /// Expired journeys are dropped first; if the map is still full the
    /// least recently updated ones make room.
    pub async fn insert_journey(&self, journey: Journey) -> Uuid {
        let id = Uuid::new_v4();
        let mut journeys = self.journeys.write().await;
        self.drop_expired(&mut journeys);

        while journeys.len() >= self.max_journeys {
            let Some(oldest) = journeys
                .iter()
                .min_by_key(|(_, j)| j.updated_at)
                .map(|(id, _)| *id)
            else {
                break;
            };
            journeys.remove(&oldest);
            debug!("Journey {} dropped to stay under {} journeys", oldest, self.max_journeys);
        }

        journeys.insert(id, journey);
        JOURNEYS_ACTIVE.set(journeys.len() as i64);
        id
    }

    /// Drop journeys idle for longer than the TTL. Returns how many went.
    pub async fn evict_expired_journeys(&self) -> usize {
        let mut journeys = self.journeys.write().await;
        let dropped = self.drop_expired(&mut journeys);
        JOURNEYS_ACTIVE.set(journeys.len() as i64);
        dropped
    }

    fn drop_expired(&self, journeys: &mut HashMap<Uuid, Journey>) -> usize {
        let now = Utc::now();
        let before = journeys.len();
        journeys.retain(|_, journey| !journey.is_expired(now, self.journey_ttl));
        let dropped = before - journeys.len();
        if dropped > 0 {
            debug!("Dropped {} expired journeys", dropped);
        }
        dropped
    }

    /// Snapshot of a journey.
    pub async fn journey(&self, id: &Uuid) -> Option<Journey> {
        self.journeys.read().await.get(id).cloned()
    }

    /// Apply `f` to a journey under the write lock.
    ///
    /// Returns `None` if the journey does not exist.
    pub async fn update_journey<T>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut Journey) -> T,
    ) -> Option<T> {
        let mut journeys = self.journeys.write().await;
        journeys.get_mut(id).map(|journey| {
            let result = f(journey);
            journey.touch();
            result
        })
    }

    /// Discard a journey.
    pub async fn remove_journey(&self, id: &Uuid) -> Option<Journey> {
        let mut journeys = self.journeys.write().await;
        let removed = journeys.remove(id);
        JOURNEYS_ACTIVE.set(journeys.len() as i64);
        removed
    }

    pub async fn journey_count(&self) -> usize {
        self.journeys.read().await.len()
    }
}

/// Periodically drop expired journeys for as long as the runtime lives.
pub fn spawn_journey_sweeper(state: Arc<AppState>) {
    let period = state.journey_ttl.min(Duration::from_secs(60));
    tokio::spawn(async move {
        info!("Journey sweeper started (ttl {:?})", state.journey_ttl);
        loop {
            tokio::time::sleep(period).await;
            state.evict_expired_journeys().await;
        }
    });
}
