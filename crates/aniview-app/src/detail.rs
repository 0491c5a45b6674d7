//! Media detail screen state.
//!
//! Navigating to a media page issues one keyed load; navigating again, even
//! while the first is still in flight, supersedes it.  The fetched detail is
//! folded into a [`MediaPageState`] snapshot with the stat row precomputed.

use std::future::Future;
use std::sync::Arc;

use aniview_api::{Character, Client, MediaCard, MediaDetail, MediaType, RankType, Trailer};
use aniview_core::{Disposed, FetchError, LoadController, LoadState};
use tokio::sync::watch;
use tracing::debug;

/// Key for one media page: which entry, and which catalogue it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaQuery {
    pub id: i32,
    pub media_type: MediaType,
}

/// A grid card carries everything needed to open its page.
impl From<&MediaCard> for MediaQuery {
    fn from(card: &MediaCard) -> Self {
        Self {
            id: card.id,
            media_type: card.media_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatLabel {
    Score,
    Rating,
    Popularity,
}

impl StatLabel {
    pub fn title(&self) -> &'static str {
        match self {
            StatLabel::Score => "Score",
            StatLabel::Rating => "Rating",
            StatLabel::Popularity => "Popularity",
        }
    }
}

/// One cell of the stat row.  `value` stays `None` when the API has no
/// figure, so the screen can render a placeholder in a stable slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub label: StatLabel,
    pub value: Option<i32>,
}

/// Everything the detail screen renders, in render order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaPageState {
    pub id: i32,
    pub banner_image: Option<String>,
    pub cover_image: Option<String>,
    pub color: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub stats: Vec<Stat>,
    pub genres: Vec<String>,
    pub characters: Vec<Character>,
    pub trailer: Option<Trailer>,
}

impl From<MediaDetail> for MediaPageState {
    fn from(detail: MediaDetail) -> Self {
        // Score always leads the row, even without a figure.  Rankings only
        // contribute when they are all-time; seasonal ranks stay off the row.
        let mut stats = vec![Stat {
            label: StatLabel::Score,
            value: detail.average_score,
        }];
        for ranking in &detail.rankings {
            if !ranking.all_time {
                continue;
            }
            let label = match ranking.rank_type {
                RankType::Rated => StatLabel::Rating,
                RankType::Popular => StatLabel::Popularity,
            };
            stats.push(Stat {
                label,
                value: Some(ranking.rank),
            });
        }
        Self {
            id: detail.id,
            banner_image: detail.banner_image,
            cover_image: detail.cover_image,
            color: detail.color,
            title: detail.title,
            description: detail.description,
            stats,
            genres: detail.genres,
            characters: detail.characters,
            trailer: detail.trailer,
        }
    }
}

/// State holder for one detail screen slot, keyed by [`MediaQuery`].
pub struct MediaDetailModel {
    controller: LoadController<MediaQuery, MediaPageState>,
}

impl MediaDetailModel {
    /// Wire the model to the shared API client.
    pub fn new(client: Arc<Client>) -> Self {
        Self::with_fetch(move |query: MediaQuery| {
            let client = Arc::clone(&client);
            async move {
                client
                    .media_detail(query.id, query.media_type)
                    .await
                    .map(MediaPageState::from)
            }
        })
    }

    /// Build from a custom fetch instead of the shared client.
    pub fn with_fetch<F, Fut>(fetch: F) -> Self
    where
        F: Fn(MediaQuery) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<MediaPageState, FetchError>> + Send + 'static,
    {
        Self {
            controller: LoadController::new(fetch),
        }
    }

    /// Load the page for `query`, superseding any load still in flight.
    pub fn load(&self, query: MediaQuery) -> Result<(), Disposed> {
        debug!("MediaDetailModel: loading media {}", query.id);
        self.controller.request(query)
    }

    /// The query most recently loaded, if any.
    pub fn current_query(&self) -> Option<MediaQuery> {
        self.controller.current_key()
    }

    pub fn observe(&self) -> watch::Receiver<LoadState<MediaPageState>> {
        self.controller.observe()
    }

    pub fn state(&self) -> LoadState<MediaPageState> {
        self.controller.state()
    }

    pub fn retry(&self) -> Result<bool, Disposed> {
        self.controller.retry()
    }

    pub fn dispose(&self) {
        self.controller.dispose()
    }
}
