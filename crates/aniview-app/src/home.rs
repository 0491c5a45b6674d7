//! Home screen state: four media rows fetched as one bundle.

use std::future::Future;
use std::sync::Arc;

use aniview_api::{Client, ListCategory, MediaCard, MediaType};
use aniview_core::{Disposed, FetchError, LoadController, LoadState};
use futures_util::try_join;
use tokio::sync::watch;
use tracing::debug;

/// The four rows the home screen renders.  They are fetched together; the
/// screen renders only a complete bundle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeLists {
    pub trending_now: Vec<MediaCard>,
    pub popular_this_season: Vec<MediaCard>,
    pub upcoming_next_season: Vec<MediaCard>,
    pub all_time_popular: Vec<MediaCard>,
}

impl HomeLists {
    /// Fetch all four rows concurrently.  Any row failing fails the whole
    /// bundle.
    pub async fn fetch_with<F, Fut>(fetch_row: F) -> Result<Self, FetchError>
    where
        F: Fn(ListCategory) -> Fut,
        Fut: Future<Output = Result<Vec<MediaCard>, FetchError>>,
    {
        let (trending_now, popular_this_season, upcoming_next_season, all_time_popular) = try_join!(
            fetch_row(ListCategory::TrendingNow),
            fetch_row(ListCategory::PopularThisSeason),
            fetch_row(ListCategory::UpcomingNextSeason),
            fetch_row(ListCategory::AllTimePopular),
        )?;
        Ok(Self {
            trending_now,
            popular_this_season,
            upcoming_next_season,
            all_time_popular,
        })
    }
}

/// State holder for the home screen, keyed by the anime/manga selector.
pub struct HomeModel {
    controller: LoadController<MediaType, HomeLists>,
}

impl HomeModel {
    /// Wire the model to the shared API client.
    pub fn new(client: Arc<Client>) -> Self {
        Self::with_fetch(move |media_type: MediaType| {
            let client = Arc::clone(&client);
            async move {
                HomeLists::fetch_with(|category| {
                    let client = Arc::clone(&client);
                    async move { client.media_list(media_type, category, 1).await }
                })
                .await
            }
        })
    }

    /// Build from a custom fetch instead of the shared client.
    pub fn with_fetch<F, Fut>(fetch: F) -> Self
    where
        F: Fn(MediaType) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HomeLists, FetchError>> + Send + 'static,
    {
        Self {
            controller: LoadController::new(fetch),
        }
    }

    /// Switch the page between anime and manga.  The selector re-reports its
    /// choice on every pass, so a repeat of the current selection is a no-op;
    /// anything else supersedes the in-flight bundle.
    pub fn set_media_type(&self, media_type: MediaType) -> Result<(), Disposed> {
        if self.controller.is_disposed() {
            return Err(Disposed);
        }
        if self.controller.current_key() == Some(media_type) {
            return Ok(());
        }
        debug!("HomeModel: switching to {}", media_type.as_graphql());
        self.controller.request(media_type)
    }

    /// The currently selected media type, if one has been set.
    pub fn media_type(&self) -> Option<MediaType> {
        self.controller.current_key()
    }

    pub fn observe(&self) -> watch::Receiver<LoadState<HomeLists>> {
        self.controller.observe()
    }

    pub fn state(&self) -> LoadState<HomeLists> {
        self.controller.state()
    }

    pub fn retry(&self) -> Result<bool, Disposed> {
        self.controller.retry()
    }

    pub fn dispose(&self) {
        self.controller.dispose()
    }
}
