//! Profile screen state.

use std::future::Future;
use std::sync::Arc;

use aniview_api::{Client, UserProfile};
use aniview_core::{Disposed, FetchError, LoadController, LoadState};
use tokio::sync::watch;
use tracing::debug;

/// Which account the profile screen shows: the token holder, or a user
/// looked up by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserQuery {
    Viewer,
    ByName(String),
}

/// State holder for the profile screen, keyed by [`UserQuery`].
pub struct ProfileModel {
    controller: LoadController<UserQuery, UserProfile>,
}

impl ProfileModel {
    /// Wire the model to the shared API client.
    pub fn new(client: Arc<Client>) -> Self {
        Self::with_fetch(move |query: UserQuery| {
            let client = Arc::clone(&client);
            async move {
                match query {
                    UserQuery::Viewer => client.viewer().await,
                    UserQuery::ByName(name) => client.user_by_name(&name).await,
                }
            }
        })
    }

    /// Build from a custom fetch instead of the shared client.
    pub fn with_fetch<F, Fut>(fetch: F) -> Self
    where
        F: Fn(UserQuery) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<UserProfile, FetchError>> + Send + 'static,
    {
        Self {
            controller: LoadController::new(fetch),
        }
    }

    /// Load a profile, superseding any load still in flight.
    pub fn load(&self, query: UserQuery) -> Result<(), Disposed> {
        debug!("ProfileModel: loading {:?}", query);
        self.controller.request(query)
    }

    /// The query most recently loaded, if any.
    pub fn current_query(&self) -> Option<UserQuery> {
        self.controller.current_key()
    }

    pub fn observe(&self) -> watch::Receiver<LoadState<UserProfile>> {
        self.controller.observe()
    }

    pub fn state(&self) -> LoadState<UserProfile> {
        self.controller.state()
    }

    pub fn retry(&self) -> Result<bool, Disposed> {
        self.controller.retry()
    }

    pub fn dispose(&self) {
        self.controller.dispose()
    }
}
