//! AniList GraphQL client and the sanitized domain model behind it.
//!
//! Raw response types mirror the API's nullable shapes; everything handed to
//! the rest of the workspace goes through a sanitize pass first, so screens
//! never see stray nulls.

pub mod client;
pub mod config;
pub mod media;
pub mod queries;
pub mod season;
pub mod viewer;

pub use client::{classify, Client};
pub use config::{ApiConfig, Config};
pub use media::{
    Character, ListCategory, MediaCard, MediaDetail, MediaType, RankType, Ranking, Trailer,
};
pub use season::{Season, SeasonYear};
pub use viewer::UserProfile;
