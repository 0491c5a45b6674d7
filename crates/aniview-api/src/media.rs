//! Media domain model: raw API shapes and their sanitized counterparts.
//!
//! The raw structs keep every field optional the way GraphQL delivers them.
//! `into_card` / `into_detail` turn them into the plain records the screens
//! consume: preferred title resolved, null list entries dropped, trailer
//! links rewritten to playable URLs.

use serde::Deserialize;
use serde_json::json;

use crate::season::SeasonYear;

// ── keys and list categories ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Anime,
    Manga,
}

impl MediaType {
    pub fn as_graphql(&self) -> &'static str {
        match self {
            MediaType::Anime => "ANIME",
            MediaType::Manga => "MANGA",
        }
    }
}

/// The four home-screen rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCategory {
    TrendingNow,
    PopularThisSeason,
    UpcomingNextSeason,
    AllTimePopular,
}

impl ListCategory {
    pub fn title(&self) -> &'static str {
        match self {
            ListCategory::TrendingNow => "Trending Now",
            ListCategory::PopularThisSeason => "Popular This Season",
            ListCategory::UpcomingNextSeason => "Upcoming Next Season",
            ListCategory::AllTimePopular => "All-Time Popular",
        }
    }

    fn sort(&self) -> &'static str {
        match self {
            ListCategory::TrendingNow => "TRENDING_DESC",
            _ => "POPULARITY_DESC",
        }
    }

    /// The season window this category filters by, if it has one.
    fn season_window(&self, today: chrono::NaiveDate) -> Option<SeasonYear> {
        match self {
            ListCategory::PopularThisSeason => Some(SeasonYear::current(today)),
            ListCategory::UpcomingNextSeason => Some(SeasonYear::current(today).next()),
            _ => None,
        }
    }

    /// Variables for [`crate::queries::MEDIA_LIST`].  Season keys are only
    /// present for the seasonal rows; the API treats a missing key as "no
    /// filter".
    pub fn variables(
        &self,
        media_type: MediaType,
        page: i32,
        per_page: i32,
        today: chrono::NaiveDate,
    ) -> serde_json::Value {
        let mut variables = json!({
            "type": media_type.as_graphql(),
            "sort": [self.sort()],
            "page": page,
            "perPage": per_page,
        });
        if let Some(window) = self.season_window(today) {
            variables["season"] = json!(window.season.as_graphql());
            variables["seasonYear"] = json!(window.year);
        }
        variables
    }
}

// ── raw API shapes ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct PageData {
    #[serde(rename = "Page")]
    pub page: Option<Page>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Page {
    #[serde(default)]
    pub media: Vec<Option<RawMedia>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MediaData {
    #[serde(rename = "Media")]
    pub media: Option<RawMedia>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMedia {
    pub id: i32,
    pub title: Option<RawTitle>,
    #[serde(rename = "coverImage")]
    pub cover_image: Option<RawCoverImage>,
    #[serde(rename = "bannerImage")]
    pub banner_image: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "averageScore")]
    pub average_score: Option<i32>,
    pub rankings: Option<Vec<Option<RawRanking>>>,
    pub genres: Option<Vec<Option<String>>>,
    pub characters: Option<RawCharacterConnection>,
    pub trailer: Option<RawTrailer>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCoverImage {
    pub large: Option<String>,
    #[serde(rename = "extraLarge")]
    pub extra_large: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRanking {
    pub rank: i32,
    #[serde(rename = "type")]
    pub rank_type: Option<String>,
    #[serde(rename = "allTime")]
    pub all_time: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCharacterConnection {
    pub nodes: Option<Vec<Option<RawCharacter>>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCharacter {
    pub image: Option<RawCharacterImage>,
    pub name: Option<RawCharacterName>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCharacterImage {
    pub large: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCharacterName {
    pub full: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTrailer {
    pub id: Option<String>,
    pub site: Option<String>,
    pub thumbnail: Option<String>,
}

// ── sanitized domain records ──────────────────────────────────────────────

/// One cell in a media grid.  Carries its media type so a card alone is
/// enough to open the detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaCard {
    pub id: i32,
    pub media_type: MediaType,
    pub title: Option<String>,
    pub cover_image: Option<String>,
}

/// Everything the detail query returns, cleaned up.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaDetail {
    pub id: i32,
    pub banner_image: Option<String>,
    /// Extra-large cover art.
    pub cover_image: Option<String>,
    /// Accent colour as a hex string, e.g. `#f1785d`.
    pub color: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub average_score: Option<i32>,
    pub rankings: Vec<Ranking>,
    pub genres: Vec<String>,
    pub characters: Vec<Character>,
    pub trailer: Option<Trailer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankType {
    Rated,
    Popular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranking {
    pub rank_type: RankType,
    pub rank: i32,
    /// Whether the rank is all-time rather than per-year or per-season.
    pub all_time: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub name: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trailer {
    /// Playable video URL.
    pub url: String,
    pub thumbnail: Option<String>,
}

// ── sanitize pass ─────────────────────────────────────────────────────────

impl RawMedia {
    pub(crate) fn into_card(self, media_type: MediaType) -> MediaCard {
        MediaCard {
            id: self.id,
            media_type,
            title: preferred_title(self.title),
            cover_image: self.cover_image.and_then(|c| c.large),
        }
    }

    pub(crate) fn into_detail(self) -> MediaDetail {
        let (cover_image, color) = match self.cover_image {
            Some(cover) => (cover.extra_large, cover.color),
            None => (None, None),
        };
        MediaDetail {
            id: self.id,
            banner_image: self.banner_image,
            cover_image,
            color,
            title: preferred_title(self.title),
            description: self.description,
            average_score: self.average_score,
            rankings: self
                .rankings
                .unwrap_or_default()
                .into_iter()
                .flatten()
                .filter_map(sanitize_ranking)
                .collect(),
            genres: self.genres.unwrap_or_default().into_iter().flatten().collect(),
            characters: self
                .characters
                .and_then(|c| c.nodes)
                .unwrap_or_default()
                .into_iter()
                .flatten()
                .map(|c| Character {
                    name: c.name.and_then(|n| n.full),
                    image: c.image.and_then(|i| i.large),
                })
                .collect(),
            trailer: self.trailer.and_then(sanitize_trailer),
        }
    }
}

/// Romaji first, then English, then native.
fn preferred_title(title: Option<RawTitle>) -> Option<String> {
    let title = title?;
    title.romaji.or(title.english).or(title.native)
}

fn sanitize_ranking(raw: RawRanking) -> Option<Ranking> {
    let rank_type = match raw.rank_type.as_deref() {
        Some("RATED") => RankType::Rated,
        Some("POPULAR") => RankType::Popular,
        _ => return None,
    };
    Some(Ranking {
        rank_type,
        rank: raw.rank,
        all_time: raw.all_time.unwrap_or(false),
    })
}

/// Rewrite a trailer reference into a playable URL plus thumbnail.  Only
/// YouTube and Dailymotion are recognised.
fn sanitize_trailer(raw: RawTrailer) -> Option<Trailer> {
    let id = raw.id?;
    match raw.site.as_deref() {
        Some("youtube") => Some(Trailer {
            url: format!("https://www.youtube.com/watch?v={}", id),
            thumbnail: Some(format!(
                "https://img.youtube.com/vi/{}/maxresdefault.jpg",
                id
            )),
        }),
        Some("dailymotion") => Some(Trailer {
            url: format!("https://www.dailymotion.com/video/{}", id),
            thumbnail: raw.thumbnail,
        }),
        _ => None,
    }
}
