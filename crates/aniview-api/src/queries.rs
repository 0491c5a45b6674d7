//! GraphQL documents sent to the API.
//!
//! Field selections match what the sanitize pass in [`crate::media`] and
//! [`crate::viewer`] consumes; anything added here should be picked up there.

pub const MEDIA_LIST: &str = r#"
query ($type: MediaType, $sort: [MediaSort], $page: Int, $perPage: Int, $season: MediaSeason, $seasonYear: Int) {
    Page(page: $page, perPage: $perPage) {
        media(type: $type, sort: $sort, season: $season, seasonYear: $seasonYear) {
            id
            title { romaji english native }
            coverImage { large }
        }
    }
}
"#;

pub const MEDIA_DETAIL: &str = r#"
query ($id: Int, $type: MediaType) {
    Media(id: $id, type: $type) {
        id
        bannerImage
        coverImage { extraLarge color }
        title { romaji english native }
        description
        averageScore
        rankings { rank type allTime }
        genres
        characters(sort: FAVOURITES_DESC) {
            nodes {
                image { large }
                name { full }
            }
        }
        trailer { id site thumbnail }
    }
}
"#;

pub const VIEWER: &str = r#"
query {
    Viewer {
        id
        name
        about
        avatar { large }
        bannerImage
    }
}
"#;

pub const USER_BY_NAME: &str = r#"
query ($name: String) {
    User(name: $name) {
        id
        name
        about
        avatar { large }
        bannerImage
    }
}
"#;
