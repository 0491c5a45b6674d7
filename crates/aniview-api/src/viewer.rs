//! User profiles, for the authenticated viewer and public lookups alike.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ViewerData {
    #[serde(rename = "Viewer")]
    pub viewer: Option<RawUser>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserData {
    #[serde(rename = "User")]
    pub user: Option<RawUser>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawUser {
    pub id: i32,
    pub name: String,
    pub about: Option<String>,
    pub avatar: Option<RawAvatar>,
    #[serde(rename = "bannerImage")]
    pub banner_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAvatar {
    pub large: Option<String>,
}

/// A profile as the profile screen shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: i32,
    pub name: String,
    pub about: Option<String>,
    pub avatar: Option<String>,
    pub banner_image: Option<String>,
}

impl RawUser {
    pub(crate) fn into_profile(self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name,
            about: self.about,
            avatar: self.avatar.and_then(|a| a.large),
            banner_image: self.banner_image,
        }
    }
}
