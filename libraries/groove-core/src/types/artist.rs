//! Artist types

use super::UserId;
use serde::{Deserialize, Serialize};

pub type ArtistId = i64;

/// An artist profile, optionally claimed by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub image: Option<String>,
    /// Owning user; `None` for unclaimed profiles
    pub user_id: Option<UserId>,
}

/// Data for creating a new artist
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArtist {
    pub name: String,
    pub image: Option<String>,
    pub user_id: Option<UserId>,
}
