use serde::{Deserialize, Serialize};
use url::Url;

/// Source pages without an editorial description carry this exact string.
/// A record whose description equals it is suppressed, never persisted.
pub const PLACEHOLDER_DESCRIPTION: &str = "--- add one?";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Honor {
    pub honor: String,
    pub year: String,
}

/// One player page, field by field. Everything except `url` and `name` is
/// optional in the source markup and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub birth_year: Option<u32>,
    #[serde(default)]
    pub birth_place: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub honors: Vec<Honor>,
}

impl PlayerRecord {
    pub fn new(url: &Url) -> Self {
        Self {
            url: url.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub url: String,
    pub name: String,
    pub players: Vec<String>,
}
