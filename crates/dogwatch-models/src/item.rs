use serde::{Deserialize, Serialize};
use crate::kind::WatchlistKind;

/// One entry of a watchlist as DogNZB reports it in the `<item>` elements of
/// a list response. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawItem")]
pub struct WatchlistItem {
    pub title: String,
    #[serde(rename = "imdbid", skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(rename = "tvdbid", skip_serializing_if = "Option::is_none")]
    pub tvdb_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

/// Wire shape of an `<item>`. A child element may repeat; the last
/// occurrence wins.
#[derive(Deserialize)]
struct RawItem {
    #[serde(default)]
    title: Vec<String>,
    #[serde(rename = "imdbid", default)]
    imdb_id: Vec<String>,
    #[serde(rename = "tvdbid", default)]
    tvdb_id: Vec<String>,
    #[serde(default)]
    year: Vec<String>,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    actors: Vec<String>,
    #[serde(default)]
    plot: Vec<String>,
    #[serde(default)]
    poster: Vec<String>,
}

impl From<RawItem> for WatchlistItem {
    fn from(mut raw: RawItem) -> Self {
        Self {
            title: raw.title.pop().unwrap_or_default(),
            imdb_id: raw.imdb_id.pop(),
            tvdb_id: raw.tvdb_id.pop(),
            year: raw.year.pop(),
            genres: raw.genres.pop(),
            actors: raw.actors.pop(),
            plot: raw.plot.pop(),
            poster: raw.poster.pop(),
        }
    }
}

impl WatchlistItem {
    /// The identifier DogNZB expects back when adding or removing this item:
    /// IMDB ids for movies, TVDB ids for shows.
    pub fn id_for(&self, kind: WatchlistKind) -> Option<&str> {
        match kind {
            WatchlistKind::Movie => self.imdb_id.as_deref(),
            WatchlistKind::Tv => self.tvdb_id.as_deref(),
        }
        .filter(|id| !id.is_empty())
    }
}
