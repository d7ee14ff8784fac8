use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two DogNZB watchlists an operation targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WatchlistKind {
    Movie,
    Tv,
}

impl WatchlistKind {
    /// Query parameter that carries the item identifier for this watchlist.
    pub fn id_param(&self) -> &'static str {
        match self {
            WatchlistKind::Movie => "movieid",
            WatchlistKind::Tv => "showid",
        }
    }
}

impl fmt::Display for WatchlistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchlistKind::Movie => write!(f, "movies"),
            WatchlistKind::Tv => write!(f, "tv"),
        }
    }
}
