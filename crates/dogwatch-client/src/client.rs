use crate::decode::{decode_ack, decode_list};
use crate::error::{TransportError, WatchlistError};
use crate::http::HttpGet;
use crate::url::{build_url, Verb};
use dogwatch_models::{AckResponse, WatchlistItem, WatchlistKind};
use reqwest::Url;
use tracing::{debug, warn};

pub const DOGNZB_URL: &str = "https://api.dognzb.cr";

/// Client for one DogNZB account.
///
/// Holds the API key and the transport; nothing changes between calls, so a
/// client can be reused for as many requests as needed.
pub struct DogNzbClient<G> {
    api_key: String,
    base_url: Url,
    http: G,
}

impl<G: HttpGet> DogNzbClient<G> {
    /// `base_url` is normally [`DOGNZB_URL`]; another host (e.g. a local
    /// stand-in) works as long as it serves `/watchlist`.
    pub fn new(api_key: impl Into<String>, base_url: Url, http: G) -> Self {
        Self {
            api_key: api_key.into(),
            base_url,
            http,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url_for(&self, verb: Verb, kind: WatchlistKind, id: Option<&str>) -> Url {
        build_url(&self.base_url, verb, kind, &self.api_key, id)
    }

    async fn get(&self, verb: Verb, kind: WatchlistKind, id: Option<&str>) -> Result<String, WatchlistError> {
        debug!("dognzb watchlist request: t={}, kind={}, id={:?}", verb, kind, id);

        let url = self.url_for(verb, kind, id);
        let response = self.http.get(url.as_str()).await?;

        if !response.is_success() {
            return Err(TransportError::Status { status: response.status }.into());
        }

        Ok(response.body)
    }

    /// List the items on the movie or TV watchlist, in the order DogNZB
    /// returns them.
    pub async fn list(&self, kind: WatchlistKind) -> Result<Vec<WatchlistItem>, WatchlistError> {
        let body = self.get(Verb::List, kind, None).await?;
        let list = decode_list(&body)?;

        if list.is_error() {
            warn!("dognzb rejected list {}: code={}, description={}", kind, list.code, list.description);
            return Err(WatchlistError::Service {
                code: list.code.to_string(),
                description: list.description,
            });
        }

        debug!("dognzb {} watchlist has {} items", kind, list.channel.items.len());
        Ok(list.channel.items)
    }

    pub async fn add(&self, kind: WatchlistKind, id: &str) -> Result<(), WatchlistError> {
        self.acknowledged(Verb::Add, kind, id).await.map(|_| ())
    }

    /// Remove an item, returning DogNZB's acknowledgment for inspection.
    pub async fn remove(&self, kind: WatchlistKind, id: &str) -> Result<AckResponse, WatchlistError> {
        self.acknowledged(Verb::Remove, kind, id).await
    }

    async fn acknowledged(&self, verb: Verb, kind: WatchlistKind, id: &str) -> Result<AckResponse, WatchlistError> {
        let body = self.get(verb, kind, Some(id)).await?;
        let ack = decode_ack(&body)?;

        if ack.is_error() {
            warn!("dognzb rejected {} {} {}: code={}, description={}", verb, kind, id, ack.code, ack.description);
            return Err(WatchlistError::Service {
                code: ack.code,
                description: ack.description,
            });
        }

        Ok(ack)
    }
}
