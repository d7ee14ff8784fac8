use dogwatch_models::WatchlistKind;
use reqwest::Url;
use std::fmt;

/// Operation requested through the `t` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    List,
    Add,
    Remove,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::List => "list",
            Verb::Add => "add",
            Verb::Remove => "remove",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the `/watchlist` URL for one request.
///
/// Parameters are appended in a fixed order (`t`, `o`, `apikey`, then the
/// kind-specific id) and form-urlencoded. `id` is only sent for add and
/// remove; list requests never carry one.
pub fn build_url(
    base: &Url,
    verb: Verb,
    kind: WatchlistKind,
    api_key: &str,
    id: Option<&str>,
) -> Url {
    let mut url = base.clone();
    let path = format!("{}/watchlist", base.path().trim_end_matches('/'));
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("t", verb.as_str())
            .append_pair("o", "json")
            .append_pair("apikey", api_key);

        if verb != Verb::List {
            if let Some(id) = id {
                query.append_pair(kind.id_param(), id);
            }
        }
    }

    url
}
