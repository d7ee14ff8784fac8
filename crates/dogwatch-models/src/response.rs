use serde::{Deserialize, Deserializer, Serialize};
use crate::item::WatchlistItem;

/// Decoded body of a `t=list` request.
///
/// DogNZB reports failures through `code`/`description` attributes on the
/// root element; a code of zero (or no code at all) means success.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListResponse {
    #[serde(rename = "@code", default, deserialize_with = "numeric_code")]
    pub code: i64,
    #[serde(rename = "@description", default)]
    pub description: String,
    #[serde(default)]
    pub channel: Channel,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Channel {
    #[serde(rename = "item", default)]
    pub items: Vec<WatchlistItem>,
}

/// Surrounding whitespace is ignored and an empty attribute reads as zero;
/// anything else must be an integer.
fn numeric_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(serde::de::Error::custom)
}

impl ListResponse {
    pub fn is_error(&self) -> bool {
        self.code != 0
    }
}

/// Decoded body of a `t=add` or `t=remove` request.
///
/// Unlike the list response, the code here is a string and an empty code
/// means success.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AckResponse {
    #[serde(rename = "@code", default)]
    pub code: String,
    #[serde(rename = "@description", default)]
    pub description: String,
}

impl AckResponse {
    pub fn is_error(&self) -> bool {
        !self.code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_from_xml() {
        let xml = r#"<rss version="2.0">
            <channel>
                <title>Watchlist</title>
                <item><title>Heat</title><imdbid>tt0113277</imdbid><year>1995</year></item>
                <item><title>Ronin</title><imdbid>tt0122690</imdbid></item>
            </channel>
        </rss>"#;
        let list: ListResponse = quick_xml::de::from_str(xml).unwrap();
        assert!(!list.is_error());
        assert_eq!(list.channel.items.len(), 2);
        assert_eq!(list.channel.items[0].title, "Heat");
        assert_eq!(list.channel.items[0].year.as_deref(), Some("1995"));
        assert_eq!(list.channel.items[1].imdb_id.as_deref(), Some("tt0122690"));
    }

    #[test]
    fn test_list_error_without_channel() {
        let xml = r#"<error code="100" description="Incorrect user credentials"/>"#;
        let list: ListResponse = quick_xml::de::from_str(xml).unwrap();
        assert!(list.is_error());
        assert_eq!(list.code, 100);
        assert_eq!(list.description, "Incorrect user credentials");
        assert!(list.channel.items.is_empty());
    }

    #[test]
    fn test_ack_codes() {
        let ok: AckResponse =
            quick_xml::de::from_str(r#"<watchlist description="Item added"/>"#).unwrap();
        assert!(!ok.is_error());
        assert_eq!(ok.description, "Item added");

        let failed: AckResponse =
            quick_xml::de::from_str(r#"<error code="302" description="Already in watchlist"/>"#)
                .unwrap();
        assert!(failed.is_error());
        assert_eq!(failed.code, "302");
    }
}
