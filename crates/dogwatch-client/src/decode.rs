//! XML decoding for the two response shapes.
//!
//! The list and add/remove schemas disagree on the type of `code`
//! (integer vs. string), so each gets its own path.

use crate::error::WatchlistError;
use dogwatch_models::{AckResponse, ListResponse};

pub fn decode_list(body: &str) -> Result<ListResponse, WatchlistError> {
    Ok(quick_xml::de::from_str(body)?)
}

pub fn decode_ack(body: &str) -> Result<AckResponse, WatchlistError> {
    Ok(quick_xml::de::from_str(body)?)
}
