//! Access layer for the DogNZB watchlist API.
//!
//! Every operation is one GET against `/watchlist`, issued through an
//! injected [`HttpGet`] so tests can substitute canned responses. Bodies are
//! always XML, whatever the `o` parameter asks for.

pub mod client;
pub mod decode;
pub mod error;
pub mod http;
pub mod url;

pub use client::{DogNzbClient, DOGNZB_URL};
pub use error::{TransportError, WatchlistError};
pub use http::{HttpGet, HttpResponse, ReqwestGet};
pub use url::{build_url, Verb};
