pub mod kind;
pub mod item;
pub mod response;

pub use kind::WatchlistKind;
pub use item::WatchlistItem;
pub use response::{AckResponse, Channel, ListResponse};
