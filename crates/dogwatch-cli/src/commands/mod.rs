pub mod config;
pub mod watchlist;
