pub mod config;
pub mod search;
pub mod session;
pub mod shell;
pub mod watchlist;
