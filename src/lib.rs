pub mod achievements;
pub mod auth;
pub mod config;
pub mod faculty;
pub mod fetch;
pub mod output;
pub mod ranking;
pub mod session;
pub mod stats;
pub mod store;
