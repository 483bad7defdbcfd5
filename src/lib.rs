//! Songbot - song title lookup and lyrics quiz bot
//!
//! Resolves loosely typed song titles against a fixed catalog and runs a
//! lyrics quiz whose session state travels with the client.

pub mod bot;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod matcher;
pub mod quiz;
pub mod reply;

pub use bot::SongBot;
pub use catalog::{Catalog, CatalogStore, Song, SongField};
pub use config::Config;
pub use error::{Result, SongbotError};
pub use matcher::{Resolution, Resolver, TitleIndex};
pub use reply::Reply;
