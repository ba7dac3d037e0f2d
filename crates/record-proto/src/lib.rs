//! Shared data and collaborators for the Radio Record browser: the catalog
//! model and HTTP client, configuration, persisted preferences and platform
//! paths.

pub mod catalog;
pub mod config;
pub mod platform;
pub mod prefs;
pub mod protocol;
