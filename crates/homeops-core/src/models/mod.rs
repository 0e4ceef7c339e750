//! Data models: items, purchase drafts, catalogs and engine configuration.

pub mod catalog;
pub mod config;
pub mod draft;
pub mod item;
