// Crate root library declaration and module exports.
rust_i18n::i18n!("locales", fallback = "en");

pub mod auth;
pub mod cli;
pub mod client;
pub mod color_utils;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod i18n;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod session;
pub mod storage;

#[cfg(feature = "tui")]
pub mod tui;
