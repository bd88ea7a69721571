mod app;
pub(crate) mod config;
pub(crate) mod logging;
mod persistence;
mod render;

pub(crate) use app::{prefs, send, PrefsRequest};
