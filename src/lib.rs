pub mod app;
pub mod auth;
pub mod banner;
pub mod brewer;
pub mod card;
pub mod commands;
pub mod config;
pub mod consts;
pub mod error;
pub mod events;
pub mod moods;
pub mod prompts;
pub mod session;
pub mod spinner;
