//! Empathy chat - a mood-aware supportive chat backend
//!
//! Classifies each message into a mood (with a crisis override), answers
//! from fixed templates, and keeps per-session history and mood tallies
//! in SQLite.

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod api;
pub mod chat;
pub mod config;
pub mod db;
pub mod mood;
pub mod state_machine;
pub mod store;
pub mod widget;
