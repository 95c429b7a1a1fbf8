//! Restaurant recommendations served as a single server-rendered page.
//!
//! A [`RecommendationController`](services::RecommendationController) checks
//! for a Gemini credential, asks the configured provider for restaurants and
//! keeps the resulting view state; [`view::select_view`] maps that state to
//! one of five page branches.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod view;
