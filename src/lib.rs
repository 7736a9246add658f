//! CSV loading, text search, descriptive statistics and chart preparation
//! for the Rusty CSV viewer.
//!
//! Every function here is pure: it takes a [`data::model::Dataset`] (or raw
//! bytes) and returns a new value or a [`error::DataError`].

pub mod config;
pub mod data;
pub mod error;
