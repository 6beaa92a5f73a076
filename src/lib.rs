//! MediaVault - personal video library backend
//!
//! Serves a video library over HTTP and manages the rename pipeline that
//! replaces human-readable video filenames with stable opaque identifiers,
//! keeping the id -> file mapping consistent across renames, restores, and
//! external deletions.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod jobs;
pub mod services;
