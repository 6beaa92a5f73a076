//! Core services for the video library

pub mod file_utils;
pub mod identity;
pub mod renamer;

pub use identity::IdentityError;
pub use renamer::{RenamerService, RestoredFile};
