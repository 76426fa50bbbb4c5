//! Build persistence
//!
//! Handles the on-disk library of named builds.

pub mod builds;

pub use builds::{
    load_library, load_library_from, save_library, save_library_to, BuildLibrary,
    LibraryError, SavedBuild,
};
