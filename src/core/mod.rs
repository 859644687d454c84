//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Error type shared by the engine and the CLI
//! - Data model (FileResult, Collection, configuration)
//! - Key derivation from discovered paths
//! - Rendering of a Collection to rust/json/jsonl
//! - File reading
//! - Hashing and escaping helpers

pub mod error;
pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
pub mod util;
