//! Testing infrastructure for litscope.
//!
//! This crate provides utilities for writing tests across the workspace:
//! - `fixtures`: Paper record builders and a sample corpus
//! - `world`: Isolated config and session directories
//! - `assertions`: Assertions over record lists and persisted JSON

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::TestWorld;
