//! Modules layer - Infrastructure components
//!
//! Contains adapters for infrastructure the features build on, such as media storage.

pub mod storage;
