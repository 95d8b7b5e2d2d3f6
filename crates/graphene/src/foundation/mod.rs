//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Arena handles for the scene graph
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod logging;
