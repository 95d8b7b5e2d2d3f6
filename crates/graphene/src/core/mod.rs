//! # Core Engine Module
//!
//! Shared configuration for the engine subsystems.
//!
//! ## Organization
//!
//! - **Config**: engine, renderer and scene settings with file persistence
//! - **Foundation**: re-exported for convenience

pub mod config;

pub use crate::foundation;

pub use config::{
    ApplicationConfig,
    Config,
    ConfigError,
    EngineConfig,
    RendererConfig,
    SceneConfig,
};
