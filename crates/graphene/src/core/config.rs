//! # Unified Configuration System
//!
//! All configuration structures of the engine in one place.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: window size, projection defaults, frame pacing,
//!   logging and debug features
//! - **Renderer Config**: optional deferred passes
//! - **Scene Config**: scene name and ambient lighting
//! - **Application Config**: the three above, loadable from TOML or RON

use crate::foundation::math::Vec3;
use crate::render::{RenderManager, RenderPasses};
use crate::scene::{Scene, SceneError};
use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};

/// # Engine Configuration
///
/// Window and frame settings plus logging and debug behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Field of view in degrees for new cameras
    pub fov: f32,
    /// Multisample count, 0 disables multisampling
    pub samples: u32,
    /// Frame rate cap
    pub max_fps: u32,
    /// Whether to wait for vertical sync
    pub vsync: bool,
    /// Whether to enable debug features
    pub debug: bool,
    /// Log level for the engine
    pub log_level: String,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            width: 800,
            height: 600,
            fov: 75.0,
            samples: 0,
            max_fps: 30,
            vsync: false,
            debug: true,
            log_level: "info".to_string(),
        }
    }

    /// Set the window size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the field of view in degrees
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    /// Set the multisample count
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    /// Set the frame rate cap
    pub fn with_max_fps(mut self, max_fps: u32) -> Self {
        self.max_fps = max_fps;
        self
    }

    /// Enable or disable vertical sync
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Frame budget in seconds
    pub fn frame_time(&self) -> f32 {
        1.0 / self.max_fps.max(1) as f32
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("Window size must be positive, got {}x{}", self.width, self.height));
        }
        if !(0.0..180.0).contains(&self.fov) || self.fov == 0.0 {
            return Err(format!("Field of view must be in (0; 180) degrees, got {}", self.fov));
        }
        if self.max_fps == 0 {
            return Err("Max FPS must be at least 1".to_string());
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(format!("Unknown log level: {}", self.log_level));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Renderer Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RendererConfig {
    /// Optional passes after the frame pass
    pub passes: RenderPasses,
}

impl RendererConfig {
    /// Set the optional passes
    pub fn with_passes(mut self, passes: RenderPasses) -> Self {
        self.passes = passes;
        self
    }

    /// Apply the pass selection to a render manager
    pub fn apply(&self, manager: &mut RenderManager) {
        manager.set_passes(self.passes);
    }
}

/// # Scene Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Scene name
    pub name: String,
    /// Ambient light energy, not negative
    pub ambient_energy: f32,
    /// Ambient light colour
    pub ambient_color: Vec3,
}

impl SceneConfig {
    /// Set the scene name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the ambient light
    pub fn with_ambient(mut self, color: Vec3, energy: f32) -> Self {
        self.ambient_color = color;
        self.ambient_energy = energy;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.ambient_energy < 0.0 {
            return Err(format!("Ambient energy is less than 0.0: {}", self.ambient_energy));
        }
        Ok(())
    }

    /// Build an empty scene with these settings
    ///
    /// # Errors
    /// [`SceneError::NegativeAmbientEnergy`] for a negative energy.
    pub fn build(&self) -> Result<Scene, SceneError> {
        let mut scene = Scene::new(self.name.clone());
        scene.set_ambient_color(self.ambient_color);
        scene.set_ambient_energy(self.ambient_energy)?;
        Ok(scene)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            name: "scene".to_string(),
            ambient_energy: 1.0,
            ambient_color: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Rendering system configuration
    pub renderer: RendererConfig,
    /// Initial scene configuration
    pub scene: SceneConfig,
}

impl ApplicationConfig {
    /// Create a new application configuration with defaults
    pub fn new(scene_name: impl Into<String>) -> Self {
        Self {
            scene: SceneConfig::default().with_name(scene_name),
            ..Self::default()
        }
    }

    /// Replace the engine configuration
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the renderer configuration
    pub fn with_renderer(mut self, renderer: RendererConfig) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replace the scene configuration
    pub fn with_scene(mut self, scene: SceneConfig) -> Self {
        self.scene = scene;
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate().map_err(ConfigError::Invalid)?;
        self.scene.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}

impl Config for ApplicationConfig {}
