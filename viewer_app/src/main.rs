//! Headless scene viewer
//!
//! Builds a small scene, spins a node and drives the deferred render state
//! machine for a few frames against logging backends.

use graphene::foundation::logging;
use graphene::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;

const CONFIG_PATH: &str = "viewer.toml";
const FRAME_COUNT: u32 = 4;

#[derive(Error, Debug)]
enum ViewerError {
    #[error("Configuration error: {0}")]
    Config(#[from] graphene::config::ConfigError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Shader that reports every call at trace level
#[derive(Debug)]
struct LoggingShader {
    name: &'static str,
}

impl Shader for LoggingShader {
    fn enable(&self) {
        log::trace!("[{}] enable", self.name);
    }

    fn set_uniform(&self, name: &str, value: UniformValue) {
        log::trace!("[{}] uniform {name} = {value:?}", self.name);
    }

    fn set_uniform_block(&self, name: &str, bind_point: u32) {
        log::trace!("[{}] block {name} -> {bind_point}", self.name);
    }
}

/// Mesh that counts its draws
#[derive(Debug)]
struct CountingMesh {
    name: &'static str,
    draws: Cell<u32>,
}

impl CountingMesh {
    fn new(name: &'static str) -> Self {
        Self { name, draws: Cell::new(0) }
    }
}

impl Mesh for CountingMesh {
    fn render(&self) {
        self.draws.set(self.draws.get() + 1);
        log::trace!("draw {}", self.name);
    }
}

#[derive(Debug)]
struct MeshComponent {
    mesh: Rc<CountingMesh>,
}

impl GraphicsComponent for MeshComponent {
    fn render(&self) {
        self.mesh.render();
    }
}

#[derive(Debug)]
struct LoggingBuffer;

impl UniformBuffer for LoggingBuffer {
    fn upload(&self, bytes: &[u8]) {
        log::trace!("light block upload, {} bytes", bytes.len());
    }

    fn bind(&self, bind_point: u32) {
        log::trace!("light block bound at {bind_point}");
    }
}

fn load_config() -> ApplicationConfig {
    match ApplicationConfig::load_from_file(CONFIG_PATH) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Using default configuration ({error})");
            ApplicationConfig::new("viewer")
        }
    }
}

struct SceneHandles {
    pivot: NodeId,
    camera: ObjectId,
}

fn build_scene(config: &ApplicationConfig, cube_mesh: &Rc<CountingMesh>) -> Result<(Scene, SceneHandles), ViewerError> {
    let mut scene = config.scene.build()?;
    let root = scene.root_node();

    let pivot = scene.create_node("pivot");
    scene.attach_node(root, pivot)?;
    scene.translate_node(pivot, Vec3::new(0.0, 0.0, -6.0))?;

    for (index, offset) in [-2.0_f32, 0.0, 2.0].into_iter().enumerate() {
        let cube = scene.create_entity(format!("cube{index}"));
        {
            let entity = scene.entity_mut(cube)?;
            entity.add_component(Rc::new(MeshComponent { mesh: Rc::clone(cube_mesh) }));
            entity.translate(Vec3::new(offset, 0.0, 0.0));
            entity.scale(Vec3::new(0.5, 0.5, 0.5))?;
        }
        scene.attach_object(pivot, cube)?;
    }

    let mut sun = Light::new(LightType::Directed);
    sun.set_direction(Vec3::new(0.0, -1.0, -1.0))?;
    let sun = scene.create_light("sun", sun);
    scene.attach_object(root, sun)?;

    let mut lamp = Light::new(LightType::Spot);
    lamp.set_angle(30.0);
    lamp.set_blend(0.25)?;
    let lamp = scene.create_light("lamp", lamp);
    scene.attach_object(pivot, lamp)?;
    scene.object_mut(lamp)?.translate(Vec3::new(0.0, 3.0, 0.0));

    let skybox = scene.create_entity("skybox");
    scene
        .entity_mut(skybox)?
        .add_component(Rc::new(MeshComponent { mesh: Rc::clone(cube_mesh) }));
    scene.set_skybox(skybox)?;

    let camera = scene.create_camera("camera");
    scene.camera_mut(camera)?.set_fov(config.engine.fov);
    scene.attach_object(root, camera)?;
    scene.object_mut(camera)?.translate(Vec3::new(0.0, 1.0, 4.0));
    scene.object_mut(camera)?.target_at(Vec3::new(0.0, -1.0, -10.0))?;

    log::info!(
        "Scene '{}' built with {} nodes and {} objects",
        scene.name(),
        scene.node_count(),
        scene.object_count()
    );
    Ok((scene, SceneHandles { pivot, camera }))
}

fn create_manager(config: &ApplicationConfig, frame: Rc<CountingMesh>) -> RenderManager {
    let mut manager = RenderManager::new(frame, Rc::new(LoggingBuffer));
    config.renderer.apply(&mut manager);

    for (id, name) in [
        (RenderStateId::Geometry, "geometry"),
        (RenderStateId::Skybox, "skybox"),
        (RenderStateId::Frame, "frame"),
        (RenderStateId::Lights, "lights"),
    ] {
        manager.render_state_mut(id).set_shader(Rc::new(LoggingShader { name }));
    }

    manager
        .render_state_mut(RenderStateId::Lights)
        .set_callback(|id, object| {
            if let Some(object) = object {
                log::debug!("{id:?}: shading with '{}'", object.name());
            }
        });
    manager
}

fn run() -> Result<(), ViewerError> {
    let config = load_config();
    logging::init_with_level(&config.engine.log_level);
    config.validate()?;
    log::info!(
        "Starting viewer {}x{} at {} fps",
        config.engine.width,
        config.engine.height,
        config.engine.max_fps
    );

    let cube_mesh = Rc::new(CountingMesh::new("cube"));
    let quad = Rc::new(CountingMesh::new("quad"));
    let (mut scene, handles) = build_scene(&config, &cube_mesh)?;

    let mut manager = create_manager(&config, Rc::clone(&quad));
    let mut viewport = Viewport::new(0, 0, config.engine.width, config.engine.height);
    viewport.set_camera(&mut scene, handles.camera)?;

    let step = 360.0 / FRAME_COUNT as f32;
    for frame in 0..FRAME_COUNT {
        scene.yaw_node(handles.pivot, step)?;

        viewport.update(&mut manager, &scene)?;
        manager.set_render_state(RenderStateId::Frame);
        manager.update(&scene, handles.camera)?;

        let position = scene.calculate_position(handles.camera)?;
        log::info!("Frame {frame} rendered, camera at {position:?}");
    }

    log::info!(
        "Finished after {FRAME_COUNT} frames: {} mesh draws, {} fullscreen draws",
        cube_mesh.draws.get(),
        quad.draws.get()
    );
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        log::error!("Viewer failed: {error}");
        eprintln!("Viewer failed: {error}");
        std::process::exit(1);
    }
}
