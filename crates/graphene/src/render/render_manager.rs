//! # Deferred Render State Machine
//!
//! One frame is a walk through the pass registry:
//!
//! ```text
//! Geometry → Skybox → None
//! Frame → Shadows? → Lights? → None
//! ```
//!
//! The caller picks the entry state (a viewport starts at
//! [`RenderStateId::Geometry`], a compositing target at
//! [`RenderStateId::Frame`]) and [`RenderManager::update`] runs states until
//! it reaches [`RenderStateId::None`].

use super::frame::{TextureUnit, BIND_LIGHT, BIND_MATERIAL};
use super::render_state::notify;
use super::{Mesh, RenderError, RenderResult, RenderState, RenderStateId, Shader, UniformBuffer, UniformValue};
use crate::foundation::collections::ObjectId;
use crate::scene::{Camera, Scene};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

bitflags! {
    /// Optional passes after the frame pass
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct RenderPasses: u32 {
        /// Run the shadow pass
        const SHADOWS = 1 << 0;
        /// Run the per-light pass
        const LIGHTS = 1 << 1;
    }
}

impl Default for RenderPasses {
    fn default() -> Self {
        Self::LIGHTS
    }
}

/// Owner of the pass registry and the shared fullscreen resources
#[derive(Debug)]
pub struct RenderManager {
    states: [RenderState; RenderStateId::COUNT],
    current: RenderStateId,
    passes: RenderPasses,
    frame: Rc<dyn Mesh>,
    light_buffer: Rc<dyn UniformBuffer>,
}

impl RenderManager {
    /// Manager with empty states, starting at [`RenderStateId::None`]
    pub fn new(frame: Rc<dyn Mesh>, light_buffer: Rc<dyn UniformBuffer>) -> Self {
        Self {
            states: Default::default(),
            current: RenderStateId::None,
            passes: RenderPasses::default(),
            frame,
            light_buffer,
        }
    }

    /// Current state of the machine
    pub const fn current_state(&self) -> RenderStateId {
        self.current
    }

    /// Select the state the next [`RenderManager::update`] starts from
    pub fn set_render_state(&mut self, id: RenderStateId) {
        log::trace!("Render state set to {id:?}");
        self.current = id;
    }

    /// Registry entry of a pass
    pub fn render_state(&self, id: RenderStateId) -> &RenderState {
        &self.states[id.index()]
    }

    /// Mutable registry entry, for shaders and callbacks
    pub fn render_state_mut(&mut self, id: RenderStateId) -> &mut RenderState {
        &mut self.states[id.index()]
    }

    /// Enabled optional passes
    pub const fn passes(&self) -> RenderPasses {
        self.passes
    }

    /// Select the optional passes
    pub fn set_passes(&mut self, passes: RenderPasses) {
        self.passes = passes;
    }

    /// Whether the shadow pass runs after the frame pass
    pub const fn has_shadow_pass(&self) -> bool {
        self.passes.contains(RenderPasses::SHADOWS)
    }

    /// Whether the per-light pass runs
    pub const fn has_light_pass(&self) -> bool {
        self.passes.contains(RenderPasses::LIGHTS)
    }

    /// Fullscreen quad drawn by the frame and light passes
    pub fn frame(&self) -> &Rc<dyn Mesh> {
        &self.frame
    }

    /// Run states from the current one until [`RenderStateId::None`]
    ///
    /// # Errors
    /// - [`RenderError::NoneStateUpdate`] when the machine is already at `None`
    /// - [`RenderError::InvalidCamera`] when `camera` is missing or not a camera
    /// - [`RenderError::MissingShader`] when a drawing state has no shader
    pub fn update(&mut self, scene: &Scene, camera: ObjectId) -> RenderResult<()> {
        if self.current == RenderStateId::None {
            return Err(RenderError::NoneStateUpdate);
        }
        let camera_state = scene.camera(camera).map_err(|_| RenderError::InvalidCamera(camera))?;

        while self.current != RenderStateId::None {
            let id = self.current;
            self.enter(id);
            let next = match self.update_state(id, scene, camera, camera_state) {
                Ok(next) => next,
                Err(error) => {
                    self.current = RenderStateId::None;
                    return Err(error);
                }
            };
            log::trace!("Render state {id:?} -> {next:?}");
            self.current = next;
        }

        Ok(())
    }

    fn enter(&self, id: RenderStateId) {
        if let Some(shader) = self.states[id.index()].shader() {
            shader.enable();
        }
    }

    fn update_state(
        &mut self,
        id: RenderStateId,
        scene: &Scene,
        camera: ObjectId,
        camera_state: &Camera,
    ) -> RenderResult<RenderStateId> {
        match id {
            RenderStateId::Geometry => self.update_geometry(scene, camera, camera_state),
            RenderStateId::Skybox => self.update_skybox(scene, camera, camera_state),
            RenderStateId::Frame => self.update_frame(scene),
            RenderStateId::Shadows => Ok(self.after_shadows()),
            RenderStateId::Lights => self.update_lights(scene, camera),
            RenderStateId::None => Err(RenderError::NoneStateUpdate),
        }
    }

    fn update_geometry(&mut self, scene: &Scene, camera: ObjectId, camera_state: &Camera) -> RenderResult<RenderStateId> {
        let id = RenderStateId::Geometry;
        let model_view = scene.calculate_model_view(camera)?;
        let (shader, callback) = self.states[id.index()].parts_mut();
        let shader = shader.ok_or(RenderError::MissingShader(id))?;

        shader.set_uniform_block("Material", BIND_MATERIAL);
        shader.set_uniform("diffuseSampler", UniformValue::Int(TextureUnit::Diffuse.index()));
        shader.set_uniform("modelViewProjection", UniformValue::Mat4(*camera_state.projection() * model_view));

        scene.iterate_entities(|object, entity, model, normal| {
            notify(callback, id, Some(object));
            shader.set_uniform("localWorld", UniformValue::Mat4(*model));
            shader.set_uniform("normalRotation", UniformValue::Mat4(*normal));
            entity.render();
        });

        Ok(RenderStateId::Skybox)
    }

    fn update_skybox(&mut self, scene: &Scene, camera: ObjectId, camera_state: &Camera) -> RenderResult<RenderStateId> {
        let id = RenderStateId::Skybox;
        let Some(skybox) = scene.skybox() else {
            return Ok(RenderStateId::None);
        };
        let object = scene.object(skybox)?;
        let entity = scene.entity(skybox)?;
        let view = scene.calculate_view(camera)?;
        let (shader, callback) = self.states[id.index()].parts_mut();
        let shader = shader.ok_or(RenderError::MissingShader(id))?;

        notify(callback, id, Some(object));
        shader.set_uniform_block("Material", BIND_MATERIAL);
        shader.set_uniform("diffuseSampler", UniformValue::Int(TextureUnit::Diffuse.index()));
        shader.set_uniform("modelViewProjection", UniformValue::Mat4(*camera_state.projection() * view));
        entity.render();

        Ok(RenderStateId::None)
    }

    fn update_frame(&mut self, scene: &Scene) -> RenderResult<RenderStateId> {
        let id = RenderStateId::Frame;
        let (shader, callback) = self.states[id.index()].parts_mut();
        let shader = shader.ok_or(RenderError::MissingShader(id))?;

        notify(callback, id, None);
        shader.set_uniform("diffuseSampler", UniformValue::Int(TextureUnit::Diffuse.index()));
        shader.set_uniform("ambientColor", UniformValue::Vec3(scene.ambient_color()));
        shader.set_uniform("ambientEnergy", UniformValue::Float(scene.ambient_energy()));
        self.frame.render();

        if self.has_shadow_pass() {
            return Ok(RenderStateId::Shadows);
        }
        Ok(self.after_shadows())
    }

    const fn after_shadows(&self) -> RenderStateId {
        if self.has_light_pass() {
            RenderStateId::Lights
        } else {
            RenderStateId::None
        }
    }

    fn update_lights(&mut self, scene: &Scene, camera: ObjectId) -> RenderResult<RenderStateId> {
        let id = RenderStateId::Lights;
        let camera_position = scene.calculate_position(camera)?;
        let frame = Rc::clone(&self.frame);
        let light_buffer = Rc::clone(&self.light_buffer);
        let (shader, callback) = self.states[id.index()].parts_mut();
        let shader = shader.ok_or(RenderError::MissingShader(id))?;

        shader.set_uniform_block("Light", BIND_LIGHT);
        shader.set_uniform("diffuseSampler", UniformValue::Int(TextureUnit::Diffuse.index()));
        shader.set_uniform("specularSampler", UniformValue::Int(TextureUnit::Specular.index()));
        shader.set_uniform("positionSampler", UniformValue::Int(TextureUnit::Position.index()));
        shader.set_uniform("normalSampler", UniformValue::Int(TextureUnit::Normal.index()));
        shader.set_uniform("cameraPosition", UniformValue::Vec3(camera_position));

        scene.iterate_lights(|object, light, position, direction| {
            notify(callback, id, Some(object));
            shader.set_uniform("lightPosition", UniformValue::Vec3(position));
            shader.set_uniform("lightDirection", UniformValue::Vec3(direction));
            light_buffer.upload(bytemuck::bytes_of(&light.block(position, direction)));
            light_buffer.bind(BIND_LIGHT);
            frame.render();
        });

        Ok(RenderStateId::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::GraphicsComponent;
    use crate::scene::{Light, LightBlock, LightType};
    use crate::transform::Movable;
    use std::cell::RefCell;

    type Log = Rc<RefCell<Vec<String>>>;

    #[derive(Debug)]
    struct RecordingShader {
        name: &'static str,
        log: Log,
    }

    impl Shader for RecordingShader {
        fn enable(&self) {
            self.log.borrow_mut().push(format!("{}.enable", self.name));
        }

        fn set_uniform(&self, name: &str, _value: UniformValue) {
            self.log.borrow_mut().push(format!("{}.{name}", self.name));
        }

        fn set_uniform_block(&self, name: &str, bind_point: u32) {
            self.log.borrow_mut().push(format!("{}.block {name}@{bind_point}", self.name));
        }
    }

    #[derive(Debug)]
    struct RecordingMesh {
        log: Log,
    }

    impl Mesh for RecordingMesh {
        fn render(&self) {
            self.log.borrow_mut().push("frame.render".to_string());
        }
    }

    impl GraphicsComponent for RecordingMesh {
        fn render(&self) {
            self.log.borrow_mut().push("component.render".to_string());
        }
    }

    #[derive(Debug, Default)]
    struct RecordingBuffer {
        uploads: RefCell<Vec<Vec<u8>>>,
        binds: RefCell<Vec<u32>>,
    }

    impl UniformBuffer for RecordingBuffer {
        fn upload(&self, bytes: &[u8]) {
            self.uploads.borrow_mut().push(bytes.to_vec());
        }

        fn bind(&self, bind_point: u32) {
            self.binds.borrow_mut().push(bind_point);
        }
    }

    struct Fixture {
        scene: Scene,
        camera: ObjectId,
        manager: RenderManager,
        log: Log,
        buffer: Rc<RecordingBuffer>,
    }

    fn fixture() -> Fixture {
        let log: Log = Rc::default();
        let buffer = Rc::new(RecordingBuffer::default());
        let mut manager = RenderManager::new(Rc::new(RecordingMesh { log: Rc::clone(&log) }), buffer.clone());
        for (id, name) in [
            (RenderStateId::Geometry, "geometry"),
            (RenderStateId::Skybox, "skybox"),
            (RenderStateId::Frame, "frame"),
            (RenderStateId::Lights, "lights"),
        ] {
            let shader = RecordingShader { name, log: Rc::clone(&log) };
            manager.render_state_mut(id).set_shader(Rc::new(shader));
        }

        let mut scene = Scene::new("render");
        let root = scene.root_node();
        let camera = scene.create_camera("camera");
        scene.attach_object(root, camera).unwrap();

        Fixture { scene, camera, manager, log, buffer }
    }

    fn add_entity(fixture: &mut Fixture, name: &str) -> ObjectId {
        let root = fixture.scene.root_node();
        let entity = fixture.scene.create_entity(name);
        let component = Rc::new(RecordingMesh { log: Rc::clone(&fixture.log) });
        fixture.scene.entity_mut(entity).unwrap().add_component(component);
        fixture.scene.attach_object(root, entity).unwrap();
        entity
    }

    fn count(log: &Log, entry: &str) -> usize {
        log.borrow().iter().filter(|line| line.as_str() == entry).count()
    }

    #[test]
    fn test_update_on_none_is_an_error() {
        let mut fixture = fixture();
        assert_eq!(fixture.manager.current_state(), RenderStateId::None);
        let result = fixture.manager.update(&fixture.scene, fixture.camera);
        assert!(matches!(result, Err(RenderError::NoneStateUpdate)));
    }

    #[test]
    fn test_invalid_camera() {
        let mut fixture = fixture();
        let entity = add_entity(&mut fixture, "box");
        fixture.manager.set_render_state(RenderStateId::Geometry);
        let result = fixture.manager.update(&fixture.scene, entity);
        assert!(matches!(result, Err(RenderError::InvalidCamera(id)) if id == entity));
        assert!(fixture.log.borrow().is_empty());
    }

    #[test]
    fn test_geometry_renders_entities_then_stops_without_skybox() {
        let mut fixture = fixture();
        add_entity(&mut fixture, "first");
        add_entity(&mut fixture, "second");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        fixture.manager.render_state_mut(RenderStateId::Geometry).set_callback(move |id, object| {
            sink.borrow_mut().push((id, object.map(|object| object.name().to_string())));
        });

        fixture.manager.set_render_state(RenderStateId::Geometry);
        fixture.manager.update(&fixture.scene, fixture.camera).unwrap();

        assert_eq!(fixture.manager.current_state(), RenderStateId::None);
        assert_eq!(
            *seen.borrow(),
            vec![
                (RenderStateId::Geometry, Some("first".to_string())),
                (RenderStateId::Geometry, Some("second".to_string())),
            ]
        );
        let log = fixture.log.borrow();
        assert_eq!(log[0], "geometry.enable");
        assert_eq!(log[1], "geometry.block Material@0");
        assert!(log.contains(&"geometry.modelViewProjection".to_string()));
        drop(log);
        assert_eq!(count(&fixture.log, "component.render"), 2);
        assert_eq!(count(&fixture.log, "geometry.localWorld"), 2);
        assert_eq!(count(&fixture.log, "skybox.enable"), 1);
        assert_eq!(count(&fixture.log, "skybox.modelViewProjection"), 0);
    }

    #[test]
    fn test_skybox_pass_draws_skybox() {
        let mut fixture = fixture();
        let sky = fixture.scene.create_entity("sky");
        let component = Rc::new(RecordingMesh { log: Rc::clone(&fixture.log) });
        fixture.scene.entity_mut(sky).unwrap().add_component(component);
        fixture.scene.set_skybox(sky).unwrap();

        fixture.manager.set_render_state(RenderStateId::Geometry);
        fixture.manager.update(&fixture.scene, fixture.camera).unwrap();

        assert_eq!(count(&fixture.log, "skybox.modelViewProjection"), 1);
        assert_eq!(count(&fixture.log, "skybox.block Material@0"), 1);
        assert_eq!(count(&fixture.log, "component.render"), 1);
    }

    #[test]
    fn test_frame_without_optional_passes() {
        let mut fixture = fixture();
        fixture.manager.set_passes(RenderPasses::empty());
        fixture.manager.set_render_state(RenderStateId::Frame);
        fixture.manager.update(&fixture.scene, fixture.camera).unwrap();

        assert_eq!(
            *fixture.log.borrow(),
            vec![
                "frame.enable".to_string(),
                "frame.diffuseSampler".to_string(),
                "frame.ambientColor".to_string(),
                "frame.ambientEnergy".to_string(),
                "frame.render".to_string(),
            ]
        );
    }

    #[test]
    fn test_frame_runs_light_pass_per_light() {
        let mut fixture = fixture();
        let root = fixture.scene.root_node();
        for (name, x) in [("left", -2.0), ("right", 2.0)] {
            let light = fixture.scene.create_light(name, Light::new(LightType::Point));
            fixture.scene.object_mut(light).unwrap().translate(Vec3::new(x, 1.0, 0.0));
            fixture.scene.attach_object(root, light).unwrap();
        }

        fixture.manager.set_render_state(RenderStateId::Frame);
        fixture.manager.update(&fixture.scene, fixture.camera).unwrap();

        assert_eq!(count(&fixture.log, "lights.enable"), 1);
        assert_eq!(count(&fixture.log, "lights.cameraPosition"), 1);
        assert_eq!(count(&fixture.log, "lights.lightPosition"), 2);
        assert_eq!(count(&fixture.log, "frame.render"), 3);
        assert_eq!(*fixture.buffer.binds.borrow(), vec![BIND_LIGHT, BIND_LIGHT]);

        let uploads = fixture.buffer.uploads.borrow();
        assert_eq!(uploads.len(), 2);
        let block: LightBlock = bytemuck::pod_read_unaligned(&uploads[0]);
        assert_eq!(block.position, [-2.0, 1.0, 0.0]);
        assert_eq!(block.light_type, LightType::Point.shader_index());
    }

    #[test]
    fn test_shadow_pass_is_pass_through() {
        let mut fixture = fixture();
        fixture.manager.set_passes(RenderPasses::SHADOWS);
        fixture.manager.set_render_state(RenderStateId::Frame);
        fixture.manager.update(&fixture.scene, fixture.camera).unwrap();
        assert_eq!(count(&fixture.log, "lights.enable"), 0);

        fixture.manager.set_passes(RenderPasses::SHADOWS | RenderPasses::LIGHTS);
        fixture.manager.set_render_state(RenderStateId::Frame);
        fixture.manager.update(&fixture.scene, fixture.camera).unwrap();
        assert_eq!(count(&fixture.log, "lights.enable"), 1);
        assert_eq!(fixture.manager.current_state(), RenderStateId::None);
    }

    #[test]
    fn test_missing_shader() {
        let mut fixture = fixture();
        let log: Log = Rc::default();
        let mut manager = RenderManager::new(Rc::new(RecordingMesh { log }), fixture.buffer.clone());
        manager.set_render_state(RenderStateId::Frame);
        let result = manager.update(&fixture.scene, fixture.camera);
        assert!(matches!(result, Err(RenderError::MissingShader(RenderStateId::Frame))));
        assert_eq!(manager.current_state(), RenderStateId::None);

        fixture.manager.set_render_state(RenderStateId::Shadows);
        fixture.manager.set_passes(RenderPasses::empty());
        fixture.manager.update(&fixture.scene, fixture.camera).unwrap();
    }
}
