//! Depth-first traversal and camera matrices

use super::{Entity, Light, Object, Scene, SceneError, SceneResult};
use crate::foundation::collections::{NodeId, ObjectId};
use crate::foundation::math::{Mat4, Vec3};
use crate::transform::{TransformState, Transformable};

/// `T · R · S` of one transform
fn local_world(transform: &TransformState) -> Mat4 {
    *transform.translation() * *transform.rotation() * *transform.scaling()
}

/// `opposite_R · opposite_T` of one transform
fn local_view(transform: &TransformState) -> Mat4 {
    *transform.opposite_rotation() * *transform.opposite_translation()
}

impl Scene {
    /// Visit every visible entity below the root
    ///
    /// The handler receives the object, its entity, the composed model
    /// matrix and the composed rotation used for normals. Objects of a node
    /// are visited before its child nodes.
    pub fn iterate_entities<F>(&self, mut handler: F)
    where
        F: FnMut(&Object, &Entity, &Mat4, &Mat4),
    {
        if let Some(root) = self.root() {
            self.walk_entities(root, Mat4::identity(), Mat4::identity(), &mut handler);
        }
    }

    fn walk_entities<F>(&self, node: NodeId, parent_world: Mat4, parent_normal: Mat4, handler: &mut F)
    where
        F: FnMut(&Object, &Entity, &Mat4, &Mat4),
    {
        let Some(scene_node) = self.nodes.get(node) else {
            return;
        };
        let transform = scene_node.transform();
        let world = parent_world * local_world(transform);
        let normal = parent_normal * *transform.rotation();

        for object in scene_node.objects().iter().filter_map(|id| self.objects.get(*id)) {
            let Some(entity) = object.as_entity() else {
                continue;
            };
            if !entity.is_visible() {
                continue;
            }
            let model = world * local_world(entity.transform());
            let normal_rotation = normal * *entity.transform().rotation();
            handler(object, entity, &model, &normal_rotation);
        }

        for child in scene_node.nodes() {
            self.walk_entities(*child, world, normal, handler);
        }
    }

    /// Visit every light below the root
    ///
    /// The handler receives the object, its light, the light's world
    /// position and its view-space direction.
    pub fn iterate_lights<F>(&self, mut handler: F)
    where
        F: FnMut(&Object, &Light, Vec3, Vec3),
    {
        if let Some(root) = self.root() {
            self.walk_lights(root, Mat4::identity(), Mat4::identity(), &mut handler);
        }
    }

    fn walk_lights<F>(&self, node: NodeId, parent_translation: Mat4, parent_model_view: Mat4, handler: &mut F)
    where
        F: FnMut(&Object, &Light, Vec3, Vec3),
    {
        let Some(scene_node) = self.nodes.get(node) else {
            return;
        };
        let transform = scene_node.transform();
        let translation = parent_translation * *transform.translation();
        let model_view = parent_model_view * local_view(transform);

        for object in scene_node.objects().iter().filter_map(|id| self.objects.get(*id)) {
            let Some(light) = object.as_light() else {
                continue;
            };
            let light_translation = translation * *light.transform().translation();
            let light_model_view = model_view * local_view(light.transform());
            let position = light_translation.translation();
            let direction = light_model_view.extract_mat3().row_vec3(2);
            handler(object, light, position, direction);
        }

        for child in scene_node.nodes() {
            self.walk_lights(*child, translation, model_view, handler);
        }
    }

    /// View matrix of `camera` including its ancestors
    ///
    /// # Errors
    /// Fails when the handle is invalid or not a camera.
    pub fn calculate_model_view(&self, camera: ObjectId) -> SceneResult<Mat4> {
        self.compose_camera(camera, local_view)
    }

    /// Rotation-only view matrix of `camera`, used by the skybox pass
    ///
    /// # Errors
    /// Fails when the handle is invalid or not a camera.
    pub fn calculate_view(&self, camera: ObjectId) -> SceneResult<Mat4> {
        self.compose_camera(camera, |transform| *transform.opposite_rotation())
    }

    /// World position of `camera`
    ///
    /// # Errors
    /// Fails when the handle is invalid or not a camera.
    pub fn calculate_position(&self, camera: ObjectId) -> SceneResult<Vec3> {
        let object = self.object(camera)?;
        let camera_state = object.as_camera().ok_or(SceneError::NotACamera(camera))?;

        let mut translation = Mat4::identity();
        let mut cursor = object.parent();
        while let Some(node) = cursor.and_then(|id| self.nodes.get(id)) {
            translation = *node.transform().translation() * translation;
            cursor = node.parent();
        }

        Ok((translation * *camera_state.transform().translation()).translation())
    }

    /// Walk camera to root, left-multiplying each ancestor, camera last
    fn compose_camera<F>(&self, camera: ObjectId, local: F) -> SceneResult<Mat4>
    where
        F: Fn(&TransformState) -> Mat4,
    {
        let object = self.object(camera)?;
        let camera_state = object.as_camera().ok_or(SceneError::NotACamera(camera))?;

        let mut matrix = Mat4::identity();
        let mut cursor = object.parent();
        while let Some(node) = cursor.and_then(|id| self.nodes.get(id)) {
            matrix = local(node.transform()) * matrix;
            cursor = node.parent();
        }

        Ok(local(camera_state.transform()) * matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::LightType;
    use crate::foundation::math::Vec4;
    use crate::transform::{Movable, Rotatable, Scalable};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    fn scene_with_camera() -> (Scene, NodeId, NodeId, ObjectId) {
        let mut scene = Scene::new("traversal");
        let root = scene.root_node();
        let child = scene.create_node("child");
        let camera = scene.create_camera("camera");
        scene.attach_node(root, child).unwrap();
        scene.attach_object(child, camera).unwrap();
        (scene, root, child, camera)
    }

    #[test]
    fn test_iterate_entities_composes_parent_transforms() {
        let mut scene = Scene::default();
        let root = scene.root_node();
        let child = scene.create_node("child");
        let entity = scene.create_entity("box");
        scene.attach_node(root, child).unwrap();
        scene.attach_object(child, entity).unwrap();

        scene.translate_node(root, Vec3::new(1.0, 0.0, 0.0)).unwrap();
        scene.translate_node(child, Vec3::new(0.0, 2.0, 0.0)).unwrap();
        scene.object_mut(entity).unwrap().translate(Vec3::new(0.0, 0.0, 3.0));
        scene.object_mut(entity).unwrap().scale(Vec3::new(2.0, 2.0, 2.0)).unwrap();
        scene.object_mut(entity).unwrap().yaw(90.0).unwrap();

        let mut visited = Vec::new();
        scene.iterate_entities(|object, _, model, normal| {
            visited.push((object.name().to_string(), *model, *normal));
        });

        assert_eq!(visited.len(), 1);
        let (name, model, normal) = &visited[0];
        assert_eq!(name, "box");

        let root_state = scene.node(root).unwrap().transform();
        let child_state = scene.node(child).unwrap().transform();
        let entity_state = scene.object(entity).unwrap().transform();
        let expected = local_world(root_state) * local_world(child_state) * local_world(entity_state);
        assert_relative_eq!(*model, expected, epsilon = EPSILON);
        assert_relative_eq!(*normal, *entity_state.rotation(), epsilon = EPSILON);

        let origin = *model * Vec4::default();
        assert_relative_eq!(origin, Vec4::new(1.0, 2.0, 3.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_iterate_entities_skips_hidden_and_detached() {
        let mut scene = Scene::default();
        let root = scene.root_node();
        let shown = scene.create_entity("shown");
        let hidden = scene.create_entity("hidden");
        scene.create_entity("detached");
        let light = scene.create_light("lamp", Light::default());
        scene.attach_object(root, shown).unwrap();
        scene.attach_object(root, hidden).unwrap();
        scene.attach_object(root, light).unwrap();
        scene.entity_mut(hidden).unwrap().set_visible(false);

        let mut names = Vec::new();
        scene.iterate_entities(|object, _, _, _| names.push(object.name().to_string()));
        assert_eq!(names, vec!["shown".to_string()]);
    }

    #[test]
    fn test_iterate_without_root_visits_nothing() {
        let mut scene = Scene::default();
        scene.create_entity("box");
        let mut count = 0;
        scene.iterate_entities(|_, _, _, _| count += 1);
        scene.iterate_lights(|_, _, _, _| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_iterate_lights_reports_position_and_direction() {
        let mut scene = Scene::default();
        let root = scene.root_node();
        let child = scene.create_node("child");
        let light = scene.create_light("lamp", Light::new(LightType::Spot));
        scene.attach_node(root, child).unwrap();
        scene.attach_object(child, light).unwrap();

        scene.translate_node(child, Vec3::new(0.0, 5.0, 0.0)).unwrap();
        scene.object_mut(light).unwrap().translate(Vec3::new(1.0, 5.0, 0.0));
        scene.object_mut(light).unwrap().yaw(90.0).unwrap();

        let mut reported = Vec::new();
        scene.iterate_lights(|object, light, position, direction| {
            reported.push((object.name().to_string(), light.light_type(), position, direction));
        });

        assert_eq!(reported.len(), 1);
        let (name, light_type, position, direction) = &reported[0];
        assert_eq!(name, "lamp");
        assert_eq!(*light_type, LightType::Spot);
        assert_relative_eq!(*position, Vec3::new(1.0, 10.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(*direction, Vec3::UNIT_X, epsilon = EPSILON);
    }

    #[test]
    fn test_model_view_of_unparented_camera() {
        let mut scene = Scene::default();
        let camera = scene.create_camera("camera");
        scene.object_mut(camera).unwrap().translate(Vec3::new(1.0, 2.0, 3.0));

        let model_view = scene.calculate_model_view(camera).unwrap();
        assert_relative_eq!(model_view, Mat4::from_translation(Vec3::new(-1.0, -2.0, -3.0)), epsilon = EPSILON);
    }

    #[test]
    fn test_model_view_composes_ancestors() {
        let (mut scene, root, child, camera) = scene_with_camera();
        scene.translate_node(root, Vec3::new(0.0, 0.0, 1.0)).unwrap();
        scene.yaw_node(child, 30.0).unwrap();
        scene.object_mut(camera).unwrap().translate(Vec3::new(0.0, 2.0, 0.0));

        let root_state = scene.node(root).unwrap().transform();
        let child_state = scene.node(child).unwrap().transform();
        let camera_state = scene.object(camera).unwrap().transform();
        let expected = local_view(camera_state) * local_view(root_state) * local_view(child_state);

        assert_relative_eq!(scene.calculate_model_view(camera).unwrap(), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_view_uses_rotations_only() {
        let (mut scene, root, _, camera) = scene_with_camera();
        scene.translate_node(root, Vec3::new(4.0, 5.0, 6.0)).unwrap();
        scene.object_mut(camera).unwrap().yaw(90.0).unwrap();

        let view = scene.calculate_view(camera).unwrap();
        assert_relative_eq!(view.translation(), Vec3::ZERO, epsilon = EPSILON);
        assert_relative_eq!(view.row_vec3(2), Vec3::UNIT_X, epsilon = EPSILON);
    }

    #[test]
    fn test_camera_position_accumulates_translations() {
        let (mut scene, root, child, camera) = scene_with_camera();
        scene.translate_node(root, Vec3::new(1.0, 0.0, 0.0)).unwrap();
        scene.translate_node(child, Vec3::new(0.0, 2.0, 0.0)).unwrap();

        assert_relative_eq!(scene.object(camera).unwrap().position(), Vec3::new(0.0, 2.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(scene.calculate_position(camera).unwrap(), Vec3::new(1.0, 4.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_camera_queries_reject_other_objects() {
        let mut scene = Scene::default();
        let entity = scene.create_entity("box");
        assert_eq!(scene.calculate_model_view(entity), Err(SceneError::NotACamera(entity)));
        assert_eq!(scene.calculate_view(entity), Err(SceneError::NotACamera(entity)));
        assert_eq!(scene.calculate_position(entity), Err(SceneError::NotACamera(entity)));
    }
}
