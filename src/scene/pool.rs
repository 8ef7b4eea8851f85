use hecs::{DynamicBundle, Entity, World};

use crate::components::LocalTransform;

/// Fixed-size set of world entities of one kind.
///
/// Every slot is spawned into the `World` at construction and is never
/// despawned; recycling moves an entity rather than replacing it, so the
/// handles in [`entities`](EntityPool::entities) stay valid for the whole
/// session. Iteration is always in creation (slot) order.
pub struct EntityPool {
    name: &'static str,
    entities: Vec<Entity>,
}

impl EntityPool {
    /// Spawn `count` entities, building slot `i` from `factory(i)`.
    pub fn new<B, F>(world: &mut World, name: &'static str, count: usize, mut factory: F) -> Self
    where
        B: DynamicBundle,
        F: FnMut(usize) -> B,
    {
        let entities: Vec<Entity> = (0..count).map(|index| world.spawn(factory(index))).collect();
        tracing::debug!(pool = name, count, "entity pool allocated");
        Self { name, entities }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Spatial handles, in slot order, for rendering and collision queries.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[allow(dead_code)]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Visit every entity's transform in slot order.
    #[allow(dead_code)]
    pub fn for_each<F>(&self, world: &mut World, mut f: F)
    where
        F: FnMut(usize, Entity, &mut LocalTransform),
    {
        for (index, &entity) in self.entities.iter().enumerate() {
            if let Ok(mut transform) = world.get::<&mut LocalTransform>(entity) {
                f(index, entity, &mut transform);
            }
        }
    }

    /// Collect one value per entity, in slot order.
    pub fn map<T, F>(&self, world: &World, mut f: F) -> Vec<T>
    where
        F: FnMut(usize, &LocalTransform) -> T,
    {
        self.entities
            .iter()
            .enumerate()
            .filter_map(|(index, &entity)| {
                world
                    .get::<&LocalTransform>(entity)
                    .ok()
                    .map(|transform| f(index, &transform))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn line_of(world: &mut World, count: usize) -> EntityPool {
        EntityPool::new(world, "markers", count, |i| {
            (LocalTransform::new(Vec3::new(i as f32, 0.0, 0.0)),)
        })
    }

    #[test]
    fn builds_count_entities_in_slot_order() {
        let mut world = World::new();
        let pool = line_of(&mut world, 4);
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.name(), "markers");
        let xs = pool.map(&world, |_, t| t.position.x);
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn for_each_mutates_without_changing_membership() {
        let mut world = World::new();
        let pool = line_of(&mut world, 3);
        let handles = pool.entities().to_vec();

        pool.for_each(&mut world, |i, _, t| t.position.z = -(i as f32));

        assert_eq!(pool.entities(), handles.as_slice());
        assert_eq!(pool.map(&world, |_, t| t.position.z), vec![0.0, -1.0, -2.0]);
        assert!(pool.contains(handles[1]));
    }

    #[test]
    fn empty_pool_is_allowed() {
        let mut world = World::new();
        let pool = line_of(&mut world, 0);
        assert!(pool.is_empty());
        assert!(pool.map(&world, |_, t| t.position).is_empty());
    }
}
