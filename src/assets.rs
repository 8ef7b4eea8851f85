//! Named model templates, looked up by the scene builders.
//!
//! The registry is built once by the app before the first frame and handed
//! around by reference. Geometry itself belongs to the renderer; a template
//! only carries what the simulation needs from a model.

use std::collections::HashMap;

use glam::Vec3;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum AssetError {
    #[error("no model template registered under \"{0}\"")]
    Missing(String),
}

/// Simulation-facing description of one model.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelTemplate {
    pub name: String,
    /// Y coordinate the model sits at.
    pub rest_height: f32,
    pub scale: f32,
    /// Half extents of the collision box, already scaled.
    pub half_extents: Vec3,
}

pub struct AssetRegistry {
    models: HashMap<String, ModelTemplate>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self { models: HashMap::new() }
    }

    /// Templates for every model the game ships with.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(ModelTemplate {
            name: "flying-car".into(),
            rest_height: 1.0,
            scale: 1.25,
            half_extents: Vec3::new(0.9, 0.5, 1.6),
        });
        // Rocks sink below the road and tower above the car's ray height.
        registry.register(ModelTemplate {
            name: "rock".into(),
            rest_height: -1.0,
            scale: 1.0,
            half_extents: Vec3::new(1.0, 2.5, 1.0),
        });
        registry.register(ModelTemplate {
            name: "suitcase1".into(),
            rest_height: 1.0,
            scale: 1.0,
            half_extents: Vec3::new(0.5, 0.4, 0.25),
        });
        registry.register(ModelTemplate {
            name: "suitcase2".into(),
            rest_height: 1.0,
            scale: 1.0,
            half_extents: Vec3::new(0.45, 0.5, 0.3),
        });
        registry.register(ModelTemplate {
            name: "background".into(),
            rest_height: -1.0,
            scale: 1.0,
            half_extents: Vec3::new(100.0, 0.0, 100.0),
        });
        registry
    }

    /// Register `template`, replacing any previous one with the same name.
    pub fn register(&mut self, template: ModelTemplate) {
        tracing::trace!(name = %template.name, "model template registered");
        self.models.insert(template.name.clone(), template);
    }

    pub fn model(&self, name: &str) -> Result<&ModelTemplate, AssetError> {
        self.models
            .get(name)
            .ok_or_else(|| AssetError::Missing(name.to_owned()))
    }
}
