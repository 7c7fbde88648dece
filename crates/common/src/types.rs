use glam::Vec3;
use serde::{Deserialize, Serialize};

/// RGBA colour, each channel in `[0, 1]`.
pub type Rgba = [f32; 4];

/// Surface parameters consumed by the lighting shader.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub base_color: Rgba,
    pub diffuse_color: Rgba,
    pub specular_color: Rgba,
    pub shininess: f32,
    pub specular_strength: f32,
}

impl Material {
    /// Material using one colour for base, diffuse and specular terms.
    pub const fn solid(color: Rgba, shininess: f32, specular_strength: f32) -> Self {
        Self {
            base_color: color,
            diffuse_color: color,
            specular_color: color,
            shininess,
            specular_strength,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::solid([1.0, 1.0, 1.0, 1.0], 1.0, 1.0)
    }
}

/// One drawable entity: transform plus material.
///
/// Rotation holds Euler angles in radians, applied X then Y then Z.
/// Values are rebuilt from game state every tick and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderObject {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub material: Material,
}

impl Default for RenderObject {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            material: Material::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_material_shares_color() {
        let m = Material::solid([0.0, 1.0, 0.0, 1.0], 1.0, 1.0);
        assert_eq!(m.base_color, m.diffuse_color);
        assert_eq!(m.diffuse_color, m.specular_color);
    }

    #[test]
    fn render_object_default_is_identity_transform() {
        let obj = RenderObject::default();
        assert_eq!(obj.position, Vec3::ZERO);
        assert_eq!(obj.rotation, Vec3::ZERO);
        assert_eq!(obj.scale, Vec3::ONE);
    }
}
