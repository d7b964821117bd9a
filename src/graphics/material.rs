//=========================================================================
// Material Descriptors
//=========================================================================
//
// Surface appearance handed to the render backend:
//
//   Shading::Basic     unlit color / texture
//   Shading::Standard  PBR metalness-roughness, optional env map
//   Shading::Toon      cel shading through a gradient ramp
//   Shading::Matcap    baked lighting from a matcap texture
//   Shading::Points    sprite size for point clouds
//
//=========================================================================

use super::color::Color;
use super::texture::{CubeTextureHandle, TextureHandle};

//=== Blending ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blending {
    #[default]
    Normal,
    Additive,
}

//=== Shading =============================================================

#[derive(Debug, Clone)]
pub enum Shading {
    Basic,
    Standard {
        metalness: f32,
        roughness: f32,
        env_map: Option<CubeTextureHandle>,
        env_map_intensity: f32,
    },
    Toon {
        gradient_map: Option<TextureHandle>,
    },
    Matcap {
        matcap: Option<TextureHandle>,
    },
    Points {
        size: f32,
        size_attenuation: bool,
    },
}

//=== TextureMaps =========================================================

/// Optional texture channels shared by the surface shadings.
#[derive(Debug, Clone, Default)]
pub struct TextureMaps {
    pub color: Option<TextureHandle>,
    pub alpha: Option<TextureHandle>,
    pub ambient_occlusion: Option<TextureHandle>,
    pub normal: Option<TextureHandle>,
    pub roughness: Option<TextureHandle>,
    pub metalness: Option<TextureHandle>,
    pub displacement: Option<TextureHandle>,
    pub displacement_scale: f32,
}

impl TextureMaps {
    pub fn bound_count(&self) -> usize {
        [
            &self.color,
            &self.alpha,
            &self.ambient_occlusion,
            &self.normal,
            &self.roughness,
            &self.metalness,
            &self.displacement,
        ]
        .iter()
        .filter(|slot| slot.is_some())
        .count()
    }
}

//=== Material ============================================================

#[derive(Debug, Clone)]
pub struct Material {
    pub shading: Shading,
    pub color: Color,
    pub maps: TextureMaps,
    pub wireframe: bool,
    pub transparent: bool,
    pub opacity: f32,
    pub blending: Blending,
    pub depth_write: bool,
    pub vertex_colors: bool,
}

impl Material {
    fn with_shading(shading: Shading, color: Color) -> Self {
        Self {
            shading,
            color,
            maps: TextureMaps::default(),
            wireframe: false,
            transparent: false,
            opacity: 1.0,
            blending: Blending::Normal,
            depth_write: true,
            vertex_colors: false,
        }
    }

    //--- Constructors -----------------------------------------------------

    pub fn basic(color: Color) -> Self {
        Self::with_shading(Shading::Basic, color)
    }

    pub fn standard(color: Color, metalness: f32, roughness: f32) -> Self {
        Self::with_shading(
            Shading::Standard { metalness, roughness, env_map: None, env_map_intensity: 1.0 },
            color,
        )
    }

    pub fn toon(color: Color, gradient_map: Option<TextureHandle>) -> Self {
        Self::with_shading(Shading::Toon { gradient_map }, color)
    }

    pub fn matcap(matcap: Option<TextureHandle>) -> Self {
        Self::with_shading(Shading::Matcap { matcap }, Color::WHITE)
    }

    pub fn points(size: f32, size_attenuation: bool) -> Self {
        Self::with_shading(Shading::Points { size, size_attenuation }, Color::WHITE)
    }

    //--- Builders ---------------------------------------------------------

    pub fn wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }

    pub fn with_map(mut self, map: Option<TextureHandle>) -> Self {
        self.maps.color = map;
        self
    }

    pub fn with_maps(mut self, maps: TextureMaps) -> Self {
        self.maps = maps;
        self
    }

    /// Transparent material masked by `alpha` (white shows, black hides).
    pub fn with_alpha_map(mut self, alpha: Option<TextureHandle>) -> Self {
        self.maps.alpha = alpha;
        self.transparent = true;
        self
    }

    pub fn with_env_map(mut self, env: Option<CubeTextureHandle>) -> Self {
        if let Shading::Standard { env_map, .. } = &mut self.shading {
            *env_map = env;
        }
        self
    }

    pub fn with_env_map_intensity(mut self, intensity: f32) -> Self {
        if let Shading::Standard { env_map_intensity, .. } = &mut self.shading {
            *env_map_intensity = intensity;
        }
        self
    }

    /// Additive blending, vertex colors, no depth writes.
    pub fn glowing_vertex_colors(mut self) -> Self {
        self.blending = Blending::Additive;
        self.depth_write = false;
        self.vertex_colors = true;
        self
    }

    //--- Live Parameters --------------------------------------------------

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn metalness(&self) -> Option<f32> {
        match self.shading {
            Shading::Standard { metalness, .. } => Some(metalness),
            _ => None,
        }
    }

    pub fn roughness(&self) -> Option<f32> {
        match self.shading {
            Shading::Standard { roughness, .. } => Some(roughness),
            _ => None,
        }
    }

    /// Updates PBR parameters; ignored for other shadings.
    pub fn set_pbr(&mut self, new_metalness: Option<f32>, new_roughness: Option<f32>) {
        if let Shading::Standard { metalness, roughness, .. } = &mut self.shading {
            if let Some(m) = new_metalness {
                *metalness = m.clamp(0.0, 1.0);
            }
            if let Some(r) = new_roughness {
                *roughness = r.clamp(0.0, 1.0);
            }
        }
    }

    pub fn point_size(&self) -> Option<f32> {
        match self.shading {
            Shading::Points { size, .. } => Some(size),
            _ => None,
        }
    }

    /// Whether scene lights affect this material.
    pub fn is_lit(&self) -> bool {
        matches!(self.shading, Shading::Standard { .. } | Shading::Toon { .. })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::texture::Texture;

    fn tiny() -> TextureHandle {
        Texture::from_rgba("t", 1, 1, vec![255; 4]).unwrap().into_handle()
    }

    #[test]
    fn standard_parameters_clamp() {
        let mut m = Material::standard(Color::hex(0x777777), 0.8, 0.4);
        m.set_pbr(Some(1.5), Some(-0.2));
        assert_eq!(m.metalness(), Some(1.0));
        assert_eq!(m.roughness(), Some(0.0));
        assert!(m.is_lit());
    }

    #[test]
    fn pbr_setters_ignore_unlit_shadings() {
        let mut m = Material::basic(Color::RED).wireframe();
        m.set_pbr(Some(0.5), None);
        assert_eq!(m.metalness(), None);
        assert!(m.wireframe);
        assert!(!m.is_lit());
    }

    #[test]
    fn alpha_map_turns_on_transparency() {
        let mut m = Material::basic(Color::BLACK).with_alpha_map(Some(tiny()));
        assert!(m.transparent);
        assert_eq!(m.maps.bound_count(), 1);

        m.set_opacity(1.4);
        assert_eq!(m.opacity, 1.0);
    }

    #[test]
    fn galaxy_points_material_flags() {
        let m = Material::points(0.01, true).glowing_vertex_colors();
        assert_eq!(m.blending, Blending::Additive);
        assert!(!m.depth_write);
        assert!(m.vertex_colors);
        assert_eq!(m.point_size(), Some(0.01));
    }

    #[test]
    fn env_map_only_attaches_to_standard() {
        let basic = Material::basic(Color::WHITE).with_env_map(None).with_env_map_intensity(0.5);
        assert!(matches!(basic.shading, Shading::Basic));

        let standard = Material::standard(Color::WHITE, 1.0, 0.0).with_env_map_intensity(0.5);
        match standard.shading {
            Shading::Standard { env_map_intensity, .. } => assert_eq!(env_map_intensity, 0.5),
            other => panic!("unexpected {:?}", other),
        }
    }
}
