//=========================================================================
// Scene Assets
//=========================================================================
//
// One loading manager shared by the texture, cube map and font loaders.
// A missing asset is logged and leaves its slot empty; scenes still build.
//
//=========================================================================

use std::path::PathBuf;

use log::warn;

use crate::graphics::{
    CubeTextureHandle, CubeTextureLoader, Font, FontLoader, LoadingManager, Texture, TextureHandle, TextureLoader,
};

#[derive(Debug, Clone)]
pub struct Assets {
    manager: LoadingManager,
    textures: TextureLoader,
    cube_textures: CubeTextureLoader,
    fonts: FontLoader,
}

impl Assets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let manager = LoadingManager::new();
        Self {
            textures: TextureLoader::new(root.clone(), manager.clone()),
            cube_textures: CubeTextureLoader::new(root.clone(), manager.clone()),
            fonts: FontLoader::new(root, manager.clone()),
            manager,
        }
    }

    pub fn texture(&self, url: &str) -> Option<TextureHandle> {
        self.textures.load_optional(url)
    }

    pub fn texture_with(&self, url: &str, configure: impl FnOnce(&mut Texture)) -> Option<TextureHandle> {
        self.textures.load_with(url, configure)
    }

    /// Faces in +x, -x, +y, -y, +z, -z order.
    pub fn cube_texture(&self, urls: [&str; 6]) -> Option<CubeTextureHandle> {
        self.cube_textures.load_optional(urls)
    }

    pub fn font(&self, url: &str) -> Option<Font> {
        match self.fonts.load(url) {
            Ok(font) => Some(font),
            Err(e) => {
                warn!("Font {} unavailable: {}", url, e);
                None
            }
        }
    }

    pub fn manager(&self) -> &LoadingManager {
        &self.manager
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
