//=========================================================================
// Textures
//=========================================================================
//
// Image loading for materials, decoded to RGBA8 with the `image` crate.
//
// Architecture:
//   LoadingManager (shared counters, progress logging)
//     ├─ TextureLoader      → Texture
//     ├─ CubeTextureLoader  → CubeTexture (six faces)
//     └─ FontLoader         (see font.rs)
//
// Paths are resolved against an asset root; a leading '/' is treated as
// root-relative the way a web page resolves "/textures/...".
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use glam::Vec2;
use log::{debug, info, warn};
use thiserror::Error;

//=== TextureError ========================================================

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cube map face {index} is {width}x{height}, expected {expected}x{expected}")]
    CubeFaceMismatch {
        index: usize,
        width: u32,
        height: u32,
        expected: u32,
    },

    #[error("pixel buffer of {len} bytes does not match {width}x{height} RGBA")]
    BadPixelBuffer { width: u32, height: u32, len: usize },
}

//=== Sampling Settings ===================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    #[default]
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    Linear,
    LinearMipmapLinear,
}

impl Filter {
    pub fn uses_mipmaps(self) -> bool {
        matches!(self, Self::LinearMipmapLinear)
    }
}

//=== Texture =============================================================

/// Decoded RGBA8 image plus sampling settings.
#[derive(Debug, Clone)]
pub struct Texture {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pixels: Arc<Vec<u8>>,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub repeat: Vec2,
    pub mag_filter: Filter,
    pub min_filter: Filter,
    pub generate_mipmaps: bool,
}

/// Shared, immutable texture referenced by materials.
pub type TextureHandle = Arc<Texture>;

impl Texture {
    pub fn from_rgba(
        name: impl Into<String>,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, TextureError> {
        if pixels.len() != (width as usize) * (height as usize) * 4 {
            return Err(TextureError::BadPixelBuffer { width, height, len: pixels.len() });
        }
        Ok(Self {
            name: name.into(),
            width,
            height,
            pixels: Arc::new(pixels),
            wrap_s: WrapMode::ClampToEdge,
            wrap_t: WrapMode::ClampToEdge,
            repeat: Vec2::ONE,
            mag_filter: Filter::Linear,
            min_filter: Filter::LinearMipmapLinear,
            generate_mipmaps: true,
        })
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Tiles the texture `x` by `y` times with repeat wrapping on both axes.
    pub fn set_repeat(&mut self, x: f32, y: f32) {
        self.repeat = Vec2::new(x, y);
        self.wrap_s = WrapMode::Repeat;
        self.wrap_t = WrapMode::Repeat;
    }

    pub fn is_power_of_two(&self) -> bool {
        self.width.is_power_of_two() && self.height.is_power_of_two()
    }

    /// Levels in the mip chain the backend should build (1 = base only).
    pub fn mip_levels(&self) -> u32 {
        if !self.generate_mipmaps || !self.min_filter.uses_mipmaps() || !self.is_power_of_two() {
            return 1;
        }
        32 - self.width.max(self.height).leading_zeros()
    }

    /// Wraps the texture for sharing between materials.
    pub fn into_handle(self) -> TextureHandle {
        if self.generate_mipmaps && self.min_filter.uses_mipmaps() && !self.is_power_of_two() {
            warn!(
                "Texture {} is {}x{}, mipmaps need power-of-two sizes; sampling base level only",
                self.name, self.width, self.height
            );
        }
        Arc::new(self)
    }
}

//=== CubeTexture =========================================================

/// Six square faces in +x, -x, +y, -y, +z, -z order.
#[derive(Debug, Clone)]
pub struct CubeTexture {
    pub faces: Vec<TextureHandle>,
    pub size: u32,
}

pub type CubeTextureHandle = Arc<CubeTexture>;

//=== LoadingManager ======================================================

#[derive(Debug, Default)]
struct LoadCounters {
    started: AtomicUsize,
    loaded: AtomicUsize,
    failed: AtomicUsize,
}

/// Counts asset loads across loaders and logs start/progress/completion.
#[derive(Debug, Clone, Default)]
pub struct LoadingManager {
    counters: Arc<LoadCounters>,
}

impl LoadingManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn item_start(&self, url: &str) {
        let previous = self.counters.started.fetch_add(1, Ordering::Relaxed);
        if previous == self.finished() {
            info!("Loading started: {}", url);
        }
    }

    pub(crate) fn item_end(&self, url: &str) {
        let loaded = self.counters.loaded.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("Loading in progress: {} ({}/{})", url, loaded, self.started());
        self.report_if_idle();
    }

    pub(crate) fn item_error(&self, url: &str) {
        self.counters.failed.fetch_add(1, Ordering::Relaxed);
        warn!("Failed to load {}", url);
        self.report_if_idle();
    }

    fn report_if_idle(&self) {
        if self.is_idle() {
            info!(
                "All assets loaded ({} ok, {} failed)",
                self.loaded(),
                self.failed()
            );
        }
    }

    fn finished(&self) -> usize {
        self.loaded() + self.failed()
    }

    pub fn started(&self) -> usize {
        self.counters.started.load(Ordering::Relaxed)
    }

    pub fn loaded(&self) -> usize {
        self.counters.loaded.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> usize {
        self.counters.failed.load(Ordering::Relaxed)
    }

    /// No load in flight.
    pub fn is_idle(&self) -> bool {
        self.finished() >= self.started()
    }
}

//=== Path Resolution =====================================================

pub(crate) fn resolve(root: &Path, url: &str) -> PathBuf {
    root.join(url.trim().trim_start_matches('/'))
}

//=== TextureLoader =======================================================

#[derive(Debug, Clone)]
pub struct TextureLoader {
    root: PathBuf,
    manager: LoadingManager,
}

impl TextureLoader {
    pub fn new(root: impl Into<PathBuf>, manager: LoadingManager) -> Self {
        Self { root: root.into(), manager }
    }

    pub fn load(&self, url: &str) -> Result<Texture, TextureError> {
        self.manager.item_start(url);
        match self.decode(url) {
            Ok(texture) => {
                self.manager.item_end(url);
                Ok(texture)
            }
            Err(e) => {
                self.manager.item_error(url);
                Err(e)
            }
        }
    }

    /// Loads, applies `configure`, and shares the texture. Failures are
    /// logged and yield `None`, leaving the material slot empty.
    pub fn load_with(&self, url: &str, configure: impl FnOnce(&mut Texture)) -> Option<TextureHandle> {
        match self.load(url) {
            Ok(mut texture) => {
                configure(&mut texture);
                Some(texture.into_handle())
            }
            Err(e) => {
                warn!("Texture {} unavailable: {}", url, e);
                None
            }
        }
    }

    pub fn load_optional(&self, url: &str) -> Option<TextureHandle> {
        self.load_with(url, |_| {})
    }

    pub fn manager(&self) -> &LoadingManager {
        &self.manager
    }

    fn decode(&self, url: &str) -> Result<Texture, TextureError> {
        let path = resolve(&self.root, url);
        let image = image::open(&path)
            .map_err(|source| TextureError::Decode { path: path.clone(), source })?
            .to_rgba8();
        let (width, height) = image.dimensions();
        Texture::from_rgba(url, width, height, image.into_raw())
    }
}

//=== CubeTextureLoader ===================================================

#[derive(Debug, Clone)]
pub struct CubeTextureLoader {
    inner: TextureLoader,
}

impl CubeTextureLoader {
    pub fn new(root: impl Into<PathBuf>, manager: LoadingManager) -> Self {
        Self { inner: TextureLoader::new(root, manager) }
    }

    /// Loads six faces; all must be square and the same size.
    pub fn load(&self, urls: [&str; 6]) -> Result<CubeTexture, TextureError> {
        let mut faces = Vec::with_capacity(6);
        let mut size = None;

        for (index, url) in urls.iter().enumerate() {
            let mut face = self.inner.load(url)?;
            face.generate_mipmaps = false;
            face.min_filter = Filter::Linear;

            let expected = *size.get_or_insert(face.width);
            if face.width != expected || face.height != expected {
                return Err(TextureError::CubeFaceMismatch {
                    index,
                    width: face.width,
                    height: face.height,
                    expected,
                });
            }
            faces.push(Arc::new(face));
        }

        Ok(CubeTexture { faces, size: size.unwrap_or(0) })
    }

    pub fn load_optional(&self, urls: [&str; 6]) -> Option<CubeTextureHandle> {
        match self.load(urls) {
            Ok(cube) => Some(Arc::new(cube)),
            Err(e) => {
                warn!("Environment map unavailable: {}", e);
                None
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
