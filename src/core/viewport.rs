//=========================================================================
// Viewport
//=========================================================================
//
// Drawable surface size shared by every scene.
//
// On a resize tick the orchestrator updates the viewport and publishes
// one `ViewportResized`; scenes refresh camera aspect from it and the
// renderer resizes its target.
//
//=========================================================================

/// Upper bound on device pixel ratio used for rendering.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

//=== Viewport ============================================================

/// Surface size in physical pixels plus the monitor scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub scale_factor: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale_factor: f64) -> Self {
        Self { width, height, scale_factor }
    }

    /// Width over height; 1.0 while the surface is minimized.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Scale factor capped at [`MAX_PIXEL_RATIO`].
    pub fn pixel_ratio(&self) -> f64 {
        self.scale_factor.min(MAX_PIXEL_RATIO)
    }

    /// Logical size (physical / scale factor).
    pub fn logical_size(&self) -> (f32, f32) {
        let sf = if self.scale_factor > 0.0 { self.scale_factor } else { 1.0 };
        ((self.width as f64 / sf) as f32, (self.height as f64 / sf) as f32)
    }

    /// Applies a new size; returns `false` when nothing changed.
    pub fn apply_resize(&mut self, width: u32, height: u32, scale_factor: f64) -> bool {
        let next = Self::new(width, height, scale_factor);
        if next == *self {
            return false;
        }
        *self = next;
        true
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720, 1.0)
    }
}

//=== ViewportResized =====================================================

/// Published on the message bus on the tick a resize arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportResized {
    pub viewport: Viewport,
}

//=========================================================================
// Unit Tests
//=========================================================================
