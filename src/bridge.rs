use crate::{
    core::{Canvas, Vec3},
    error::{KnotloopError, KnotloopResult},
    palette::Rgb,
};

/// Opaque identifier for a ribbon registered with a [`RenderBridge`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RibbonHandle(pub u64);

/// Material settings shared by every stroke in an ensemble, passed through
/// to the backend unchanged.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RibbonMaterial {
    /// Stroke texture reference, resolved by the backend.
    pub texture: Option<String>,
    pub opacity: f64,
    /// Fragment alpha cutoff; `None` disables the test.
    pub alpha_test: Option<f64>,
    pub depth_test: bool,
    pub depth_write: bool,
    pub transparent: bool,
    /// Viewport size used for screen-space width computation.
    pub resolution: Canvas,
    pub near: f64,
    pub far: f64,
}

impl RibbonMaterial {
    pub fn validate(&self) -> KnotloopResult<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(KnotloopError::configuration(
                "ribbon opacity must be in [0, 1]",
            ));
        }
        if let Some(cutoff) = self.alpha_test {
            if !(0.0..=1.0).contains(&cutoff) {
                return Err(KnotloopError::configuration(
                    "ribbon alpha_test must be in [0, 1]",
                ));
            }
        }
        if self.resolution.width == 0 || self.resolution.height == 0 {
            return Err(KnotloopError::configuration(
                "ribbon resolution must be non-zero",
            ));
        }
        if !self.near.is_finite() || !self.far.is_finite() || self.near <= 0.0 {
            return Err(KnotloopError::configuration(
                "ribbon near plane must be finite and > 0",
            ));
        }
        if self.near >= self.far {
            return Err(KnotloopError::configuration(
                "ribbon near plane must be < far plane",
            ));
        }
        Ok(())
    }
}

/// Per-stroke drawing parameters handed to the backend once at registration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RibbonStyle {
    pub width: f64,
    pub color: Rgb,
    pub material: RibbonMaterial,
}

/// Camera collaborator; set once at setup, never mutated by the core.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraRig {
    pub position: Vec3,
    pub look_at: Vec3,
    pub near: f64,
    pub far: f64,
}

/// Scene-level settings consumed by the backend's frame pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneSettings {
    pub clear_color: Rgb,
    /// Uniform scale applied to the whole stroke group by the backend.
    pub group_scale: f64,
    /// Threshold of the optional painterly post-process pass.
    pub painted_min_level: f64,
}

/// Drawing seam between the sampling core and the host's renderer.
///
/// The core mutates point buffers in place and pushes them through this
/// trait; implementations turn each buffer into a width-varying, colored,
/// textured ribbon. Geometry updates for a frame always complete before
/// `render_frame` is called.
pub trait RenderBridge {
    fn create_ribbon(&mut self, points: &[Vec3], style: &RibbonStyle)
    -> KnotloopResult<RibbonHandle>;

    fn update_ribbon_geometry(
        &mut self,
        handle: RibbonHandle,
        points: &[Vec3],
    ) -> KnotloopResult<()>;

    fn render_frame(&mut self, scene: &SceneSettings, camera: &CameraRig) -> KnotloopResult<()>;
}
