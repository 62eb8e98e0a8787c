//! Ready-made looping scenes. Each preset captures a complete recipe:
//! curve, stroke randomization bounds, material flags, camera, clear
//! color, and painterly threshold.

use std::f64::consts::TAU;

use rand::Rng;

use crate::{
    animation::LoopAnimation,
    bridge::{CameraRig, RenderBridge, RibbonMaterial, SceneSettings},
    core::{Canvas, Vec3},
    curve::CurveKind,
    ensemble::{EnsembleConfig, StrokeEnsemble},
    error::KnotloopResult,
    palette::{ColorMode, GradientLinear, Rgb},
    sampler::Direction,
};

/// Everything needed to instantiate one looping animation.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LoopPreset {
    pub ensemble: EnsembleConfig,
    pub scene: SceneSettings,
    pub camera: CameraRig,
}

impl LoopPreset {
    /// Builds the animation, registering one ribbon per stroke with `bridge`.
    pub fn build<R: Rng>(
        &self,
        rng: &mut R,
        bridge: &mut dyn RenderBridge,
    ) -> KnotloopResult<LoopAnimation> {
        let surface = self.ensemble.material.resolution;
        let ensemble = StrokeEnsemble::build(&self.ensemble, rng, bridge)?;
        Ok(LoopAnimation::new(ensemble, self.scene, self.camera, surface))
    }
}

const GRANNY_GRADIENT: [&str; 6] = [
    "#296888", "#C39B4B", "#A24218", "#FCFCFB", "#093588", "#ffffff",
];

const TORUS_PALETTE: [&str; 7] = [
    "#FFFFFF", "#B9131E", "#FF1F54", "#34373C", "#9C9092", "#FE5587", "#0FB3BF",
];

const SURFACE: Canvas = Canvas {
    width: 1080,
    height: 1080,
};

/// Ten wide brush strokes sweeping a granny knot in reverse, colored along
/// a six-stop gradient. Depth testing is off so the strokes layer like
/// translucent paint.
pub fn granny_brush() -> KnotloopResult<LoopPreset> {
    Ok(LoopPreset {
        ensemble: EnsembleConfig {
            curve: CurveKind::GrannyKnot,
            stroke_count: 10,
            point_count: 50,
            spread: 0.5,
            width_scale: 2.0,
            width_range: [0.8, 1.2],
            radius_scale: 0.05,
            radius_range: [4.5, 5.5],
            offset_max: 0.01 * TAU,
            range_base: 1.0,
            range_jitter: 0.01 * TAU,
            direction: Direction::Reverse,
            spin: false,
            colors: ColorMode::Gradient(GradientLinear::from_hex(&GRANNY_GRADIENT)?),
            material: RibbonMaterial {
                texture: Some("PaintBrushStroke05.png".to_string()),
                opacity: 0.85,
                alpha_test: None,
                depth_test: false,
                depth_write: false,
                transparent: true,
                resolution: SURFACE,
                near: 0.1,
                far: 100.0,
            },
            loop_secs: 4.0,
        },
        scene: SceneSettings {
            clear_color: Rgb::from_hex("#04031c")?,
            group_scale: 0.5,
            painted_min_level: -0.5,
        },
        camera: CameraRig {
            position: Vec3::new(0.5, 15.5, -6.7),
            look_at: Vec3::ZERO,
            near: 0.1,
            far: 100.0,
        },
    })
}

/// Eighty thin strokes flowing along a (3,4) torus knot while the whole
/// ensemble spins one turn per loop. Discrete palette, depth-tested ribbons
/// with an alpha cutoff.
pub fn torus_flow() -> KnotloopResult<LoopPreset> {
    let palette = TORUS_PALETTE
        .iter()
        .map(|s| Rgb::from_hex(s))
        .collect::<KnotloopResult<Vec<_>>>()?;

    Ok(LoopPreset {
        ensemble: EnsembleConfig {
            curve: CurveKind::TorusKnot,
            stroke_count: 80,
            point_count: 200,
            spread: 1.0,
            width_scale: 1.0,
            width_range: [0.8, 1.2],
            radius_scale: 0.05,
            radius_range: [4.5, 5.5],
            offset_max: TAU / 3.0,
            range_base: TAU / 8.0,
            range_jitter: 0.0,
            direction: Direction::Forward,
            spin: true,
            colors: ColorMode::Indexed(palette),
            material: RibbonMaterial {
                texture: Some("stroke.png".to_string()),
                opacity: 0.85,
                alpha_test: Some(0.85 * 0.5),
                depth_test: true,
                depth_write: true,
                transparent: true,
                resolution: SURFACE,
                near: 0.1,
                far: 100.0,
            },
            loop_secs: 4.0,
        },
        scene: SceneSettings {
            clear_color: Rgb::from_hex("#c6e0e4")?,
            group_scale: 0.75,
            painted_min_level: -0.4,
        },
        camera: CameraRig {
            position: Vec3::new(5.0, -2.5, -26.0),
            look_at: Vec3::ZERO,
            near: 0.1,
            far: 100.0,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_pass_validation() {
        for preset in [granny_brush().unwrap(), torus_flow().unwrap()] {
            assert!(preset.ensemble.validate().is_ok());
        }
    }

    #[test]
    fn presets_wind_opposite_directions() {
        assert_eq!(
            granny_brush().unwrap().ensemble.direction,
            Direction::Reverse
        );
        assert_eq!(torus_flow().unwrap().ensemble.direction, Direction::Forward);
        assert!(!granny_brush().unwrap().ensemble.spin);
        assert!(torus_flow().unwrap().ensemble.spin);
    }

    #[test]
    fn torus_palette_has_seven_colors() {
        let preset = torus_flow().unwrap();
        match &preset.ensemble.colors {
            ColorMode::Indexed(palette) => assert_eq!(palette.len(), 7),
            other => panic!("expected indexed palette, got {other:?}"),
        }
    }
}
