//! Knotloop generates seamlessly looping 3D ribbon animations.
//!
//! A fixed set of strokes trace points sampled from a closed parametric
//! knot curve, each stroke phase-offset so the ensemble forms a continuously
//! flowing pattern that returns exactly to its starting configuration after
//! a fixed loop duration.
//!
//! # Pipeline overview
//!
//! 1. **Clock**: wall-clock milliseconds -> periodic progress in [0, 1)
//!    ([`LoopClock`], floored modulo, exact at whole periods)
//! 2. **Sample**: progress -> per-stroke point buffers along a [`CurveKind`]
//!    ([`StrokeSampler`], in place, no per-frame allocation)
//! 3. **Push**: buffers -> the host's [`RenderBridge`] as width-varying,
//!    colored, textured ribbons
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: sampling is pure; randomized ensemble
//!   construction takes an injectable [`rand::Rng`].
//! - **No IO on the hot path**: the per-frame tick only mutates buffers and
//!   calls the bridge.
//!
//! Two complete presets ship in [`presets`]; see [`presets::granny_brush`]
//! and [`presets::torus_flow`].
#![forbid(unsafe_code)]

pub mod animation;
pub mod bridge;
pub mod clock;
pub mod core;
pub mod curve;
pub mod ensemble;
pub mod error;
pub mod palette;
pub mod presets;
pub mod sampler;

pub use animation::LoopAnimation;
pub use bridge::{CameraRig, RenderBridge, RibbonHandle, RibbonMaterial, RibbonStyle, SceneSettings};
pub use clock::LoopClock;
pub use crate::core::{Canvas, Mat3, Vec3, wrap_unit};
pub use curve::CurveKind;
pub use ensemble::{DegenerateSamples, EnsembleConfig, Stroke, StrokeEnsemble};
pub use error::{KnotloopError, KnotloopResult};
pub use palette::{ColorMode, GradientLinear, Rgb};
pub use presets::{LoopPreset, granny_brush, torus_flow};
pub use sampler::{Direction, StrokeSampler};
