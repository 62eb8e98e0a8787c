use crate::{
    bridge::{CameraRig, RenderBridge, SceneSettings},
    core::Canvas,
    ensemble::StrokeEnsemble,
    error::KnotloopResult,
};

/// A complete looping animation: a stroke ensemble plus the scene and
/// camera setup the host hands to its renderer.
pub struct LoopAnimation {
    ensemble: StrokeEnsemble,
    scene: SceneSettings,
    camera: CameraRig,
    surface: Canvas,
}

impl LoopAnimation {
    pub fn new(
        ensemble: StrokeEnsemble,
        scene: SceneSettings,
        camera: CameraRig,
        surface: Canvas,
    ) -> Self {
        Self {
            ensemble,
            scene,
            camera,
            surface,
        }
    }

    /// Loop period in seconds. The animation returns exactly to its
    /// starting configuration at this cadence.
    pub fn loop_duration(&self) -> f64 {
        self.ensemble.clock().period_secs()
    }

    /// Drawing-surface size for the host to allocate and attach.
    pub fn surface(&self) -> Canvas {
        self.surface
    }

    pub fn scene(&self) -> &SceneSettings {
        &self.scene
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn ensemble(&self) -> &StrokeEnsemble {
        &self.ensemble
    }

    pub fn ensemble_mut(&mut self) -> &mut StrokeEnsemble {
        &mut self.ensemble
    }

    /// Per-frame entry point, called by the host with the animation's fixed
    /// start time and the current time. Resamples all strokes, pushes their
    /// geometry, then asks the bridge to render the frame. Returns the loop
    /// progress used, in [0, 1).
    pub fn draw(
        &mut self,
        bridge: &mut dyn RenderBridge,
        start_millis: f64,
        now_millis: f64,
    ) -> KnotloopResult<f64> {
        let progress = self.ensemble.tick(now_millis, start_millis, bridge)?;
        bridge.render_frame(&self.scene, &self.camera)?;
        Ok(progress)
    }
}
