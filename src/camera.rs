use cgmath::{Deg, InnerSpace, Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    Overview,
    Focus,
}

/// Flat record of numeric camera parameters for the two named states plus
/// the shared orbit radius and transition timing. Owned by the document and
/// history-tracked alongside slides/sections.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraConfig {
    pub radius: f32,

    // overview mode
    pub overview_distance: f32,
    pub overview_height: f32,
    pub overview_look_at_y: f32,
    pub overview_fov: f32,
    pub overview_angle: f32,

    // focus mode
    pub focus_distance: f32,
    pub focus_height: f32,
    pub focus_look_at_y: f32,
    pub focus_fov: f32,
    pub focus_angle: f32,

    // animation
    pub transition_duration: f32,
    pub transition_tension: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            radius: 8.0,

            overview_distance: 16.0,
            overview_height: 1.5,
            overview_look_at_y: 0.0,
            overview_fov: 45.0,
            overview_angle: 0.0,

            focus_distance: 5.5,
            focus_height: 0.0,
            focus_look_at_y: -0.9,
            focus_fov: 45.0,
            focus_angle: 0.0,

            transition_duration: 1.2,
            transition_tension: 0.5,
        }
    }
}

impl CameraConfig {
    /// Merge a saved JSON value over the defaults. Unknown or missing
    /// numeric fields fall back to defaults. Two field names changed in a
    /// prior release and are migrated here with a fallback chain:
    /// `overviewDistance` <- `distance`, `overviewHeight` <- `height`.
    pub fn from_saved_value(saved: &Value) -> Self {
        let defaults = CameraConfig::default();

        let num = |key: &str| saved.get(key).and_then(Value::as_f64).map(|v| v as f32);

        Self {
            radius: num("radius").unwrap_or(defaults.radius),

            overview_distance: num("overviewDistance")
                .or_else(|| num("distance"))
                .unwrap_or(defaults.overview_distance),
            overview_height: num("overviewHeight")
                .or_else(|| num("height"))
                .unwrap_or(defaults.overview_height),
            overview_look_at_y: num("overviewLookAtY").unwrap_or(defaults.overview_look_at_y),
            overview_fov: num("overviewFov").unwrap_or(defaults.overview_fov),
            overview_angle: num("overviewAngle").unwrap_or(defaults.overview_angle),

            focus_distance: num("focusDistance").unwrap_or(defaults.focus_distance),
            focus_height: num("focusHeight").unwrap_or(defaults.focus_height),
            focus_look_at_y: num("focusLookAtY").unwrap_or(defaults.focus_look_at_y),
            focus_fov: num("focusFov").unwrap_or(defaults.focus_fov),
            focus_angle: num("focusAngle").unwrap_or(defaults.focus_angle),

            transition_duration: num("transitionDuration").unwrap_or(defaults.transition_duration),
            transition_tension: num("transitionTension").unwrap_or(defaults.transition_tension),
        }
    }
}

/// Partial update for the camera settings panel: set fields overwrite.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct CameraConfigPatch {
    pub radius: Option<f32>,
    pub overview_distance: Option<f32>,
    pub overview_height: Option<f32>,
    pub overview_look_at_y: Option<f32>,
    pub overview_fov: Option<f32>,
    pub overview_angle: Option<f32>,
    pub focus_distance: Option<f32>,
    pub focus_height: Option<f32>,
    pub focus_look_at_y: Option<f32>,
    pub focus_fov: Option<f32>,
    pub focus_angle: Option<f32>,
    pub transition_duration: Option<f32>,
    pub transition_tension: Option<f32>,
}

impl CameraConfigPatch {
    pub fn apply(&self, config: &mut CameraConfig) {
        if let Some(v) = self.radius {
            config.radius = v;
        }
        if let Some(v) = self.overview_distance {
            config.overview_distance = v;
        }
        if let Some(v) = self.overview_height {
            config.overview_height = v;
        }
        if let Some(v) = self.overview_look_at_y {
            config.overview_look_at_y = v;
        }
        if let Some(v) = self.overview_fov {
            config.overview_fov = v;
        }
        if let Some(v) = self.overview_angle {
            config.overview_angle = v;
        }
        if let Some(v) = self.focus_distance {
            config.focus_distance = v;
        }
        if let Some(v) = self.focus_height {
            config.focus_height = v;
        }
        if let Some(v) = self.focus_look_at_y {
            config.focus_look_at_y = v;
        }
        if let Some(v) = self.focus_fov {
            config.focus_fov = v;
        }
        if let Some(v) = self.focus_angle {
            config.focus_angle = v;
        }
        if let Some(v) = self.transition_duration {
            config.transition_duration = v;
        }
        if let Some(v) = self.transition_tension {
            config.transition_tension = v;
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CameraPose {
    pub position: Vector3<f32>,
    pub look_at: Vector3<f32>,
    pub fov: f32,
}

/// Virtual camera interpolated every frame toward the pose selected by
/// `{mode, config, transitioning}`. The transition pose overrides mode so
/// the cinematic push-in looks the same whichever state it starts from.
pub struct CameraRig {
    pub position: Vector3<f32>,
    pub look_at: Vector3<f32>,
    pub fov: f32,

    viewport_width: f32,
    viewport_height: f32,
    elapsed: f32,
}

impl CameraRig {
    pub fn new(config: &CameraConfig) -> Self {
        let mut rig = Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            look_at: Vector3::new(0.0, 0.0, 0.0),
            fov: config.overview_fov,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            elapsed: 0.0,
        };
        let start = rig.target_pose(CameraMode::Overview, config, false);
        rig.position = start.position;
        rig.look_at = start.look_at;
        rig.fov = start.fov;
        rig
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    fn is_portrait(&self) -> bool {
        self.viewport_width < self.viewport_height
    }

    /// Pose the rig is currently approaching. Pure in its inputs, so the
    /// selection logic is testable without stepping frames.
    pub fn target_pose(
        &self,
        mode: CameraMode,
        config: &CameraConfig,
        transitioning: bool,
    ) -> CameraPose {
        if transitioning {
            return CameraPose {
                position: Vector3::new(0.0, config.focus_height, config.radius + 2.0),
                look_at: Vector3::new(0.0, 0.0, config.radius),
                fov: config.focus_fov,
            };
        }

        match mode {
            CameraMode::Overview => {
                let angle_rad = config.overview_angle.to_radians();
                let dist = if self.is_portrait() {
                    config.overview_distance * 1.5
                } else {
                    config.overview_distance
                };
                CameraPose {
                    position: Vector3::new(
                        angle_rad.sin() * dist,
                        config.overview_height,
                        angle_rad.cos() * dist,
                    ),
                    look_at: Vector3::new(0.0, config.overview_look_at_y, 0.0),
                    fov: config.overview_fov,
                }
            }
            CameraMode::Focus => {
                let angle_rad = config.focus_angle.to_radians();
                // default substitution for documents saved before this field existed
                let dist = if config.focus_distance > 0.0 {
                    config.focus_distance
                } else {
                    5.5
                };
                let dist = if self.is_portrait() { dist + 4.0 } else { dist };
                CameraPose {
                    position: Vector3::new(
                        angle_rad.sin() * dist,
                        config.focus_height,
                        config.radius + angle_rad.cos() * dist,
                    ),
                    look_at: Vector3::new(0.0, config.focus_look_at_y, config.radius),
                    fov: config.focus_fov,
                }
            }
        }
    }

    /// Per-frame step: exponential approach of position, fov, and look-at
    /// toward the selected pose, plus a low-frequency handheld wobble in
    /// focus mode.
    pub fn update(
        &mut self,
        mode: CameraMode,
        config: &CameraConfig,
        transitioning: bool,
        dt: f32,
    ) {
        self.elapsed += dt;

        let target = self.target_pose(mode, config, transitioning);

        let duration = if config.transition_duration > 0.0 {
            config.transition_duration
        } else {
            1.5
        };
        let base_speed = 4.0 / duration;
        let speed = if transitioning {
            base_speed * 2.0
        } else {
            base_speed
        };

        let t = (dt * speed).min(1.0);
        self.position += (target.position - self.position) * t;
        self.fov += (target.fov - self.fov) * t;

        // look-at trails slightly faster so pans feel anchored
        let look_t = (dt * (speed + 0.5)).min(1.0);
        self.look_at += (target.look_at - self.look_at) * look_t;

        if mode == CameraMode::Focus && !transitioning {
            self.position.y += (self.elapsed * 0.5).sin() * 0.002;
            self.position.x += (self.elapsed * 0.3).cos() * 0.002;
        }
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            look_at: self.look_at,
            fov: self.fov,
        }
    }

    /// View-projection matrix for the GPU camera binding.
    pub fn view_projection(&self) -> Matrix4<f32> {
        let aspect = self.viewport_width / self.viewport_height;
        let projection = cgmath::perspective(Deg(self.fov), aspect, 0.1, 200.0);

        let eye = Point3::new(self.position.x, self.position.y, self.position.z);
        let center = Point3::new(self.look_at.x, self.look_at.y, self.look_at.z);
        // degenerate before the first update settles; identity view is fine
        let view = if (self.position - self.look_at).magnitude() > f32::EPSILON {
            Matrix4::look_at_rh(eye, center, Vector3::unit_y())
        } else {
            Matrix4::from_scale(1.0)
        };

        projection * view
    }
}
