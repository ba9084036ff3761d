use std::f32::consts::TAU;

use crate::camera::CameraMode;

/// rad of ring rotation per pixel of horizontal drag
pub const DRAG_SENSITIVITY: f32 = 0.003;
/// how far a release keeps coasting, in frames of the last drag delta
pub const DRAG_INERTIA: f32 = 30.0;
/// exponential settle rate toward the target rotation
pub const SETTLE_STIFFNESS: f32 = 6.0;
/// tighter snap while the cinematic hand-off runs, so the active card is
/// centered before the mode switch completes
pub const TRANSITION_STIFFNESS: f32 = 10.0;
/// wheel deltas at or below this are trackpad jitter, not intent
pub const WHEEL_DEAD_ZONE: f32 = 10.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// What a double-click on card `index` should do, given the current mode.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CarouselAction {
    None,
    /// A non-active card was double-clicked: make it active.
    Activate(usize),
    /// The active card was double-clicked in overview: move the camera in.
    EnterFocus,
    /// The active card was double-clicked in focus: begin the cinematic
    /// hand-off into presentation mode.
    BeginPresentation,
}

/// Position of a card on the ring.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CardPlacement {
    pub x: f32,
    pub z: f32,
    /// facing angle around Y, so the card looks outward
    pub angle: f32,
}

/// Per-mounted-view interaction state for the rotating ring. Ephemeral:
/// rebuilt on mount, never persisted. Pointer events mutate it
/// synchronously; the per-frame `step` reads it on the same thread, with
/// `is_dragging` guarding against fighting the user's direct manipulation.
#[derive(Clone, Debug)]
pub struct CarouselState {
    pub rotation: f32,
    pub target_rotation: f32,
    pub velocity: f32,
    pub is_dragging: bool,

    pub start_x: f32,
    pub last_x: f32,

    count: usize,
    angle_per_slide: f32,
}

impl CarouselState {
    pub fn new(count: usize, active_index: usize) -> Self {
        let count = count.max(1);
        let angle_per_slide = TAU / count as f32;
        let rotation = -(active_index as f32) * angle_per_slide;
        Self {
            rotation,
            target_rotation: rotation,
            velocity: 0.0,
            is_dragging: false,
            start_x: 0.0,
            last_x: 0.0,
            count,
            angle_per_slide,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn angle_per_slide(&self) -> f32 {
        self.angle_per_slide
    }

    /// Primary-button press begins a drag; everything else is ignored. All
    /// gestures are suppressed while the cinematic transition runs.
    pub fn pointer_down(&mut self, button: PointerButton, x: f32, transitioning: bool) {
        if transitioning || button != PointerButton::Primary {
            return;
        }
        self.is_dragging = true;
        self.start_x = x;
        self.last_x = x;
        self.velocity = 0.0;
    }

    pub fn pointer_move(&mut self, x: f32, transitioning: bool) {
        if transitioning || !self.is_dragging {
            return;
        }
        let delta_x = x - self.last_x;
        self.last_x = x;
        let rot_delta = delta_x * DRAG_SENSITIVITY;
        self.rotation += rot_delta;
        self.velocity = rot_delta;
    }

    /// Release: predict where inertia would land the ring, snap the target
    /// to the nearest card, and return that card's (wrapped) index as the
    /// new active slide.
    pub fn pointer_up(&mut self, transitioning: bool) -> Option<usize> {
        if transitioning || !self.is_dragging {
            return None;
        }
        self.is_dragging = false;

        let predicted_end = self.rotation + self.velocity * DRAG_INERTIA;
        let virtual_index = -predicted_end / self.angle_per_slide;
        let rounded = virtual_index.round() as i64;
        self.target_rotation = -(rounded as f32) * self.angle_per_slide;

        let normalized = rounded.rem_euclid(self.count as i64) as usize;
        Some(normalized)
    }

    /// Per-frame settle toward the target. Skipped mid-drag so the ring
    /// tracks the pointer directly.
    pub fn step(&mut self, dt: f32, transitioning: bool) {
        if self.is_dragging {
            return;
        }
        let stiffness = if transitioning {
            TRANSITION_STIFFNESS
        } else {
            SETTLE_STIFFNESS
        };
        let dist = self.target_rotation - self.rotation;
        self.rotation += dist * (dt * stiffness).min(1.0);
    }

    /// External navigation (sidebar, keyboard) changed the active index.
    /// Choose the full-turn offset nearest the current rotation so the ring
    /// never visibly spins more than one revolution to get there.
    pub fn sync_to_index(&mut self, index: usize, transitioning: bool) {
        if self.is_dragging || transitioning {
            return;
        }
        let virtual_index = -self.rotation / self.angle_per_slide;
        let n = ((virtual_index - index as f32) / self.count as f32).round();
        let best_k = index as f32 + n * self.count as f32;
        self.target_rotation = -best_k * self.angle_per_slide;
    }

    /// Wheel toggles the camera between overview and focus, with a dead
    /// zone against trackpad jitter. Returns the mode to switch to, if any.
    pub fn handle_wheel(
        &self,
        delta_y: f32,
        camera_mode: CameraMode,
        transitioning: bool,
    ) -> Option<CameraMode> {
        if transitioning || delta_y.abs() <= WHEEL_DEAD_ZONE {
            return None;
        }
        if delta_y > 0.0 && camera_mode == CameraMode::Overview {
            Some(CameraMode::Focus)
        } else if delta_y < 0.0 && camera_mode == CameraMode::Focus {
            Some(CameraMode::Overview)
        } else {
            None
        }
    }

    pub fn handle_double_click(
        &self,
        index: usize,
        active_index: usize,
        camera_mode: CameraMode,
        transitioning: bool,
    ) -> CarouselAction {
        if transitioning {
            return CarouselAction::None;
        }
        if index != active_index {
            return CarouselAction::Activate(index);
        }
        match camera_mode {
            CameraMode::Overview => CarouselAction::EnterFocus,
            CameraMode::Focus => CarouselAction::BeginPresentation,
        }
    }

    pub fn card_placement(&self, index: usize, radius: f32) -> CardPlacement {
        let angle = index as f32 * self.angle_per_slide;
        CardPlacement {
            x: angle.sin() * radius,
            z: angle.cos() * radius,
            angle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn settle(state: &mut CarouselState) {
        for _ in 0..1000 {
            state.step(DT, false);
        }
    }

    #[test]
    fn test_initial_rotation_centers_active_slide() {
        let state = CarouselState::new(8, 3);
        assert_eq!(state.rotation, -3.0 * state.angle_per_slide());
        assert_eq!(state.rotation, state.target_rotation);
    }

    #[test]
    fn test_drag_settles_on_predicted_index() {
        let n = 8;
        let mut state = CarouselState::new(n, 0);

        state.pointer_down(PointerButton::Primary, 100.0, false);
        state.pointer_move(60.0, false);
        state.pointer_move(20.0, false);
        let rotation = state.rotation;
        let velocity = state.velocity;

        let index = state.pointer_up(false).unwrap();

        let predicted = rotation + velocity * DRAG_INERTIA;
        let expected_rounded = (-predicted / state.angle_per_slide()).round() as i64;
        let expected_index = expected_rounded.rem_euclid(n as i64) as usize;

        assert_eq!(index, expected_index);
        assert_eq!(
            state.target_rotation,
            -(expected_rounded as f32) * state.angle_per_slide()
        );
    }

    #[test]
    fn test_non_primary_button_does_not_start_drag() {
        let mut state = CarouselState::new(4, 0);
        state.pointer_down(PointerButton::Secondary, 0.0, false);
        assert!(!state.is_dragging);
        assert!(state.pointer_up(false).is_none());
    }

    #[test]
    fn test_gestures_suppressed_while_transitioning() {
        let mut state = CarouselState::new(4, 0);
        state.pointer_down(PointerButton::Primary, 0.0, true);
        assert!(!state.is_dragging);

        state.pointer_down(PointerButton::Primary, 0.0, false);
        state.pointer_move(50.0, true);
        assert_eq!(state.velocity, 0.0);
    }

    #[test]
    fn test_step_is_suppressed_mid_drag() {
        let mut state = CarouselState::new(4, 0);
        state.pointer_down(PointerButton::Primary, 0.0, false);
        state.pointer_move(200.0, false);
        state.target_rotation = 5.0;
        let rotation = state.rotation;
        state.step(DT, false);
        assert_eq!(state.rotation, rotation);
    }

    #[test]
    fn test_step_converges_to_target() {
        let mut state = CarouselState::new(6, 0);
        state.sync_to_index(2, false);
        settle(&mut state);
        assert!((state.rotation - state.target_rotation).abs() < 1e-3);
    }

    #[test]
    fn test_external_navigation_takes_shortest_path() {
        let n = 8;
        for i in 0..n {
            for j in 0..n {
                let mut state = CarouselState::new(n, i);
                // simulate accumulated wraps from prior dragging
                state.rotation -= 3.0 * TAU;
                state.target_rotation = state.rotation;
                state.sync_to_index(j, false);
                assert!(
                    (state.target_rotation - state.rotation).abs() < TAU,
                    "spin from {} to {} was a full turn or more",
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn test_sync_lands_on_requested_index() {
        let n = 5;
        let mut state = CarouselState::new(n, 1);
        state.sync_to_index(4, false);
        settle(&mut state);
        let virtual_index = -state.rotation / state.angle_per_slide();
        let landed = (virtual_index.round() as i64).rem_euclid(n as i64) as usize;
        assert_eq!(landed, 4);
    }

    #[test]
    fn test_wheel_dead_zone_and_direction() {
        let state = CarouselState::new(4, 0);

        assert_eq!(state.handle_wheel(5.0, CameraMode::Overview, false), None);
        assert_eq!(state.handle_wheel(-10.0, CameraMode::Focus, false), None);

        assert_eq!(
            state.handle_wheel(40.0, CameraMode::Overview, false),
            Some(CameraMode::Focus)
        );
        assert_eq!(
            state.handle_wheel(-40.0, CameraMode::Focus, false),
            Some(CameraMode::Overview)
        );

        // scrolling further in the direction you already are is a no-op
        assert_eq!(state.handle_wheel(40.0, CameraMode::Focus, false), None);
        assert_eq!(state.handle_wheel(-40.0, CameraMode::Overview, false), None);

        assert_eq!(state.handle_wheel(40.0, CameraMode::Overview, true), None);
    }

    #[test]
    fn test_double_click_actions() {
        let state = CarouselState::new(4, 1);

        assert_eq!(
            state.handle_double_click(2, 1, CameraMode::Overview, false),
            CarouselAction::Activate(2)
        );
        assert_eq!(
            state.handle_double_click(1, 1, CameraMode::Overview, false),
            CarouselAction::EnterFocus
        );
        assert_eq!(
            state.handle_double_click(1, 1, CameraMode::Focus, false),
            CarouselAction::BeginPresentation
        );
        assert_eq!(
            state.handle_double_click(1, 1, CameraMode::Focus, true),
            CarouselAction::None
        );
    }

    #[test]
    fn test_card_placement_ring() {
        let state = CarouselState::new(4, 0);
        let radius = 8.0;

        let front = state.card_placement(0, radius);
        assert!((front.x).abs() < 1e-6);
        assert!((front.z - radius).abs() < 1e-6);

        let side = state.card_placement(1, radius);
        assert!((side.x - radius).abs() < 1e-4);
        assert!(side.z.abs() < 1e-4);
    }

    #[test]
    fn test_transition_stiffness_settles_faster() {
        let mut normal = CarouselState::new(4, 0);
        let mut cinematic = CarouselState::new(4, 0);
        normal.sync_to_index(2, false);
        cinematic.sync_to_index(2, false);

        for _ in 0..10 {
            normal.step(DT, false);
            cinematic.step(DT, true);
        }
        let normal_err = (normal.target_rotation - normal.rotation).abs();
        let cinematic_err = (cinematic.target_rotation - cinematic.rotation).abs();
        assert!(cinematic_err < normal_err);
    }
}
