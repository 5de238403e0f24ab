use glam::{Vec2, vec2};

/// Depth-buffer units per grid cell. Every caster writes camera-space
/// forward depth in these units, so walls, flats and sprites compare
/// directly.
pub const DEPTH_UNITS_PER_CELL: f32 = 16.0;

/// Bob amplitude while walking, in depth units. Running doubles it.
const BOB_AMPLITUDE: f32 = 0.8;

/// Bob phase advances by this much per tic; the sine runs at `phase / 6`.
const BOB_PERIOD: f32 = 6.0;

/// Player view-point for one frame.
///
/// * `x`, `z` are ground-plane cell coordinates (`x` = column, `z` = row).
/// * `y` lifts the eye above its resting height (0.5 cells), in cells.
/// * Only **yaw** is simulated; the view never pitches.
///
/// Built by the input side once per tic and read-only while rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraState {
    pub x: f32,
    pub z: f32,
    pub y: f32,
    /// Radians; 0 looks along `+z`, positive turns toward `+x`.
    pub yaw: f32,
    /// Walk animation counter, advanced by [`CameraState::tick`].
    pub bob_phase: f32,
    pub walking: bool,
    pub running: bool,
}

impl CameraState {
    pub fn new(x: f32, z: f32, yaw: f32) -> Self {
        Self {
            x,
            z,
            yaw,
            ..Self::default()
        }
    }

    /// Ground-plane position.
    #[inline]
    pub fn pos(&self) -> Vec2 {
        vec2(self.x, self.z)
    }

    /// Transform a ground-plane point `p` into camera-local coords:
    ///  .x = lateral offset (+ right)
    ///  .y = depth along forward axis
    #[inline]
    pub fn to_cam(&self, p: Vec2) -> Vec2 {
        let d = p - self.pos();
        vec2(d.dot(self.right()), d.dot(self.forward()))
    }

    /// Inverse of [`CameraState::to_cam`].
    #[inline]
    pub fn to_world(&self, lateral: f32, depth: f32) -> Vec2 {
        self.pos() + self.right() * lateral + self.forward() * depth
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks on the ground plane.
    #[inline(always)]
    pub fn forward(&self) -> Vec2 {
        let (s, c) = self.yaw.sin_cos();
        vec2(s, c)
    }

    /// Unit vector pointing to the camera's right on the ground plane.
    #[inline(always)]
    pub fn right(&self) -> Vec2 {
        let (s, c) = self.yaw.sin_cos();
        vec2(-c, s)
    }

    /// Vertical walk-cycle displacement in depth units.
    pub fn bob(&self) -> f32 {
        let amplitude = if self.running {
            BOB_AMPLITUDE * 2.0
        } else if self.walking {
            BOB_AMPLITUDE
        } else {
            return 0.0;
        };
        (self.bob_phase / BOB_PERIOD).sin() * amplitude
    }

    /// Eye offset from its resting height (half a cell), in depth units.
    /// Positive moves the eye toward the ceiling.
    #[inline]
    pub fn lift(&self) -> f32 {
        self.y * DEPTH_UNITS_PER_CELL + self.bob()
    }

    /// Absolute eye elevation above the floor, in cells.
    #[inline]
    pub fn eye(&self) -> f32 {
        0.5 + self.lift() / DEPTH_UNITS_PER_CELL
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Move by `forward` cells and `side` (strafe, + right).
    pub fn step(&mut self, forward: f32, side: f32) {
        let p = self.pos() + self.forward() * forward + self.right() * side;
        self.x = p.x;
        self.z = p.y;
    }

    /// Rotate around the vertical axis (positive = turn right).
    pub fn turn(&mut self, delta_yaw: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
    }

    /// Advance the walk animation by one tic. Standing still holds the phase.
    pub fn tick(&mut self) {
        if self.running {
            self.bob_phase += 2.0;
        } else if self.walking {
            self.bob_phase += 1.0;
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn forward_and_right_are_orthonormal() {
        let cam = CameraState::new(0.0, 0.0, 0.3);
        let f = cam.forward();
        let r = cam.right();
        assert!((f.length() - 1.0).abs() < 1e-5);
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!((f.dot(r)).abs() < 1e-5);
    }

    #[test]
    fn to_cam_axes_align() {
        let cam = CameraState::new(0.0, 0.0, 0.0);
        // Point straight ahead at z = 10 → (lateral=0, forward=10)
        assert!((cam.to_cam(vec2(0.0, 10.0)) - vec2(0.0, 10.0)).length() < 1e-5);
        // Facing +z (south on the map) the right hand points to -x.
        assert!((cam.to_cam(vec2(-5.0, 0.0)) - vec2(5.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn to_cam_rotated_yaw() {
        let cam = CameraState::new(1.0, 1.0, FRAC_PI_2);
        // Yaw = 90°: forward is +x.
        assert!((cam.to_cam(vec2(11.0, 1.0)) - vec2(0.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn to_world_inverts_to_cam() {
        let cam = CameraState::new(3.5, -2.0, 1.1);
        let p = vec2(7.25, 4.5);
        let c = cam.to_cam(p);
        assert!((cam.to_world(c.x, c.y) - p).length() < 1e-4);
    }

    #[test]
    fn bob_depends_on_gait() {
        let mut cam = CameraState::new(0.0, 0.0, 0.0);
        cam.bob_phase = 9.0;
        assert_eq!(cam.bob(), 0.0);

        cam.walking = true;
        let walk = cam.bob();
        assert!((walk - 0.8 * (1.5f32).sin()).abs() < 1e-6);

        cam.running = true;
        assert!((cam.bob() - walk * 2.0).abs() < 1e-6);
    }

    #[test]
    fn tick_holds_phase_when_standing() {
        let mut cam = CameraState::default();
        cam.tick();
        assert_eq!(cam.bob_phase, 0.0);
        cam.walking = true;
        cam.tick();
        assert_eq!(cam.bob_phase, 1.0);
    }

    #[test]
    fn step_moves_along_heading() {
        let mut cam = CameraState::new(0.0, 0.0, FRAC_PI_2);
        cam.step(2.0, 0.0);
        assert!((cam.pos() - vec2(2.0, 0.0)).length() < 1e-5);
        cam.step(0.0, 1.0);
        assert!((cam.pos() - vec2(2.0, 1.0)).length() < 1e-5);
    }
}
