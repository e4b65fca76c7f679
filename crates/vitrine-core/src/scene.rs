//! Rotating torus point cloud behind the hero copy
//!
//! A fixed sampling of a torus surface is rotated, bobbed, and perspective
//! projected every frame. Points come back split into a near and a far
//! group by depth so the renderer can shade them differently. Reduced
//! motion freezes the pose and skips per-frame work.

use std::f64::consts::PI;
use std::time::Duration;

const MAJOR_RADIUS: f64 = 1.5;
const TUBE_RADIUS: f64 = 0.4;
/// Samples around the main ring
const RING_STEPS: usize = 96;
/// Samples around the tube cross section
const TUBE_STEPS: usize = 32;

const CAMERA_DISTANCE: f64 = 5.0;
/// Vertical field of view of 45 degrees
const FOV_RADIANS: f64 = PI / 4.0;

/// Maximum pointer tilt on either axis
const TILT_RANGE: f64 = PI / 8.0;
/// Tilt smoothing factor per frame
const TILT_SMOOTHING: f64 = 0.1;

/// Frozen pose used when motion is reduced
const STATIC_PITCH: f64 = 0.5;
const STATIC_YAW: f64 = 0.35;

/// Projected points for one frame, in normalized scene coordinates
#[derive(Debug, Clone, Default)]
pub struct SceneFrame {
    /// Points on the viewer side of the ring plane
    pub near: Vec<(f64, f64)>,
    /// Points on the back side
    pub far: Vec<(f64, f64)>,
}

/// Torus scene model
#[derive(Debug, Clone)]
pub struct Scene {
    /// Unit geometry in model space, computed once
    points: Vec<[f64; 3]>,
    /// Current pointer tilt (pitch, yaw) in radians
    tilt: (f64, f64),
    tilt_target: (f64, f64),
    reduced_motion: bool,
}

impl Scene {
    pub fn new(reduced_motion: bool) -> Self {
        let mut points = Vec::with_capacity(RING_STEPS * TUBE_STEPS);
        for i in 0..RING_STEPS {
            let theta = i as f64 / RING_STEPS as f64 * std::f64::consts::TAU;
            for j in 0..TUBE_STEPS {
                let phi = j as f64 / TUBE_STEPS as f64 * std::f64::consts::TAU;
                let radial = MAJOR_RADIUS + TUBE_RADIUS * phi.cos();
                points.push([
                    radial * theta.cos(),
                    radial * theta.sin(),
                    TUBE_RADIUS * phi.sin(),
                ]);
            }
        }
        Self {
            points,
            tilt: (0.0, 0.0),
            tilt_target: (0.0, 0.0),
            reduced_motion,
        }
    }

    #[inline]
    pub fn is_animated(&self) -> bool {
        !self.reduced_motion
    }

    /// Aim the tilt at a pointer position given in normalized [-1, 1]
    /// coordinates over the scene area
    pub fn set_pointer(&mut self, nx: f64, ny: f64) {
        if self.reduced_motion {
            return;
        }
        self.tilt_target = (
            ny.clamp(-1.0, 1.0) * TILT_RANGE,
            nx.clamp(-1.0, 1.0) * TILT_RANGE,
        );
    }

    /// Let the tilt relax back to center
    pub fn clear_pointer(&mut self) {
        self.tilt_target = (0.0, 0.0);
    }

    /// Current (pitch, yaw) tilt in radians
    #[inline]
    pub fn tilt(&self) -> (f64, f64) {
        self.tilt
    }

    /// Ease the tilt toward its target. One call per frame.
    pub fn advance(&mut self) {
        if self.reduced_motion {
            return;
        }
        self.tilt.0 += (self.tilt_target.0 - self.tilt.0) * TILT_SMOOTHING;
        self.tilt.1 += (self.tilt_target.1 - self.tilt.1) * TILT_SMOOTHING;
    }

    /// Rotate, bob, and project the cloud for the given elapsed time
    pub fn frame(&self, now: Duration) -> SceneFrame {
        let t = now.as_secs_f64();
        let (pitch, yaw, bob) = if self.reduced_motion {
            (STATIC_PITCH, STATIC_YAW, 0.0)
        } else {
            (
                t * 0.15 + self.tilt.0,
                t * 0.2 + self.tilt.1,
                (t * 0.5).sin() * 0.2,
            )
        };

        let (sin_p, cos_p) = pitch.sin_cos();
        let (sin_y, cos_y) = yaw.sin_cos();
        let focal = 1.0 / (FOV_RADIANS / 2.0).tan();

        let mut out = SceneFrame {
            near: Vec::with_capacity(self.points.len() / 2),
            far: Vec::with_capacity(self.points.len() / 2),
        };
        for [x, y, z] in &self.points {
            // Pitch around x, then yaw around y
            let y1 = y * cos_p - z * sin_p;
            let z1 = y * sin_p + z * cos_p;
            let x2 = x * cos_y + z1 * sin_y;
            let z2 = -x * sin_y + z1 * cos_y;
            let y2 = y1 + bob;

            let depth = CAMERA_DISTANCE - z2;
            let px = focal * x2 / depth;
            let py = focal * y2 / depth;
            if z2 > 0.0 {
                out.near.push((px, py));
            } else {
                out.far.push((px, py));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(v: f64) -> Duration {
        Duration::from_secs_f64(v)
    }

    #[test]
    fn test_point_count_and_partition() {
        let scene = Scene::new(false);
        let frame = scene.frame(secs(1.3));
        assert_eq!(frame.near.len() + frame.far.len(), RING_STEPS * TUBE_STEPS);
        assert!(!frame.near.is_empty());
        assert!(!frame.far.is_empty());
    }

    #[test]
    fn test_projection_stays_bounded() {
        let scene = Scene::new(false);
        for step in 0..40 {
            let frame = scene.frame(secs(step as f64 * 0.7));
            for (x, y) in frame.near.iter().chain(frame.far.iter()) {
                assert!(x.abs() < 2.0, "x out of range: {}", x);
                assert!(y.abs() < 2.0, "y out of range: {}", y);
            }
        }
    }

    #[test]
    fn test_rotation_moves_points() {
        let scene = Scene::new(false);
        let a = scene.frame(secs(0.0));
        let b = scene.frame(secs(2.0));
        let moved = a
            .near
            .iter()
            .zip(b.near.iter())
            .any(|(p, q)| (p.0 - q.0).abs() > 0.01 || (p.1 - q.1).abs() > 0.01);
        assert!(moved, "cloud did not move between frames");
    }

    #[test]
    fn test_reduced_motion_is_static() {
        let mut scene = Scene::new(true);
        scene.set_pointer(1.0, 1.0);
        scene.advance();
        let a = scene.frame(secs(0.0));
        let b = scene.frame(secs(5.0));
        assert_eq!(a.near, b.near);
        assert_eq!(a.far, b.far);
        assert!(!scene.is_animated());
    }

    #[test]
    fn test_tilt_eases_toward_pointer() {
        let mut scene = Scene::new(false);
        scene.set_pointer(1.0, 0.0);
        for _ in 0..100 {
            scene.advance();
        }
        let (pitch, yaw) = scene.tilt();
        assert!(pitch.abs() < 1e-3);
        assert!((yaw - TILT_RANGE).abs() < 1e-3);

        scene.clear_pointer();
        for _ in 0..100 {
            scene.advance();
        }
        assert!(scene.tilt().1.abs() < 1e-3);
    }

    #[test]
    fn test_pointer_tilt_clamped() {
        let mut scene = Scene::new(false);
        scene.set_pointer(8.0, -8.0);
        for _ in 0..200 {
            scene.advance();
        }
        let (pitch, yaw) = scene.tilt();
        assert!((pitch + TILT_RANGE).abs() < 1e-3);
        assert!((yaw - TILT_RANGE).abs() < 1e-3);
    }
}
