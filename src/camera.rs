//! Free-fly camera.
//!
//! The camera keeps an explicit orientation unit vector rather than
//! yaw/pitch angles: look input rotates that vector directly, pitching
//! around the axis perpendicular to (orientation, up) and yawing around the
//! world up axis. A pitch that would bring the orientation within a 5° cone
//! of either pole is rejected outright — the orientation is left unchanged —
//! which keeps the view from flipping at the vertical extremes.
//!
//! Movement is decoupled from look: forward/back travel along the full look
//! direction, strafing along `up × orientation`, and vertical movement along
//! world up. In this renderer's convention "up on screen" is the −Y world
//! direction, so ascending subtracts from Y.

use cgmath::{
    Deg, InnerSpace, Matrix4, Point3, Quaternion, Rad, Rotation, Rotation3, SquareMatrix, Vector3,
};

use crate::input::InputSnapshot;

/// Distance moved per frame for each held movement key.
const MOVE_SPEED: f32 = 0.01;
/// Scale applied to the pointer's center-relative offset to get look
/// degrees.
const MOUSE_SENSITIVITY: f32 = 100.0;
/// Half-angle of the forbidden cone around each pole.
const POLE_CONE: Deg<f32> = Deg(5.0);

/// Vertical field of view of the projection.
const FOV_Y: Deg<f32> = Deg(45.0);
/// Near clipping plane.
const Z_NEAR: f32 = 0.1;
/// Far clipping plane.
const Z_FAR: f32 = 100.0;

/// Converts cgmath's OpenGL-style clip space to wgpu's: depth is remapped
/// from [−1, 1] to [0, 1], and Y is negated to preserve the original
/// renderer's on-screen orientation (its world "top" points toward −Y).
#[rustfmt::skip]
const CLIP_CORRECTION: Matrix4<f32> = Matrix4::new(
    1.0,  0.0, 0.0, 0.0,
    0.0, -1.0, 0.0, 0.0,
    0.0,  0.0, 0.5, 0.0,
    0.0,  0.0, 0.5, 1.0,
);

/// The model/view/projection block as the vertex shader expects it at
/// group(0) binding(0).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MvpUniform {
    model: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
}

/// Camera state and derived matrices.
#[derive(Debug)]
pub struct Camera {
    /// Position in world space.
    pub position: Point3<f32>,
    /// Unit vector the camera looks along.
    pub orientation: Vector3<f32>,
    /// Fixed world up axis.
    pub up: Vector3<f32>,
    model: Matrix4<f32>,
    view: Matrix4<f32>,
    proj: Matrix4<f32>,
}

impl Camera {
    /// Creates the camera at its fixed startup pose, hovering just above
    /// the terrain surface looking along +X.
    pub fn new(aspect: f32) -> Self {
        let position = Point3::new(3.0, -2.0, -2.0);
        let orientation = Vector3::new(1.0, 0.0, 0.0);
        let up = Vector3::unit_y();
        let mut camera = Self {
            position,
            orientation,
            up,
            model: Matrix4::identity(),
            view: Matrix4::look_to_rh(position, orientation, up),
            proj: Matrix4::identity(),
        };
        camera.modify_aspect_ratio(aspect);
        camera
    }

    /// Applies one frame of input: held movement keys translate the
    /// position, the pointer's offset from the viewport center rotates the
    /// orientation, and the view matrix is refreshed.
    ///
    /// The caller must re-center the pointer after this returns; the next
    /// snapshot's look delta is measured from the center again.
    pub fn process_input(&mut self, input: &InputSnapshot, viewport: (u32, u32)) {
        if input.forward {
            self.position += self.orientation * MOVE_SPEED;
        }
        if input.backward {
            self.position += self.orientation * -MOVE_SPEED;
        }
        if input.strafe_left {
            self.position += self.up.cross(self.orientation).normalize() * MOVE_SPEED;
        }
        if input.strafe_right {
            self.position += self.up.cross(self.orientation).normalize() * -MOVE_SPEED;
        }
        if input.ascend {
            self.position += self.up * -MOVE_SPEED;
        }
        if input.descend {
            self.position += self.up * MOVE_SPEED;
        }

        let (width, height) = (viewport.0 as f32, viewport.1 as f32);
        let pitch = MOUSE_SENSITIVITY * (input.pointer.1 as f32 - height / 2.0) / height;
        let yaw = MOUSE_SENSITIVITY * (input.pointer.0 as f32 - width / 2.0) / width;

        // Pitch first, around the axis perpendicular to the look direction
        // and world up. Rejected entirely if it would enter a pole cone.
        let pitch_axis = self.orientation.cross(self.up).normalize();
        let pitched =
            Quaternion::from_axis_angle(pitch_axis, Deg(pitch)).rotate_vector(self.orientation);
        let cone = Rad::from(POLE_CONE);
        if !(pitched.angle(self.up) <= cone || pitched.angle(-self.up) <= cone) {
            self.orientation = pitched;
        }

        // Yaw is unconditional.
        self.orientation =
            Quaternion::from_axis_angle(self.up, Deg(-yaw)).rotate_vector(self.orientation);

        self.view = Matrix4::look_to_rh(self.position, self.orientation, self.up);
    }

    /// Recomputes the projection for a new surface aspect ratio. Called at
    /// startup and whenever the surface is rebuilt, never per frame.
    pub fn modify_aspect_ratio(&mut self, aspect: f32) {
        self.proj = CLIP_CORRECTION * cgmath::perspective(FOV_Y, aspect, Z_NEAR, Z_FAR);
    }

    /// Packs the current matrices for upload into a frame slot's uniform
    /// buffer.
    pub fn uniform(&self) -> MvpUniform {
        MvpUniform {
            model: self.model.into(),
            view: self.view.into(),
            proj: self.proj.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: (u32, u32) = (1000, 1000);

    /// A snapshot with no keys held and the pointer dead center, i.e. a
    /// no-op frame.
    fn centered() -> InputSnapshot {
        InputSnapshot {
            pointer: (500.0, 500.0),
            ..InputSnapshot::default()
        }
    }

    fn orientation_at_degrees_from_up(angle: Deg<f32>) -> Vector3<f32> {
        let Rad(angle) = angle.into();
        Vector3::new(angle.sin(), angle.cos(), 0.0)
    }

    #[test]
    fn forward_moves_along_the_look_direction() {
        let mut camera = Camera::new(1.0);
        let start = camera.position;
        let snapshot = InputSnapshot {
            forward: true,
            ..centered()
        };
        camera.process_input(&snapshot, VIEWPORT);
        assert!((camera.position.x - (start.x + MOVE_SPEED)).abs() < 1e-6);
        assert!((camera.position.y - start.y).abs() < 1e-6);
        assert!((camera.position.z - start.z).abs() < 1e-6);
    }

    #[test]
    fn strafe_is_perpendicular_to_the_look_direction() {
        // Looking along +X, up × orientation points along −Z.
        let mut camera = Camera::new(1.0);
        let start = camera.position;
        let snapshot = InputSnapshot {
            strafe_left: true,
            ..centered()
        };
        camera.process_input(&snapshot, VIEWPORT);
        assert!((camera.position.z - (start.z - MOVE_SPEED)).abs() < 1e-6);
        assert!((camera.position.x - start.x).abs() < 1e-6);
    }

    #[test]
    fn ascending_decreases_y() {
        // "Up on screen" is the −Y world direction.
        let mut camera = Camera::new(1.0);
        let start = camera.position;
        let snapshot = InputSnapshot {
            ascend: true,
            ..centered()
        };
        camera.process_input(&snapshot, VIEWPORT);
        assert!((camera.position.y - (start.y - MOVE_SPEED)).abs() < 1e-6);
    }

    #[test]
    fn pitch_into_the_pole_cone_is_rejected() {
        let mut camera = Camera::new(1.0);
        camera.orientation = orientation_at_degrees_from_up(POLE_CONE);
        let before = camera.orientation;

        // Pointer below center gives a positive pitch, which from this pose
        // rotates toward +up; any further pitch enters the cone.
        let snapshot = InputSnapshot {
            pointer: (500.0, 510.0),
            ..centered()
        };
        camera.process_input(&snapshot, VIEWPORT);
        assert_eq!(camera.orientation, before);
    }

    #[test]
    fn pitch_away_from_the_pole_is_applied() {
        let mut camera = Camera::new(1.0);
        camera.orientation = orientation_at_degrees_from_up(POLE_CONE);

        // Pointer above center pitches away from the pole: 1° of look for a
        // 10-pixel offset at this sensitivity and viewport.
        let snapshot = InputSnapshot {
            pointer: (500.0, 490.0),
            ..centered()
        };
        camera.process_input(&snapshot, VIEWPORT);
        let angle_from_up: Deg<f32> = camera.orientation.angle(camera.up).into();
        assert!((angle_from_up.0 - 6.0).abs() < 1e-3);
    }

    #[test]
    fn projection_changes_only_on_aspect_updates() {
        let mut camera = Camera::new(1.0);
        let before = camera.uniform();
        camera.process_input(&centered(), VIEWPORT);
        let after = camera.uniform();
        assert_eq!(before.proj, after.proj);

        camera.modify_aspect_ratio(2.0);
        let resized = camera.uniform();
        assert_ne!(before.proj, resized.proj);
    }

    #[test]
    fn view_matrix_tracks_movement() {
        let mut camera = Camera::new(1.0);
        let before = camera.uniform();
        let snapshot = InputSnapshot {
            forward: true,
            ..centered()
        };
        camera.process_input(&snapshot, VIEWPORT);
        let after = camera.uniform();
        assert_ne!(before.view, after.view);
        assert_eq!(before.model, after.model);
    }
}
