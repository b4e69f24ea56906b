//! Pose and field-of-view types shared by layer submissions and the time-warp calculation.

use glam::{Mat4, Quat, Vec3};

/// A rigid-body pose: orientation then position, matching the OpenXR `XrPosef` layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub orientation: Quat,
    pub position: Vec3,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        orientation: Quat::IDENTITY,
        position: Vec3::ZERO,
    };

    /// `true` if the orientation is within 1% of unit length and the position has no
    /// non-finite component, per the validation rule in the layer collector.
    pub fn is_valid(&self) -> bool {
        let len_sq = self.orientation.length_squared();
        (len_sq - 1.0).abs() < 0.01 && self.position.is_finite()
    }

    /// The view matrix (world-to-camera) this pose implies.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position).inverse()
    }

    /// The model matrix (camera-to-world) this pose implies.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }
}

/// The four tangent-angle field-of-view, matching the OpenXR `XrFovf` layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fov {
    pub angle_left: f32,
    pub angle_right: f32,
    pub angle_up: f32,
    pub angle_down: f32,
}

impl Fov {
    /// Builds an off-axis perspective projection matrix from the tangent angles and clip planes,
    /// following the construction in the OpenXR `xrConvertProjectionFov...`-family helpers.
    pub fn projection_matrix(&self, near_z: f32, far_z: f32) -> Mat4 {
        let tan_left = self.angle_left.tan();
        let tan_right = self.angle_right.tan();
        let tan_down = self.angle_down.tan();
        let tan_up = self.angle_up.tan();

        let tan_width = tan_right - tan_left;
        let tan_height = tan_up - tan_down;

        let a11 = 2.0 / tan_width;
        let a22 = 2.0 / tan_height;
        let a31 = (tan_right + tan_left) / tan_width;
        let a32 = (tan_up + tan_down) / tan_height;

        let (a33, a43) = if far_z.is_finite() {
            (
                -(far_z + near_z) / (far_z - near_z),
                -(2.0 * far_z * near_z) / (far_z - near_z),
            )
        } else {
            (-1.0, -2.0 * near_z)
        };

        Mat4::from_cols_array(&[
            a11, 0.0, 0.0, 0.0, //
            0.0, a22, 0.0, 0.0, //
            a31, a32, a33, -1.0, //
            0.0, 0.0, a43, 0.0,
        ])
    }
}

/// Builds the time-warp reprojection matrix: the transform that maps a clip-space sample in an
/// image rendered from `rendered_pose`/`rendered_fov` to the equivalent sample as it should
/// appear from `predicted_pose`, per §4.4.
pub fn time_warp_matrix(
    rendered_pose: Pose,
    rendered_fov: Fov,
    predicted_pose: Pose,
    near_z: f32,
    far_z: f32,
) -> Mat4 {
    let rendered_view_proj = rendered_fov.projection_matrix(near_z, far_z) * rendered_pose.view_matrix();
    let predicted_view_proj =
        rendered_fov.projection_matrix(near_z, far_z) * predicted_pose.view_matrix();

    rendered_view_proj * predicted_view_proj.inverse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_pose_is_valid() {
        assert!(Pose::IDENTITY.is_valid());
    }

    #[test]
    fn non_unit_quaternion_is_invalid() {
        let pose = Pose {
            orientation: Quat::from_xyzw(0.0, 0.0, 0.0, 2.0),
            position: Vec3::ZERO,
        };
        assert!(!pose.is_valid());
    }

    #[test]
    fn non_finite_position_is_invalid() {
        let pose = Pose {
            orientation: Quat::IDENTITY,
            position: Vec3::new(f32::NAN, 0.0, 0.0),
        };
        assert!(!pose.is_valid());
    }

    #[test]
    fn unchanged_pose_gives_identity_time_warp() {
        let pose = Pose {
            orientation: Quat::from_rotation_y(0.3),
            position: Vec3::new(1.0, 0.0, 0.0),
        };
        let fov = Fov {
            angle_left: -0.9,
            angle_right: 0.9,
            angle_up: 0.9,
            angle_down: -0.9,
        };
        let warp = time_warp_matrix(pose, fov, pose, 0.05, 100.0);
        let diff = warp - Mat4::IDENTITY;
        for col in diff.to_cols_array() {
            assert!(col.abs() < 1e-4, "expected identity warp, got {warp:?}");
        }
    }
}
