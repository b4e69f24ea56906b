//! Layer collection and validation, per §4.3.
//!
//! A [`LayerSlot`] accumulates one frame's [`LayerSubmission`]s between `layer_begin` and
//! `layer_commit`; [`validate`] is the pure gate every submission passes through before any
//! composition work is queued, keeping "validation errors never mutate state" structurally true
//! rather than merely documented.

use crate::{
    error::{CompositorError, ValidationFailure},
    math::{Fov, Pose},
    swapchain::{ImageRect, SwapchainHandle},
};

/// Which eye(s) a non-projection layer is visible to, per the `Layer submission` entity in §3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EyeVisibility {
    Both,
    Left,
    Right,
}

/// The environment blend mode a [`LayerSlot`] composites under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvironmentBlendMode {
    Opaque,
    Additive,
    AlphaBlend,
}

/// A reference to the client-created space a layer's pose is expressed in, per `space` in §3.
/// The null handle (`SpaceHandle(0)`) is never a valid reference; every layer submission carrying
/// a pose must name a real space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpaceHandle(pub u64);

impl SpaceHandle {
    pub const NULL: Self = Self(0);

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

/// A reference to a swapchain image within a layer submission, per `sub` in §3.
#[derive(Clone, Copy, Debug)]
pub struct SwapchainSubImage {
    pub swapchain: SwapchainHandle,
    pub array_index: u32,
    pub image_rect: ImageRect,
}

/// The four depth sub-images and range parameters for a projection layer with depth.
#[derive(Clone, Copy, Debug)]
pub struct DepthInfo {
    pub sub: SwapchainSubImage,
    pub min_depth: f32,
    pub max_depth: f32,
    pub near_z: f32,
    pub far_z: f32,
}

/// One composited surface for a single frame, per the `Layer submission` entity in §3.
#[derive(Clone, Debug)]
pub enum LayerSubmission {
    StereoProjection {
        space: SpaceHandle,
        left_sub: SwapchainSubImage,
        right_sub: SwapchainSubImage,
        left_pose: Pose,
        right_pose: Pose,
        left_fov: Fov,
        right_fov: Fov,
        /// Present for `layer_stereo_projection_depth`; absent for the plain variant.
        left_depth: Option<DepthInfo>,
        right_depth: Option<DepthInfo>,
    },
    Quad {
        space: SpaceHandle,
        sub: SwapchainSubImage,
        pose: Pose,
        size: (f32, f32),
        eye_visibility: EyeVisibility,
    },
    Cylinder {
        space: SpaceHandle,
        sub: SwapchainSubImage,
        pose: Pose,
        radius: f32,
        central_angle: f32,
        aspect_ratio: f32,
        eye_visibility: EyeVisibility,
    },
    Equirect1 {
        space: SpaceHandle,
        sub: SwapchainSubImage,
        pose: Pose,
        radius: f32,
        scale: (f32, f32),
        bias: (f32, f32),
        eye_visibility: EyeVisibility,
    },
    Equirect2 {
        space: SpaceHandle,
        sub: SwapchainSubImage,
        pose: Pose,
        radius: f32,
        central_horizontal_angle: f32,
        upper_vertical_angle: f32,
        lower_vertical_angle: f32,
        eye_visibility: EyeVisibility,
    },
    Cube {
        space: SpaceHandle,
        sub: SwapchainSubImage,
        orientation: glam::Quat,
        eye_visibility: EyeVisibility,
    },
}

/// The fixed per-frame layer buffer, per the `Layer slot` entity in §3.
///
/// Only one slot is active in this core; multi-session scheduling composes multiple slots at a
/// higher layer, outside this crate's scope.
#[derive(Debug, Default)]
pub struct LayerSlot {
    layers: Vec<LayerSubmission>,
    blend_mode: Option<EnvironmentBlendMode>,
    predicted_display_time_ns: u64,
}

impl LayerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the slot and records the frame's blend mode, the `layer_begin` operation in §4.3.
    pub fn begin(&mut self, predicted_display_time_ns: u64, blend_mode: EnvironmentBlendMode) {
        self.layers.clear();
        self.blend_mode = Some(blend_mode);
        self.predicted_display_time_ns = predicted_display_time_ns;
    }

    /// Appends one layer submission, one `layer_<type>` call in §4.3.
    pub fn push(&mut self, layer: LayerSubmission) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[LayerSubmission] {
        &self.layers
    }

    pub fn blend_mode(&self) -> Option<EnvironmentBlendMode> {
        self.blend_mode
    }

    pub fn predicted_display_time_ns(&self) -> u64 {
        self.predicted_display_time_ns
    }

    /// `true` if no layers were submitted; per §4.3 a zero-layer frame is discarded (no
    /// composition, no present) but still advances the state machine.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// What the validator needs to know about the device and session to check a slot, per the
/// validation rules in §4.3.
pub trait Capabilities {
    /// `true` if `mode` is one of the device's advertised environment blend modes.
    fn supports_blend_mode(&self, mode: EnvironmentBlendMode) -> bool;

    /// The `released` index and `array_layer_count`/extent of the named swapchain, if it
    /// exists and is currently in the `released` state.
    fn released_swapchain(&self, handle: SwapchainHandle) -> Option<ReleasedSwapchainInfo>;
}

/// The subset of swapchain state the validator needs, decoupled from the concrete
/// [`crate::swapchain::Swapchain`] type so `validate` stays a pure function of plain data.
#[derive(Clone, Copy, Debug)]
pub struct ReleasedSwapchainInfo {
    pub released_index: u32,
    pub array_layer_count: u32,
    pub face_count: u32,
    pub width: u32,
    pub height: u32,
}

/// Validates every submission in `slot` against `capabilities`, per the rules in §4.3. A pure
/// function with no side effects: called once at the top of `layer_commit`, before any
/// composition work is queued, so validation failures never mutate state (§7 policy).
pub fn validate(slot: &LayerSlot, capabilities: &dyn Capabilities) -> Result<(), CompositorError> {
    let blend_mode = slot
        .blend_mode
        .ok_or(CompositorError::CallOrderInvalid("layer_commit without layer_begin"))?;

    // Checked even with zero layers, per §4.3.
    if !capabilities.supports_blend_mode(blend_mode) {
        return Err(CompositorError::EnvironmentBlendModeUnsupported);
    }

    for layer in &slot.layers {
        validate_layer(layer, capabilities)?;
    }

    Ok(())
}

fn validate_layer(layer: &LayerSubmission, capabilities: &dyn Capabilities) -> Result<(), CompositorError> {
    match layer {
        LayerSubmission::StereoProjection {
            space,
            left_sub,
            right_sub,
            left_pose,
            right_pose,
            left_depth,
            right_depth,
            ..
        } => {
            validate_space(space)?;
            validate_pose(left_pose)?;
            validate_pose(right_pose)?;
            validate_sub(left_sub, capabilities, 1)?;
            validate_sub(right_sub, capabilities, 1)?;

            match (left_depth, right_depth) {
                (Some(_), Some(_)) | (None, None) => {}
                _ => {
                    return Err(CompositorError::validation(
                        ValidationFailure::DepthSubimagesIncomplete,
                    ))
                }
            }
            for depth in [left_depth, right_depth].into_iter().flatten() {
                validate_depth(depth, capabilities)?;
            }
            Ok(())
        }
        LayerSubmission::Quad { space, sub, pose, .. } => {
            validate_space(space)?;
            validate_pose(pose)?;
            validate_sub(sub, capabilities, 1)
        }
        LayerSubmission::Cylinder {
            space,
            sub,
            pose,
            radius,
            central_angle,
            aspect_ratio,
            ..
        } => {
            validate_space(space)?;
            validate_pose(pose)?;
            validate_sub(sub, capabilities, 1)?;
            if *radius < 0.0
                || !(0.0..=std::f32::consts::TAU).contains(central_angle)
                || *aspect_ratio <= 0.0
            {
                return Err(CompositorError::validation(
                    ValidationFailure::CylinderParameterInvalid,
                ));
            }
            Ok(())
        }
        LayerSubmission::Equirect1 { space, sub, pose, .. } => {
            validate_space(space)?;
            validate_pose(pose)?;
            validate_sub(sub, capabilities, 1)
        }
        LayerSubmission::Equirect2 {
            space,
            sub,
            pose,
            central_horizontal_angle,
            ..
        } => {
            validate_space(space)?;
            validate_pose(pose)?;
            validate_sub(sub, capabilities, 1)?;
            // Clamped/rejected at 2π per the Open Question resolution in DESIGN.md: the source
            // only checked `>= 0`, which this implementation tightens.
            if *central_horizontal_angle < 0.0 || *central_horizontal_angle > std::f32::consts::TAU {
                return Err(CompositorError::validation(
                    ValidationFailure::EquirectParameterInvalid,
                ));
            }
            Ok(())
        }
        LayerSubmission::Cube { space, sub, orientation, .. } => {
            validate_space(space)?;
            if (orientation.length_squared() - 1.0).abs() >= 0.01 {
                return Err(CompositorError::validation(
                    ValidationFailure::NonUnitQuaternion,
                ));
            }
            validate_sub(sub, capabilities, 6)
        }
    }
}

fn validate_space(space: &SpaceHandle) -> Result<(), CompositorError> {
    if space.is_null() {
        return Err(CompositorError::validation(ValidationFailure::NullSpace));
    }
    Ok(())
}

fn validate_pose(pose: &Pose) -> Result<(), CompositorError> {
    if (pose.orientation.length_squared() - 1.0).abs() >= 0.01 {
        return Err(CompositorError::validation(ValidationFailure::NonUnitQuaternion));
    }
    if !pose.position.is_finite() {
        return Err(CompositorError::validation(ValidationFailure::NonFinitePosition));
    }
    Ok(())
}

fn validate_sub(
    sub: &SwapchainSubImage,
    capabilities: &dyn Capabilities,
    required_face_count: u32,
) -> Result<(), CompositorError> {
    let info = capabilities
        .released_swapchain(sub.swapchain)
        .ok_or(CompositorError::validation(ValidationFailure::SwapchainNotReleased))?;

    if sub.array_index >= info.array_layer_count {
        return Err(CompositorError::validation(
            ValidationFailure::ArrayIndexOutOfRange,
        ));
    }
    if info.face_count != required_face_count {
        return Err(CompositorError::validation(ValidationFailure::FaceCountMismatch));
    }
    if !sub.image_rect.fits_within(info.width, info.height) {
        return Err(CompositorError::SwapchainRectInvalid);
    }

    Ok(())
}

fn validate_depth(depth: &DepthInfo, capabilities: &dyn Capabilities) -> Result<(), CompositorError> {
    validate_sub(&depth.sub, capabilities, 1)?;

    // minDepth == maxDepth is accepted as passthrough, per the Open Question resolution in
    // DESIGN.md.
    if !(0.0..=1.0).contains(&depth.min_depth)
        || !(0.0..=1.0).contains(&depth.max_depth)
        || depth.min_depth > depth.max_depth
        || depth.near_z == depth.far_z
    {
        return Err(CompositorError::validation(ValidationFailure::DepthRangeInvalid));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    struct FakeCapabilities {
        blend_modes: Vec<EnvironmentBlendMode>,
        swapchain: Option<(SwapchainHandle, ReleasedSwapchainInfo)>,
    }

    impl Capabilities for FakeCapabilities {
        fn supports_blend_mode(&self, mode: EnvironmentBlendMode) -> bool {
            self.blend_modes.contains(&mode)
        }

        fn released_swapchain(&self, handle: SwapchainHandle) -> Option<ReleasedSwapchainInfo> {
            self.swapchain
                .iter()
                .find(|(h, _)| *h == handle)
                .map(|(_, info)| *info)
        }
    }

    const SPACE: SpaceHandle = SpaceHandle(1);

    fn sub(handle: SwapchainHandle, rect: ImageRect) -> SwapchainSubImage {
        SwapchainSubImage {
            swapchain: handle,
            array_index: 0,
            image_rect: rect,
        }
    }

    fn full_rect() -> ImageRect {
        ImageRect {
            offset_x: 0,
            offset_y: 0,
            width: 1024,
            height: 1024,
        }
    }

    #[test]
    fn zero_layer_frame_is_valid_if_blend_mode_supported() {
        let mut slot = LayerSlot::new();
        slot.begin(0, EnvironmentBlendMode::Opaque);
        let caps = FakeCapabilities {
            blend_modes: vec![EnvironmentBlendMode::Opaque],
            swapchain: None,
        };
        assert!(validate(&slot, &caps).is_ok());
        assert!(slot.is_empty());
    }

    #[test]
    fn unsupported_blend_mode_rejected_even_with_zero_layers() {
        let mut slot = LayerSlot::new();
        slot.begin(0, EnvironmentBlendMode::AlphaBlend);
        let caps = FakeCapabilities {
            blend_modes: vec![EnvironmentBlendMode::Opaque],
            swapchain: None,
        };
        assert!(matches!(
            validate(&slot, &caps),
            Err(CompositorError::EnvironmentBlendModeUnsupported)
        ));
    }

    #[test]
    fn image_rect_out_of_bounds_fails_commit() {
        let handle = SwapchainHandle(1);
        let mut slot = LayerSlot::new();
        slot.begin(0, EnvironmentBlendMode::Opaque);
        slot.push(LayerSubmission::Quad {
            space: SPACE,
            sub: sub(
                handle,
                ImageRect {
                    offset_x: 400,
                    offset_y: 0,
                    width: 200,
                    height: 200,
                },
            ),
            pose: Pose::IDENTITY,
            size: (1.0, 1.0),
            eye_visibility: EyeVisibility::Both,
        });

        let caps = FakeCapabilities {
            blend_modes: vec![EnvironmentBlendMode::Opaque],
            swapchain: Some((
                handle,
                ReleasedSwapchainInfo {
                    released_index: 0,
                    array_layer_count: 1,
                    face_count: 1,
                    width: 512,
                    height: 512,
                },
            )),
        };

        assert!(matches!(
            validate(&slot, &caps),
            Err(CompositorError::SwapchainRectInvalid)
        ));
    }

    #[test]
    fn stereo_projection_with_one_sided_depth_is_rejected() {
        let handle = SwapchainHandle(1);
        let caps = FakeCapabilities {
            blend_modes: vec![EnvironmentBlendMode::Opaque],
            swapchain: Some((
                handle,
                ReleasedSwapchainInfo {
                    released_index: 0,
                    array_layer_count: 2,
                    face_count: 1,
                    width: 1024,
                    height: 1024,
                },
            )),
        };

        let mut slot = LayerSlot::new();
        slot.begin(0, EnvironmentBlendMode::Opaque);
        slot.push(LayerSubmission::StereoProjection {
            space: SPACE,
            left_sub: sub(handle, full_rect()),
            right_sub: sub(handle, full_rect()),
            left_pose: Pose::IDENTITY,
            right_pose: Pose::IDENTITY,
            left_fov: Fov {
                angle_left: -0.9,
                angle_right: 0.9,
                angle_up: 0.9,
                angle_down: -0.9,
            },
            right_fov: Fov {
                angle_left: -0.9,
                angle_right: 0.9,
                angle_up: 0.9,
                angle_down: -0.9,
            },
            left_depth: Some(DepthInfo {
                sub: sub(handle, full_rect()),
                min_depth: 0.0,
                max_depth: 1.0,
                near_z: 0.1,
                far_z: 100.0,
            }),
            right_depth: None,
        });

        assert!(matches!(
            validate(&slot, &caps),
            Err(CompositorError::Validation(ValidationFailure::DepthSubimagesIncomplete))
        ));
    }

    #[test]
    fn min_depth_equals_max_depth_is_accepted_as_passthrough() {
        let handle = SwapchainHandle(1);
        let caps = FakeCapabilities {
            blend_modes: vec![EnvironmentBlendMode::Opaque],
            swapchain: Some((
                handle,
                ReleasedSwapchainInfo {
                    released_index: 0,
                    array_layer_count: 2,
                    face_count: 1,
                    width: 1024,
                    height: 1024,
                },
            )),
        };

        let depth = DepthInfo {
            sub: sub(handle, full_rect()),
            min_depth: 0.5,
            max_depth: 0.5,
            near_z: 0.1,
            far_z: 100.0,
        };

        let mut slot = LayerSlot::new();
        slot.begin(0, EnvironmentBlendMode::Opaque);
        slot.push(LayerSubmission::StereoProjection {
            space: SPACE,
            left_sub: sub(handle, full_rect()),
            right_sub: sub(handle, full_rect()),
            left_pose: Pose::IDENTITY,
            right_pose: Pose::IDENTITY,
            left_fov: Fov {
                angle_left: -0.9,
                angle_right: 0.9,
                angle_up: 0.9,
                angle_down: -0.9,
            },
            right_fov: Fov {
                angle_left: -0.9,
                angle_right: 0.9,
                angle_up: 0.9,
                angle_down: -0.9,
            },
            left_depth: Some(depth),
            right_depth: Some(depth),
        });

        assert!(validate(&slot, &caps).is_ok());
    }

    #[test]
    fn equirect2_rejects_angle_beyond_full_circle() {
        let handle = SwapchainHandle(1);
        let caps = FakeCapabilities {
            blend_modes: vec![EnvironmentBlendMode::Opaque],
            swapchain: Some((
                handle,
                ReleasedSwapchainInfo {
                    released_index: 0,
                    array_layer_count: 1,
                    face_count: 1,
                    width: 1024,
                    height: 1024,
                },
            )),
        };

        let mut slot = LayerSlot::new();
        slot.begin(0, EnvironmentBlendMode::Opaque);
        slot.push(LayerSubmission::Equirect2 {
            space: SPACE,
            sub: sub(handle, full_rect()),
            pose: Pose::IDENTITY,
            radius: 1.0,
            central_horizontal_angle: std::f32::consts::TAU + 0.1,
            upper_vertical_angle: 0.5,
            lower_vertical_angle: -0.5,
            eye_visibility: EyeVisibility::Both,
        });

        assert!(matches!(
            validate(&slot, &caps),
            Err(CompositorError::Validation(ValidationFailure::EquirectParameterInvalid))
        ));
    }

    #[test]
    fn non_unit_cube_orientation_is_rejected() {
        let handle = SwapchainHandle(1);
        let mut slot = LayerSlot::new();
        slot.begin(0, EnvironmentBlendMode::Opaque);
        slot.push(LayerSubmission::Cube {
            space: SPACE,
            sub: sub(handle, full_rect()),
            orientation: Quat::from_xyzw(0.0, 0.0, 0.0, 2.0),
            eye_visibility: EyeVisibility::Both,
        });

        let caps = FakeCapabilities {
            blend_modes: vec![EnvironmentBlendMode::Opaque],
            swapchain: Some((
                handle,
                ReleasedSwapchainInfo {
                    released_index: 0,
                    array_layer_count: 1,
                    face_count: 6,
                    width: 1024,
                    height: 1024,
                },
            )),
        };

        assert!(matches!(
            validate(&slot, &caps),
            Err(CompositorError::Validation(ValidationFailure::NonUnitQuaternion))
        ));
    }

    #[test]
    fn cube_layer_rejects_non_cube_swapchain() {
        let handle = SwapchainHandle(1);
        let mut slot = LayerSlot::new();
        slot.begin(0, EnvironmentBlendMode::Opaque);
        slot.push(LayerSubmission::Cube {
            space: SPACE,
            sub: sub(handle, full_rect()),
            orientation: Quat::IDENTITY,
            eye_visibility: EyeVisibility::Both,
        });

        let caps = FakeCapabilities {
            blend_modes: vec![EnvironmentBlendMode::Opaque],
            swapchain: Some((
                handle,
                ReleasedSwapchainInfo {
                    released_index: 0,
                    array_layer_count: 1,
                    face_count: 1,
                    width: 1024,
                    height: 1024,
                },
            )),
        };

        assert!(matches!(
            validate(&slot, &caps),
            Err(CompositorError::Validation(ValidationFailure::FaceCountMismatch))
        ));
    }

    #[test]
    fn non_finite_position_in_quad_pose_is_rejected() {
        let handle = SwapchainHandle(1);
        let caps = FakeCapabilities {
            blend_modes: vec![EnvironmentBlendMode::Opaque],
            swapchain: Some((
                handle,
                ReleasedSwapchainInfo {
                    released_index: 0,
                    array_layer_count: 1,
                    face_count: 1,
                    width: 1024,
                    height: 1024,
                },
            )),
        };

        let mut slot = LayerSlot::new();
        slot.begin(0, EnvironmentBlendMode::Opaque);
        slot.push(LayerSubmission::Quad {
            space: SPACE,
            sub: sub(handle, full_rect()),
            pose: Pose {
                orientation: Quat::IDENTITY,
                position: Vec3::new(f32::NAN, 0.0, 0.0),
            },
            size: (1.0, 1.0),
            eye_visibility: EyeVisibility::Both,
        });

        assert!(matches!(
            validate(&slot, &caps),
            Err(CompositorError::Validation(ValidationFailure::NonFinitePosition))
        ));
    }

    #[test]
    fn null_space_is_rejected() {
        let handle = SwapchainHandle(1);
        let caps = FakeCapabilities {
            blend_modes: vec![EnvironmentBlendMode::Opaque],
            swapchain: Some((
                handle,
                ReleasedSwapchainInfo {
                    released_index: 0,
                    array_layer_count: 1,
                    face_count: 1,
                    width: 1024,
                    height: 1024,
                },
            )),
        };

        let mut slot = LayerSlot::new();
        slot.begin(0, EnvironmentBlendMode::Opaque);
        slot.push(LayerSubmission::Quad {
            space: SpaceHandle::NULL,
            sub: sub(handle, full_rect()),
            pose: Pose::IDENTITY,
            size: (1.0, 1.0),
            eye_visibility: EyeVisibility::Both,
        });

        assert!(matches!(
            validate(&slot, &caps),
            Err(CompositorError::Validation(ValidationFailure::NullSpace))
        ));
    }
}
