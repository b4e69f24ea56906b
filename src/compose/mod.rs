//! Layer composition pipeline, per §4.4.
//!
//! Rasterization and compute are expressed as the two implementors of [`CompositionPath`],
//! selected once at [`crate::compositor::Compositor`] construction from the `COMPOSITOR_COMPUTE`
//! config flag rather than per-frame, because descriptor pool sizing and pipeline selection are
//! path-specific and shouldn't be re-derived every frame (§4.4 implementation detail).

pub mod compute;
pub mod distortion;
pub mod raster;

use {
    crate::{error::CompositorError, layer::LayerSlot, math::Pose},
    ash::vk,
};

/// The per-eye inputs the composition pipeline needs beyond the layer slot itself: the pose the
/// client rendered from (for time-warp) and the pose measured at present time.
#[derive(Clone, Copy, Debug)]
pub struct EyeFrameContext {
    pub rendered_pose: Pose,
    pub predicted_pose: Pose,
    pub near_z: f32,
    pub far_z: f32,
}

/// The GPU-visible per-layer uniform buffer contents: the time-warp reprojection matrix a
/// shader applies to the clip-space position it would otherwise use unwarped. `std140`-layout
/// compatible, a plain column-major `mat4`.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub(crate) struct LayerUniforms {
    pub warp: [f32; 16],
}

impl LayerUniforms {
    pub fn new(warp: glam::Mat4) -> Self {
        Self {
            warp: warp.to_cols_array(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        use std::{mem::size_of_val, slice::from_raw_parts};

        unsafe { from_raw_parts(self.warp.as_ptr() as *const u8, size_of_val(&self.warp)) }
    }
}

/// One interchangeable composition strategy: draws a validated [`LayerSlot`] into the
/// presentation target's acquired image.
///
/// Implementors own their own pipeline/descriptor-pool/pipeline-cache resources (§4.4 "Resource
/// discipline") and are free to keep per-session state (e.g. tessellated meshes) across calls.
pub trait CompositionPath: Send {
    /// Composites `slot` for both eyes into `target_image`/`target_view`, recording commands into
    /// `cmd_buf`. Called once per frame, after [`crate::layer::validate`] has already accepted
    /// the slot.
    fn composite(
        &mut self,
        cmd_buf: vk::CommandBuffer,
        slot: &LayerSlot,
        eyes: [EyeFrameContext; 2],
        target_image: vk::Image,
        target_view: vk::ImageView,
        target_extent: (u32, u32),
    ) -> Result<(), CompositorError>;
}

/// `true` if `slot` is eligible for the compute path's single-projection-layer fast path, per
/// §4.4: "a fast path bypasses the layer compositor entirely when there is exactly one
/// projection layer."
pub fn is_single_projection_fast_path(slot: &LayerSlot) -> bool {
    matches!(
        slot.layers(),
        [crate::layer::LayerSubmission::StereoProjection { .. }]
    )
}

/// Compute dispatch dimensions for an 8×8 group size, per §4.4: `⌈max(w,h)/8⌉`.
pub fn compute_dispatch_dims(width: u32, height: u32) -> (u32, u32, u32) {
    let group = width.max(height).div_ceil(8);
    (group, group, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_dims_round_up_to_group_size() {
        assert_eq!(compute_dispatch_dims(1000, 800), (125, 125, 1));
        assert_eq!(compute_dispatch_dims(1, 1), (1, 1, 1));
    }

    #[test]
    fn single_projection_layer_is_fast_path_eligible() {
        use crate::{
            layer::{LayerSubmission, SpaceHandle, SwapchainSubImage},
            math::{Fov, Pose},
            swapchain::{ImageRect, SwapchainHandle},
        };

        let sub = SwapchainSubImage {
            swapchain: SwapchainHandle(1),
            array_index: 0,
            image_rect: ImageRect {
                offset_x: 0,
                offset_y: 0,
                width: 1024,
                height: 1024,
            },
        };
        let fov = Fov {
            angle_left: -0.9,
            angle_right: 0.9,
            angle_up: 0.9,
            angle_down: -0.9,
        };

        let mut slot = LayerSlot::new();
        slot.begin(0, crate::layer::EnvironmentBlendMode::Opaque);
        slot.push(LayerSubmission::StereoProjection {
            space: SpaceHandle(1),
            left_sub: sub,
            right_sub: sub,
            left_pose: Pose::IDENTITY,
            right_pose: Pose::IDENTITY,
            left_fov: fov,
            right_fov: fov,
            left_depth: None,
            right_depth: None,
        });

        assert!(is_single_projection_fast_path(&slot));
    }

    #[test]
    fn empty_slot_is_not_fast_path_eligible() {
        let mut slot = LayerSlot::new();
        slot.begin(0, crate::layer::EnvironmentBlendMode::Opaque);
        assert!(!is_single_projection_fast_path(&slot));
    }
}
