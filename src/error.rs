//! The stable error taxonomy returned across the public API.

use {crate::driver::DriverError, std::fmt::{Display, Formatter}};

/// A stable error kind returned by every fallible operation in the public API.
///
/// Variants are grouped by the seven kinds named in the error-handling design: handle-invalid,
/// call-order-invalid, validation failure, resource-unavailable, environment-unsupported,
/// runtime/GPU failure, and session-not-running. Validation variants never mutate state; callers
/// may retry with corrected input.
#[derive(Debug)]
pub enum CompositorError {
    /// An object handle referenced an unknown or already-destroyed object.
    HandleInvalid,

    /// A call was made out of the order the API requires, e.g. `release_image` without a prior
    /// `wait_image`, or `layer_commit` without a preceding `begin_frame`.
    CallOrderInvalid(&'static str),

    /// A parameter failed validation: an out-of-range value, a non-unit quaternion, an
    /// image rect that does not fit inside its swapchain, and so on.
    Validation(ValidationFailure),

    /// No acquirable image remains in a non-static swapchain.
    NoImageAvailable,

    /// A blocking wait (image fence, or `wait_frame` cancellation) exceeded its timeout.
    Timeout,

    /// A submitted layer failed a composition-time constraint not covered by
    /// [`ValidationFailure`] (e.g. a stale swapchain reference surviving past its frame).
    LayerInvalid,

    /// `image_rect` does not fit inside the referenced swapchain.
    SwapchainRectInvalid,

    /// The requested swapchain format is not one the device advertises.
    SwapchainFormatUnsupported,

    /// The requested swapchain create flag combination is not supported
    /// (e.g. `face_count == 6` without `CUBE_COMPATIBLE`).
    SwapchainFlagUnsupported,

    /// The session's environment blend mode is not one the device advertises.
    EnvironmentBlendModeUnsupported,

    /// The requested view configuration type is not supported.
    ViewConfigurationTypeUnsupported,

    /// The requested form factor is not supported.
    FormFactorUnsupported,

    /// A device-side (Vulkan) operation failed. Wraps the single opaque driver error kind;
    /// the current frame is dropped and the next frame proceeds normally.
    Gpu(DriverError),

    /// The session is not in a state where the call is meaningful (`STOPPING`, `EXITING`), or
    /// has suffered a device-loss event.
    SessionNotRunning,

    /// The runtime has entered `LOSS_PENDING`; the session must be destroyed and recreated.
    SessionLossPending,
}

/// The specific validation rule a [`CompositorError::Validation`] failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationFailure {
    /// A space handle was null.
    NullSpace,
    /// An orientation quaternion was not within 1% of unit length.
    NonUnitQuaternion,
    /// A position contained a non-finite component.
    NonFinitePosition,
    /// The referenced swapchain was not in the `released` state.
    SwapchainNotReleased,
    /// `image_array_index` was out of range for the swapchain's `array_layer_count`.
    ArrayIndexOutOfRange,
    /// A layer's `face_count` did not match what its layer type requires.
    FaceCountMismatch,
    /// `image_rect` had a negative offset or did not fit inside the swapchain extent.
    ImageRectOutOfBounds,
    /// Depth sub-images for a stereo projection layer were partially present.
    DepthSubimagesIncomplete,
    /// `minDepth`/`maxDepth` were outside `[0, 1]`, or `nearZ == farZ`.
    DepthRangeInvalid,
    /// A cylinder layer's radius, central angle, or aspect ratio was out of range.
    CylinderParameterInvalid,
    /// An equirect2 layer's `central_horizontal_angle` was negative.
    EquirectParameterInvalid,
}

impl Display for CompositorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CallOrderInvalid(what) => write!(f, "call order invalid: {what}"),
            Self::Validation(failure) => write!(f, "validation failed: {failure:?}"),
            Self::Gpu(err) => write!(f, "gpu failure: {err}"),
            other => write!(f, "{other:?}"),
        }
    }
}

impl std::error::Error for CompositorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DriverError> for CompositorError {
    fn from(err: DriverError) -> Self {
        Self::Gpu(err)
    }
}

impl CompositorError {
    pub(crate) fn validation(failure: ValidationFailure) -> Self {
        Self::Validation(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_error_display_wraps_source() {
        let err = CompositorError::from(DriverError::OutOfMemory);
        assert!(err.to_string().contains("gpu failure"));
    }

    #[test]
    fn call_order_invalid_carries_context() {
        let err = CompositorError::CallOrderInvalid("release without wait");
        assert_eq!(
            err.to_string(),
            "call order invalid: release without wait"
        );
    }
}
