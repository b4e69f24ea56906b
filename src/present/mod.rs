//! Presentation target contract, per §4.5.
//!
//! The core depends on exactly this trait; every windowed backend (XCB, Wayland, KMS/direct,
//! Android, Windows) is an out-of-tree implementor selected at init, per the `PresentationTarget`
//! re-architecture note in §9. [`headless`] ships the one concrete in-core backend, used for
//! testing and offscreen rendering.

pub mod headless;

use {crate::error::CompositorError, ash::vk};

/// FIFO is the default; MAILBOX is preferred for desktop windowed peek surfaces; IMMEDIATE is
/// used only when forced, per §4.5.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentMode {
    Fifo,
    Mailbox,
    Immediate,
}

/// The scheduler-facing timing feedback a presentation target reports each frame, per the
/// `update_timings`/`calc_frame_timings` contract in §4.5.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameTimings {
    pub frame_id: u64,
    pub wake_up_time_ns: u64,
    pub desired_present_time_ns: u64,
    pub present_slop_ns: u64,
    pub predicted_display_time_ns: u64,
}

/// The display-side swapchain, command submission queue, and vsync-correlated timing feedback
/// that drives the frame scheduler, per the `Presentation target` entity in §3.
///
/// Two-phase init lets a backend influence instance-extension selection before device creation
/// (`init_pre_vulkan`) and allocate its display swapchain only once the device exists
/// (`init_post_vulkan`).
pub trait PresentationTarget: Send {
    /// Returns the Vulkan instance extensions this backend requires, before a device exists.
    fn init_pre_vulkan(&mut self) -> Result<Vec<&'static std::ffi::CStr>, CompositorError>;

    /// Allocates backend-side resources that depend on the chosen device and target extent.
    fn init_post_vulkan(&mut self, width: u32, height: u32) -> Result<(), CompositorError>;

    /// (Re)builds the display swapchain with the given parameters.
    fn create_images(
        &mut self,
        width: u32,
        height: u32,
        format: vk::Format,
        color_space: vk::ColorSpaceKHR,
        usage: vk::ImageUsageFlags,
        present_mode: PresentMode,
    ) -> Result<(), CompositorError>;

    /// `true` once the backend can accept `acquire`/`present` calls.
    fn check_ready(&self) -> bool;

    /// Acquires the next display image index.
    fn acquire(&mut self) -> Result<u32, CompositorError>;

    /// Submits `wait_sem`-gated work and presents `index`.
    fn present(
        &mut self,
        queue: vk::Queue,
        index: u32,
        wait_sem: vk::Semaphore,
    ) -> Result<(), CompositorError>;

    /// Refreshes the backend's internal vsync timing estimate from its windowing source.
    fn update_timings(&mut self);

    /// Computes the next frame's timing feedback for the scheduler.
    fn calc_frame_timings(&self, frame_id: u64) -> FrameTimings;

    /// Records the actual wake-up time for `frame_id`, fed back from the scheduler.
    fn mark_wake_up(&mut self, frame_id: u64, when_ns: u64);

    fn destroy(self: Box<Self>);
}
