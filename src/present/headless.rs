//! The one concrete in-core presentation backend, per §4.5: an offscreen target that synthesizes
//! vsync from `nominal_frame_interval_ns` rather than deriving it from real display feedback.
//! Used for headless testing and as the reference implementation any windowed backend's timing
//! feedback should match.

use {
    super::{FrameTimings, PresentMode, PresentationTarget},
    crate::error::CompositorError,
    ash::vk,
    std::collections::VecDeque,
};

/// Offscreen presentation target. Owns a ring of image indices exactly like
/// [`crate::swapchain::Swapchain`] but with no backing Vulkan swapchain: `acquire`/`present` only
/// track FIFO order, and timing is derived from a synthetic vsync clock.
pub struct HeadlessTarget {
    nominal_frame_interval_ns: u64,
    image_count: u32,
    acquirable: VecDeque<u32>,
    last_vsync_ns: u64,
    last_wake_up_ns: u64,
    ready: bool,
    clock: Box<dyn Fn() -> u64 + Send>,
}

impl HeadlessTarget {
    pub fn new(nominal_frame_interval_ns: u64, clock: impl Fn() -> u64 + Send + 'static) -> Self {
        Self {
            nominal_frame_interval_ns,
            image_count: 0,
            acquirable: VecDeque::new(),
            last_vsync_ns: 0,
            last_wake_up_ns: 0,
            ready: false,
            clock: Box::new(clock),
        }
    }

    /// The synthetic vsync nearest to `now`, advancing `last_vsync_ns` by whole periods.
    fn next_vsync(&mut self) -> u64 {
        let now = (self.clock)();
        while self.last_vsync_ns <= now {
            self.last_vsync_ns += self.nominal_frame_interval_ns.max(1);
        }
        self.last_vsync_ns
    }
}

impl PresentationTarget for HeadlessTarget {
    fn init_pre_vulkan(&mut self) -> Result<Vec<&'static std::ffi::CStr>, CompositorError> {
        Ok(Vec::new())
    }

    fn init_post_vulkan(&mut self, _width: u32, _height: u32) -> Result<(), CompositorError> {
        self.ready = true;
        Ok(())
    }

    fn create_images(
        &mut self,
        _width: u32,
        _height: u32,
        _format: vk::Format,
        _color_space: vk::ColorSpaceKHR,
        _usage: vk::ImageUsageFlags,
        _present_mode: PresentMode,
    ) -> Result<(), CompositorError> {
        self.image_count = 3;
        self.acquirable = (0..self.image_count).collect();
        Ok(())
    }

    fn check_ready(&self) -> bool {
        self.ready
    }

    fn acquire(&mut self) -> Result<u32, CompositorError> {
        self.acquirable
            .pop_front()
            .ok_or(CompositorError::NoImageAvailable)
    }

    fn present(
        &mut self,
        _queue: vk::Queue,
        index: u32,
        _wait_sem: vk::Semaphore,
    ) -> Result<(), CompositorError> {
        if index >= self.image_count {
            return Err(CompositorError::HandleInvalid);
        }
        self.acquirable.push_back(index);
        Ok(())
    }

    fn update_timings(&mut self) {
        self.next_vsync();
    }

    fn calc_frame_timings(&self, frame_id: u64) -> FrameTimings {
        let period = self.nominal_frame_interval_ns.max(1);
        let predicted_display_time_ns = self.last_vsync_ns + period;
        FrameTimings {
            frame_id,
            wake_up_time_ns: self.last_wake_up_ns,
            desired_present_time_ns: predicted_display_time_ns,
            present_slop_ns: 0,
            predicted_display_time_ns,
        }
    }

    fn mark_wake_up(&mut self, _frame_id: u64, when_ns: u64) {
        self.last_wake_up_ns = when_ns;
    }

    fn destroy(self: Box<Self>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{atomic::{AtomicU64, Ordering}, Arc};

    fn target(now: Arc<AtomicU64>) -> HeadlessTarget {
        HeadlessTarget::new(11_111_111, move || now.load(Ordering::SeqCst))
    }

    #[test]
    fn acquire_present_cycles_in_fifo_order() {
        let now = Arc::new(AtomicU64::new(0));
        let mut target = target(now);
        target.create_images(
            1024,
            1024,
            vk::Format::B8G8R8A8_SRGB,
            vk::ColorSpaceKHR::SRGB_NONLINEAR,
            vk::ImageUsageFlags::COLOR_ATTACHMENT,
            PresentMode::Fifo,
        )
        .unwrap();

        let index = target.acquire().unwrap();
        assert_eq!(index, 0);
        target
            .present(vk::Queue::null(), index, vk::Semaphore::null())
            .unwrap();

        let next = target.acquire().unwrap();
        assert_eq!(next, 1);
    }

    #[test]
    fn synthetic_vsync_advances_by_whole_periods() {
        let now = Arc::new(AtomicU64::new(25_000_000));
        let mut target = target(now);
        target.update_timings();
        assert!(target.last_vsync_ns > 25_000_000);
        assert_eq!(target.last_vsync_ns % 11_111_111, 0);
    }
}
