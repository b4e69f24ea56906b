//! Swapchain manager, per §4.2.
//!
//! A [`Swapchain`] owns a fixed-size ring of [`Image`]s and mediates the three-phase
//! acquire/wait/release lifecycle OpenXR requires of client swapchains. The display-side
//! swapchain used by the presentation target is a separate concept (see
//! [`crate::driver::swapchain`] and [`crate::present`]).

use {
    crate::{
        destroy::Garbage,
        error::{CompositorError, ValidationFailure},
    },
    ash::vk,
    bitflags::bitflags,
    derive_builder::Builder,
    std::{
        collections::VecDeque,
        os::raw::{c_void, RawFd},
        sync::{
            atomic::{AtomicU64, Ordering},
            Arc,
        },
    },
};

#[cfg(target_os = "windows")]
use std::os::windows::io::RawHandle;

#[cfg(not(target_os = "windows"))]
type RawHandle = std::os::raw::c_int;

/// Identifies one client swapchain within a [`crate::compositor::Compositor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwapchainHandle(pub u64);

bitflags! {
    /// Swapchain creation flags, per the OpenXR `XrSwapchainCreateFlags` bits this core supports.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SwapchainCreateFlags: u32 {
        /// The swapchain has exactly one image and never cycles through `acquire`.
        const STATIC_IMAGE = 0b01;
        /// `face_count == 6` is permitted; the image is usable as a cubemap.
        const CUBE_COMPATIBLE = 0b10;
    }
}

bitflags! {
    /// Swapchain usage flags, a subset of `XrSwapchainUsageFlags` relevant to composition.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SwapchainUsageFlags: u32 {
        const COLOR_ATTACHMENT = 0b0001;
        const DEPTH_STENCIL_ATTACHMENT = 0b0010;
        const SAMPLED = 0b0100;
        const UNORDERED_ACCESS = 0b1000;
    }
}

/// Parameters for [`SwapchainManager::create`], per the `Swapchain` entity in §3.
#[derive(Builder, Clone, Debug)]
#[builder(pattern = "owned", setter(into))]
pub struct SwapchainInfo {
    pub width: u32,
    pub height: u32,
    #[builder(default = "1")]
    pub array_layer_count: u32,
    #[builder(default = "1")]
    pub face_count: u32,
    #[builder(default = "1")]
    pub mip_count: u32,
    pub format: vk::Format,
    pub usage_flags: SwapchainUsageFlags,
    #[builder(default = "1")]
    pub sample_count: u32,
    #[builder(default = "SwapchainCreateFlags::empty()")]
    pub create_flags: SwapchainCreateFlags,
}

impl SwapchainInfo {
    /// `true` if this info describes a valid, internally consistent swapchain request.
    pub fn is_valid(&self) -> bool {
        self.array_layer_count >= 1
            && self.mip_count >= 1
            && (self.face_count == 1
                || (self.face_count == 6
                    && self.create_flags.contains(SwapchainCreateFlags::CUBE_COMPATIBLE)))
    }

    /// The ring size this info implies: one image for a static swapchain, the given default
    /// otherwise.
    pub fn image_count(&self, default_image_count: u32) -> u32 {
        if self.create_flags.contains(SwapchainCreateFlags::STATIC_IMAGE) {
            1
        } else {
            default_image_count
        }
    }
}

/// A non-negative, axis-aligned sub-rectangle of a swapchain image, per `image_rect` in §3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageRect {
    pub offset_x: u32,
    pub offset_y: u32,
    pub width: u32,
    pub height: u32,
}

impl ImageRect {
    /// `true` if this rect fits entirely inside an image of the given extent, per the
    /// `SWAPCHAIN_RECT_INVALID` validation rule (§4.3, §8 scenario 2).
    pub fn fits_within(&self, extent_width: u32, extent_height: u32) -> bool {
        self.offset_x.saturating_add(self.width) <= extent_width
            && self.offset_y.saturating_add(self.height) <= extent_height
    }
}

/// A platform memory-sharing handle exported at image-allocation time, per §4.2/§6.
///
/// Callers branch on platform exactly once, at the point the handle is consumed by IPC; every
/// other call site treats this as an opaque token.
#[derive(Debug)]
pub enum ExportedMemoryHandle {
    Fd(RawFd),
    Win32(RawHandle),
    AHardwareBuffer(*mut c_void),
}

// The raw handles here are either POSIX fds, platform HANDLEs, or AHardwareBuffer pointers
// handed off for IPC; the core never dereferences the pointer variant itself.
unsafe impl Send for ExportedMemoryHandle {}
unsafe impl Sync for ExportedMemoryHandle {}

/// One image in a swapchain's ring, per the `Image` entity in §3.
///
/// The underlying device image/memory/views live in [`crate::driver::image::Image`]; this type
/// adds the export handle and the alpha/no-alpha view variants layer composition needs.
#[derive(Debug)]
pub struct Image {
    index: u32,
    export_handle: ExportedMemoryHandle,
}

impl Image {
    pub fn new(index: u32, export_handle: ExportedMemoryHandle) -> Self {
        Self {
            index,
            export_handle,
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn export_handle(&self) -> &ExportedMemoryHandle {
        &self.export_handle
    }
}

/// A client swapchain: a fixed-size ring of [`Image`]s plus the acquire/wait/release FIFO state
/// required by §4.2.
#[derive(Debug)]
pub struct Swapchain {
    info: SwapchainInfo,
    images: Vec<Image>,
    acquirable: VecDeque<u32>,
    waited: Option<u32>,
    released: Option<(u32, u64)>,
    release_sequence: AtomicU64,
    garbage: Arc<crate::destroy::DestroyStack>,
}

impl Swapchain {
    /// Builds a swapchain whose images are provided by the caller (the compositor wires in the
    /// actual Vulkan allocation; this type only enforces the FIFO lifecycle).
    pub fn new(
        info: SwapchainInfo,
        images: Vec<Image>,
        garbage: Arc<crate::destroy::DestroyStack>,
    ) -> Result<Self, CompositorError> {
        if !info.is_valid() {
            return Err(CompositorError::SwapchainFlagUnsupported);
        }

        let acquirable = (0..images.len() as u32).collect();

        Ok(Self {
            info,
            images,
            acquirable,
            waited: None,
            released: None,
            release_sequence: AtomicU64::new(0),
            garbage,
        })
    }

    pub fn info(&self) -> &SwapchainInfo {
        &self.info
    }

    pub fn image_count(&self) -> u32 {
        self.images.len() as u32
    }

    /// The image index most recently released; the only index legal to reference from a layer
    /// submission (§4.3).
    pub fn released_index(&self) -> Option<u32> {
        self.released.map(|(index, _)| index)
    }

    /// Pops the next acquirable index to the client, per the `acquire` contract in §4.2.
    pub fn acquire(&mut self) -> Result<u32, CompositorError> {
        self.acquirable
            .pop_front()
            .ok_or(CompositorError::NoImageAvailable)
    }

    /// Marks `index` as waited, making it safe for the client to write, per the `wait` contract
    /// in §4.2. The caller is responsible for performing the actual GPU-side synchronization
    /// (fence wait) before calling this; this method only tracks the FIFO state.
    pub fn wait(&mut self, index: u32) -> Result<(), CompositorError> {
        if self.waited.is_some() {
            return Err(CompositorError::CallOrderInvalid(
                "wait_image called with an image already waited",
            ));
        }
        if index >= self.image_count() {
            return Err(CompositorError::Validation(ValidationFailure::ArrayIndexOutOfRange));
        }

        self.waited = Some(index);
        Ok(())
    }

    /// Releases the waited image, per the `release` contract in §4.2. A layer submission may
    /// only ever reference [`Swapchain::released_index`], the single most-recently released
    /// index, so the index this call supersedes is reclaimed into the acquirable FIFO here —
    /// nothing can still legally be reading it.
    pub fn release(&mut self) -> Result<u32, CompositorError> {
        let index = self.waited.take().ok_or(CompositorError::CallOrderInvalid(
            "release_image called without a prior wait_image",
        ))?;

        if let Some((previous_index, _)) = self.released.take() {
            self.reclaim(previous_index);
        }

        let seq = self.release_sequence.fetch_add(1, Ordering::Relaxed) + 1;
        self.released = Some((index, seq));
        Ok(index)
    }

    /// Re-inserts a previously released index into the acquirable FIFO, called once the
    /// compositor has finished reading the layer submission(s) that referenced it.
    pub fn reclaim(&mut self, index: u32) {
        self.acquirable.push_back(index);
    }

    /// Pushes this swapchain's images onto the garbage stack rather than freeing them
    /// synchronously, per the "destroy never frees immediately" rule in §4.2.
    pub fn destroy(self) {
        for image in self.images {
            self.garbage.push(Garbage::SwapchainImage(image.index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn info(create_flags: SwapchainCreateFlags) -> SwapchainInfo {
        SwapchainInfoBuilder::default()
            .width(512u32)
            .height(512u32)
            .format(vk::Format::R8G8B8A8_SRGB)
            .usage_flags(SwapchainUsageFlags::SAMPLED)
            .create_flags(create_flags)
            .build()
            .unwrap()
    }

    fn fake_images(n: u32) -> Vec<Image> {
        (0..n)
            .map(|index| Image {
                index,
                export_handle: ExportedMemoryHandle::Fd(-1),
            })
            .collect()
    }

    fn swapchain(n: u32, create_flags: SwapchainCreateFlags) -> Swapchain {
        Swapchain::new(info(create_flags), fake_images(n), Arc::new(crate::destroy::DestroyStack::new()))
            .unwrap()
    }

    #[test]
    fn acquire_wait_release_cycles_in_fifo_order() {
        let mut sc = swapchain(3, SwapchainCreateFlags::empty());

        for cycle in 0..2u32 {
            for expected in 0..3u32 {
                let index = sc.acquire().unwrap();
                assert_eq!(index, expected, "cycle {cycle}");
                sc.wait(index).unwrap();
                let released = sc.release().unwrap();
                assert_eq!(released, index);
            }
        }
    }

    #[test]
    fn acquire_fails_when_no_image_available() {
        let mut sc = swapchain(1, SwapchainCreateFlags::STATIC_IMAGE);
        sc.acquire().unwrap();
        assert!(matches!(
            sc.acquire(),
            Err(CompositorError::NoImageAvailable)
        ));
    }

    #[test]
    fn release_without_wait_is_call_order_invalid() {
        let mut sc = swapchain(2, SwapchainCreateFlags::empty());
        assert!(matches!(
            sc.release(),
            Err(CompositorError::CallOrderInvalid(_))
        ));
    }

    #[test]
    fn wait_twice_without_release_is_call_order_invalid() {
        let mut sc = swapchain(2, SwapchainCreateFlags::empty());
        let index = sc.acquire().unwrap();
        sc.wait(index).unwrap();
        let second = sc.acquire().unwrap();
        assert!(matches!(sc.wait(second), Err(CompositorError::CallOrderInvalid(_))));
    }

    #[test]
    fn cube_face_count_requires_cube_compatible_flag() {
        let without_flag = SwapchainInfoBuilder::default()
            .width(256u32)
            .height(256u32)
            .format(vk::Format::R8G8B8A8_SRGB)
            .usage_flags(SwapchainUsageFlags::SAMPLED)
            .face_count(6u32)
            .build()
            .unwrap();
        assert!(!without_flag.is_valid());

        let with_flag = SwapchainInfoBuilder::default()
            .width(256u32)
            .height(256u32)
            .format(vk::Format::R8G8B8A8_SRGB)
            .usage_flags(SwapchainUsageFlags::SAMPLED)
            .face_count(6u32)
            .create_flags(SwapchainCreateFlags::CUBE_COMPATIBLE)
            .build()
            .unwrap();
        assert!(with_flag.is_valid());
    }

    #[test]
    fn image_rect_out_of_bounds_is_rejected() {
        let rect = ImageRect {
            offset_x: 400,
            offset_y: 0,
            width: 200,
            height: 200,
        };
        assert!(!rect.fits_within(512, 512));
    }

    #[test]
    fn image_rect_within_bounds_is_accepted() {
        let rect = ImageRect {
            offset_x: 0,
            offset_y: 0,
            width: 512,
            height: 512,
        };
        assert!(rect.fits_within(512, 512));
    }
}
