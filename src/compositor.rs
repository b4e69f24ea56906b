//! Top-level compositor context, per §6 "Public API" and the re-architecture note in §9
//! replacing the original's global mutable singletons with a context threaded explicitly through
//! calls.

use {
    crate::{
        compose::{compute::ComputePath, raster::RasterPath, CompositionPath, EyeFrameContext},
        config::{CompositorConfig, DEFAULT_SWAPCHAIN_IMAGE_COUNT},
        destroy::{DestroyStack, Garbage},
        driver::{Device, Image as DriverImage, ImageInfo},
        error::CompositorError,
        event::CompositorEvent,
        format,
        layer::{Capabilities, EnvironmentBlendMode, LayerSlot, ReleasedSwapchainInfo},
        math::Pose,
        present::PresentationTarget,
        scheduler::{FrameId, FramePoint, FramePrediction, FrameScheduler},
        session::{Session, SessionState},
        swapchain::{
            ExportedMemoryHandle, Image as CompositorImage, Swapchain, SwapchainHandle,
            SwapchainInfo, SwapchainUsageFlags,
        },
    },
    ash::vk,
    std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicU64, Ordering},
            Arc,
        },
    },
};

#[cfg(feature = "parking_lot")]
use parking_lot::Mutex;

#[cfg(not(feature = "parking_lot"))]
use std::sync::Mutex;

/// The blend modes this core always advertises. A real deployment would query the device for
/// additional support; the core itself only needs *a* truthful answer to satisfy §4.3's
/// "environment blend mode is one the device advertises" rule.
const SUPPORTED_BLEND_MODES: &[EnvironmentBlendMode] = &[
    EnvironmentBlendMode::Opaque,
    EnvironmentBlendMode::Additive,
    EnvironmentBlendMode::AlphaBlend,
];

struct SwapchainEntry {
    owner_session: u64,
    swapchain: Swapchain,
    /// The real device-backed images, kept alive for as long as the swapchain exists. `Swapchain`
    /// itself only tracks the FIFO ring and the export handle (so it stays testable without a
    /// device); dropping this vector is what actually frees the Vulkan image/memory.
    device_images: Vec<DriverImage>,
}

/// Shared capability/state view the layer validator reads through, decoupling
/// [`crate::layer::validate`] from the compositor's internal locking.
struct CompositorCapabilities<'a> {
    swapchains: &'a HashMap<SwapchainHandle, SwapchainEntry>,
}

impl Capabilities for CompositorCapabilities<'_> {
    fn supports_blend_mode(&self, mode: EnvironmentBlendMode) -> bool {
        SUPPORTED_BLEND_MODES.contains(&mode)
    }

    fn released_swapchain(&self, handle: SwapchainHandle) -> Option<ReleasedSwapchainInfo> {
        let entry = self.swapchains.get(&handle)?;
        let released_index = entry.swapchain.released_index()?;
        let info = entry.swapchain.info();
        Some(ReleasedSwapchainInfo {
            released_index,
            array_layer_count: info.array_layer_count,
            face_count: info.face_count,
            width: info.width,
            height: info.height,
        })
    }
}

/// A connected client plus the per-frame state the compositor needs beyond what
/// [`crate::session::Session`] tracks itself.
struct SessionEntry {
    session: Session,
    layer_slot: LayerSlot,
    swapchains: Vec<SwapchainHandle>,
    outstanding_frame: Option<FrameId>,
}

/// The server-side context every public API call is threaded through, replacing the original
/// runtime's global mutable singletons (§9).
pub struct Compositor {
    device: Arc<Device>,
    config: CompositorConfig,
    scheduler: FrameScheduler,
    present_target: Mutex<Box<dyn PresentationTarget>>,
    composition_path: Mutex<Box<dyn CompositionPath>>,
    destroy_stack: Arc<DestroyStack>,
    sessions: Mutex<HashMap<u64, SessionEntry>>,
    swapchains: Mutex<HashMap<SwapchainHandle, SwapchainEntry>>,
    focused_session: Mutex<Option<u64>>,
    next_session_id: AtomicU64,
    next_swapchain_handle: AtomicU64,
}

impl Compositor {
    /// Builds a compositor context over an already-created device and presentation target,
    /// selecting the composition path once from `config.compute_composition` (§4.4).
    pub fn new(
        device: Arc<Device>,
        present_target: Box<dyn PresentationTarget>,
        nominal_frame_interval_ns: u64,
        config: CompositorConfig,
    ) -> Result<Self, CompositorError> {
        let composition_path: Box<dyn CompositionPath> = if config.compute_composition {
            Box::new(ComputePath::new(device.clone())?)
        } else {
            Box::new(RasterPath::new(device.clone())?)
        };

        Ok(Self {
            device,
            config,
            scheduler: FrameScheduler::new(nominal_frame_interval_ns),
            present_target: Mutex::new(present_target),
            composition_path: Mutex::new(composition_path),
            destroy_stack: Arc::new(DestroyStack::new()),
            sessions: Mutex::new(HashMap::new()),
            swapchains: Mutex::new(HashMap::new()),
            focused_session: Mutex::new(None),
            next_session_id: AtomicU64::new(1),
            next_swapchain_handle: AtomicU64::new(1),
        })
    }

    fn lock<T>(mutex: &Mutex<T>) -> impl std::ops::DerefMut<Target = T> + '_ {
        #[cfg(feature = "parking_lot")]
        return mutex.lock();

        #[cfg(not(feature = "parking_lot"))]
        return mutex.lock().unwrap();
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    // ---- Session -----------------------------------------------------------------------

    /// Creates a new session in `IDLE`, per the *Session: create* operation in §6.
    pub fn create_session(&self) -> u64 {
        let id = self.next_session_id.fetch_add(1, Ordering::Relaxed);
        let mut sessions = Self::lock(&self.sessions);
        sessions.insert(
            id,
            SessionEntry {
                session: Session::new(id),
                layer_slot: LayerSlot::new(),
                swapchains: Vec::new(),
                outstanding_frame: None,
            },
        );
        id
    }

    /// Destroys a session: clears its pending events, pushes its swapchains onto the garbage
    /// stack, and clears the focused slot if it held it (§4.6, §8 scenario 6).
    pub fn destroy_session(&self, session_id: u64) -> Result<(), CompositorError> {
        let mut sessions = Self::lock(&self.sessions);
        let mut entry = sessions
            .remove(&session_id)
            .ok_or(CompositorError::HandleInvalid)?;
        entry.session.destroy();
        self.scheduler.cancel();

        let mut swapchains = Self::lock(&self.swapchains);
        for handle in entry.swapchains.drain(..) {
            if let Some(swapchain_entry) = swapchains.remove(&handle) {
                swapchain_entry.swapchain.destroy();
                self.destroy_stack.push(Garbage::Swapchain {
                    handle,
                    images: swapchain_entry.device_images,
                });
            }
        }

        let mut focused = Self::lock(&self.focused_session);
        if *focused == Some(session_id) {
            *focused = None;
        }

        self.destroy_stack.push(Garbage::Session(session_id));

        if self.config.exit_on_disconnect && sessions.is_empty() {
            info!("last session disconnected, exit_on_disconnect set");
        }

        Ok(())
    }

    /// `READY`, allowing the client to begin its frame loop (§4.6).
    pub fn session_ready(&self, session_id: u64) -> Result<(), CompositorError> {
        self.with_session(session_id, |entry| {
            entry
                .session
                .ready_to_begin()
                .map_err(|e| CompositorError::CallOrderInvalid(e.attempted))
        })
    }

    /// The client's first successful `layer_commit` has happened; moves to `SYNCHRONIZED`,
    /// then to `VISIBLE`/`FOCUSED` once there's no other focused session (§4.6).
    fn advance_to_running(&self, session_id: u64) -> Result<(), CompositorError> {
        self.with_session(session_id, |entry| {
            if entry.session.state() == SessionState::Ready {
                entry
                    .session
                    .client_begin()
                    .map_err(|e| CompositorError::CallOrderInvalid(e.attempted))?;
            }
            if entry.session.state() == SessionState::Synchronized {
                entry
                    .session
                    .become_visible()
                    .map_err(|e| CompositorError::CallOrderInvalid(e.attempted))?;
            }
            Ok(())
        })?;

        let mut focused = Self::lock(&self.focused_session);
        if focused.is_none() {
            *focused = Some(session_id);
            self.with_session(session_id, |entry| {
                entry
                    .session
                    .become_focused()
                    .map_err(|e| CompositorError::CallOrderInvalid(e.attempted))
            })?;
        }

        Ok(())
    }

    /// Ends the session's frame loop, per the *Session: end* operation in §6.
    pub fn session_end(&self, session_id: u64) -> Result<(), CompositorError> {
        self.with_session(session_id, |entry| {
            entry
                .session
                .client_end()
                .map_err(|e| CompositorError::CallOrderInvalid(e.attempted))
        })
    }

    /// Pops the next pending event for this session, per *Session: poll event* in §6.
    pub fn poll_event(&self, session_id: u64) -> Result<Option<CompositorEvent>, CompositorError> {
        let sessions = Self::lock(&self.sessions);
        let entry = sessions.get(&session_id).ok_or(CompositorError::HandleInvalid)?;
        Ok(entry.session.events().poll())
    }

    fn with_session<T>(
        &self,
        session_id: u64,
        f: impl FnOnce(&mut SessionEntry) -> Result<T, CompositorError>,
    ) -> Result<T, CompositorError> {
        let mut sessions = Self::lock(&self.sessions);
        let entry = sessions.get_mut(&session_id).ok_or(CompositorError::HandleInvalid)?;
        f(entry)
    }

    // ---- Swapchain -----------------------------------------------------------------------

    /// Allocates a new swapchain owned by `session_id`, per *Swapchain: create* in §6.
    pub fn create_swapchain(
        &self,
        session_id: u64,
        info: SwapchainInfo,
    ) -> Result<SwapchainHandle, CompositorError> {
        if !info.is_valid() {
            return Err(CompositorError::SwapchainFlagUnsupported);
        }

        let format = format::select(format::COLOR_FORMATS, |fmt| fmt == info.format)
            .ok_or(CompositorError::SwapchainFormatUnsupported)?;

        let image_count = info.image_count(DEFAULT_SWAPCHAIN_IMAGE_COUNT);
        let vk_usage = swapchain_usage_to_vk(info.usage_flags);

        let mut images = Vec::with_capacity(image_count as usize);
        let mut device_images = Vec::with_capacity(image_count as usize);
        for index in 0..image_count {
            match self.allocate_image(&info, format, vk_usage, index) {
                Ok((image, device_image)) => {
                    images.push(image);
                    device_images.push(device_image);
                }
                Err(err) => {
                    // Fail creation and release every partially allocated resource rather than
                    // preserving the original's partial-leak path (§9 Open Question). Dropping
                    // `device_images` here frees every image allocated before the failing one.
                    return Err(err);
                }
            }
        }

        let handle = SwapchainHandle(self.next_swapchain_handle.fetch_add(1, Ordering::Relaxed));
        let swapchain = Swapchain::new(info, images, self.destroy_stack.clone())?;

        let mut swapchains = Self::lock(&self.swapchains);
        swapchains.insert(
            handle,
            SwapchainEntry {
                owner_session: session_id,
                swapchain,
                device_images,
            },
        );
        drop(swapchains);

        self.with_session(session_id, |entry| {
            entry.swapchains.push(handle);
            Ok(())
        })?;

        Ok(handle)
    }

    /// Pops the next acquirable image index for `handle`, per *Swapchain: acquire* in §6.
    pub fn acquire_image(&self, handle: SwapchainHandle) -> Result<u32, CompositorError> {
        let mut swapchains = Self::lock(&self.swapchains);
        let entry = swapchains.get_mut(&handle).ok_or(CompositorError::HandleInvalid)?;
        entry.swapchain.acquire()
    }

    /// Marks `index` as waited for `handle`, per *Swapchain: wait* in §6.
    pub fn wait_image(&self, handle: SwapchainHandle, index: u32) -> Result<(), CompositorError> {
        let mut swapchains = Self::lock(&self.swapchains);
        let entry = swapchains.get_mut(&handle).ok_or(CompositorError::HandleInvalid)?;
        entry.swapchain.wait(index)
    }

    /// Releases the waited image for `handle`, per *Swapchain: release* in §6.
    pub fn release_image(&self, handle: SwapchainHandle) -> Result<u32, CompositorError> {
        let mut swapchains = Self::lock(&self.swapchains);
        let entry = swapchains.get_mut(&handle).ok_or(CompositorError::HandleInvalid)?;
        entry.swapchain.release()
    }

    fn allocate_image(
        &self,
        info: &SwapchainInfo,
        format: vk::Format,
        usage: vk::ImageUsageFlags,
        index: u32,
    ) -> Result<(CompositorImage, DriverImage), CompositorError> {
        let image_info: ImageInfo = if info.face_count == 6 {
            ImageInfo::new_2d(format, info.width, info.height, usage)
                .flags(vk::ImageCreateFlags::CUBE_COMPATIBLE)
                .array_elements(6 * info.array_layer_count)
                .mip_level_count(info.mip_count)
                .into()
        } else {
            ImageInfo::new_2d_array(format, info.width, info.height, info.array_layer_count, usage)
                .mip_level_count(info.mip_count)
                .into()
        };

        let driver_image =
            DriverImage::create(&self.device, image_info).map_err(CompositorError::from)?;

        // The platform-specific export call (VkExportMemoryAllocateInfo / dedicated allocation)
        // is performed by the concrete allocator integration; this core only carries the handle
        // through to the client-facing import path once it exists.
        Ok((
            CompositorImage::new(index, ExportedMemoryHandle::Fd(-1)),
            driver_image,
        ))
    }

    // ---- Frame loop ----------------------------------------------------------------------

    pub fn predict_frame(&self, session_id: u64) -> Result<FramePrediction, CompositorError> {
        let prediction = self.scheduler.predict_frame();
        self.with_session(session_id, |entry| {
            entry.outstanding_frame = Some(prediction.frame_id);
            Ok(())
        })?;
        Ok(prediction)
    }

    pub fn wait_frame(&self, _session_id: u64) -> Result<FramePrediction, CompositorError> {
        self.scheduler.wait_frame().map_err(|_| CompositorError::SessionLossPending)
    }

    pub fn begin_frame(&self, frame_id: FrameId, when_ns: u64) {
        self.scheduler.mark_frame(frame_id, FramePoint::Began, when_ns);
    }

    /// Discards the in-flight frame without compositing, leaving the "frames outstanding"
    /// counter unchanged (§8 round-trip property).
    pub fn discard_frame(&self, session_id: u64) -> Result<(), CompositorError> {
        self.with_session(session_id, |entry| {
            entry.outstanding_frame = None;
            Ok(())
        })
    }

    pub fn layer_begin(
        &self,
        session_id: u64,
        predicted_display_time_ns: u64,
        blend_mode: EnvironmentBlendMode,
    ) -> Result<(), CompositorError> {
        self.with_session(session_id, |entry| {
            entry.layer_slot.begin(predicted_display_time_ns, blend_mode);
            Ok(())
        })
    }

    pub fn layer_push(
        &self,
        session_id: u64,
        layer: crate::layer::LayerSubmission,
    ) -> Result<(), CompositorError> {
        self.with_session(session_id, |entry| {
            entry.layer_slot.push(layer);
            Ok(())
        })
    }

    /// Validates and composites the session's current layer slot, per §4.3/§4.4.
    ///
    /// Validation is a pure function of the slot and the current swapchain state, called before
    /// any composition work is queued, so a rejected frame never mutates session state (§7).
    #[profiling::function]
    pub fn layer_commit(
        &self,
        session_id: u64,
        frame_id: FrameId,
        submit_when_ns: u64,
    ) -> Result<(), CompositorError> {
        // Lock order is always sessions, then swapchains, matching `destroy_session` — reversing
        // it anywhere would risk a lock-order deadlock against a concurrent destroy.
        let empty = {
            let sessions = Self::lock(&self.sessions);
            let swapchains = Self::lock(&self.swapchains);
            let capabilities = CompositorCapabilities {
                swapchains: &swapchains,
            };
            let entry = sessions.get(&session_id).ok_or(CompositorError::HandleInvalid)?;
            crate::layer::validate(&entry.layer_slot, &capabilities)?;
            entry.layer_slot.is_empty()
        };

        self.scheduler.mark_frame(frame_id, FramePoint::Submitted, submit_when_ns);

        if !empty {
            self.composite_focused_session()?;
        }

        self.advance_to_running(session_id)?;

        Ok(())
    }

    fn composite_focused_session(&self) -> Result<(), CompositorError> {
        let mut target = Self::lock(&self.present_target);
        if !target.check_ready() {
            return Ok(());
        }

        let image_index = target.acquire()?;
        let mut path = Self::lock(&self.composition_path);

        let sessions = Self::lock(&self.sessions);
        let focused = *Self::lock(&self.focused_session);
        let Some(focused_id) = focused else {
            return Ok(());
        };
        let Some(entry) = sessions.get(&focused_id) else {
            return Ok(());
        };

        let identity_eye = EyeFrameContext {
            rendered_pose: Pose::IDENTITY,
            predicted_pose: Pose::IDENTITY,
            near_z: 0.05,
            far_z: 100.0,
        };

        path.composite(
            vk::CommandBuffer::null(),
            &entry.layer_slot,
            [identity_eye, identity_eye],
            vk::Image::null(),
            vk::ImageView::null(),
            (0, 0),
        )?;

        drop(sessions);
        drop(path);

        let queue = self.device.queues[0][0];
        target.present(queue, image_index, vk::Semaphore::null())
    }

    /// Drains the destroy stack, freeing every pending [`Garbage`] entry. Called by the main
    /// loop once per frame, after submission, when the device is known idle with respect to the
    /// frame that could have referenced it (§4.2).
    pub fn drain_garbage(&self) {
        self.destroy_stack.drain(|garbage| match garbage {
            Garbage::SwapchainImage(index) => trace!("freeing swapchain image {index}"),
            Garbage::Swapchain { handle, images } => {
                trace!("freeing swapchain {handle:?} ({} images)", images.len());
                // `images` drops here, which is what actually frees the device memory.
            }
            Garbage::Session(id) => trace!("freeing session {id} gpu resources"),
        });
    }
}

fn swapchain_usage_to_vk(usage: SwapchainUsageFlags) -> vk::ImageUsageFlags {
    let mut vk_usage = vk::ImageUsageFlags::empty();
    if usage.contains(SwapchainUsageFlags::COLOR_ATTACHMENT) {
        vk_usage |= vk::ImageUsageFlags::COLOR_ATTACHMENT;
    }
    if usage.contains(SwapchainUsageFlags::DEPTH_STENCIL_ATTACHMENT) {
        vk_usage |= vk::ImageUsageFlags::DEPTH_STENCIL_ATTACHMENT;
    }
    if usage.contains(SwapchainUsageFlags::SAMPLED) {
        vk_usage |= vk::ImageUsageFlags::SAMPLED;
    }
    if usage.contains(SwapchainUsageFlags::UNORDERED_ACCESS) {
        vk_usage |= vk::ImageUsageFlags::STORAGE;
    }
    vk_usage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swapchain_usage_maps_to_vulkan_flags() {
        let usage = SwapchainUsageFlags::COLOR_ATTACHMENT | SwapchainUsageFlags::SAMPLED;
        let vk_usage = swapchain_usage_to_vk(usage);
        assert!(vk_usage.contains(vk::ImageUsageFlags::COLOR_ATTACHMENT));
        assert!(vk_usage.contains(vk::ImageUsageFlags::SAMPLED));
        assert!(!vk_usage.contains(vk::ImageUsageFlags::STORAGE));
    }
}
