//! Core of an OpenXR-conformant compositor runtime.
//!
//! This crate implements the server-side half of the OpenXR frame-pacing and layer-composition
//! contract: the subsystem that accepts per-application frame submissions, composites them
//! through a head-mounted-display distortion pipeline, and presents the result to a display at
//! the device's refresh cadence.
//!
//! It deliberately does not implement the API dispatch shim that turns IPC calls into the
//! operations below, the transport that carries those calls, device drivers that produce head
//! and controller poses, or window-system glue. Each of those is expected to drive the types in
//! this crate through the small number of entry points described in the [`session`], [`swapchain`],
//! [`layer`] and [`scheduler`] modules.
//!
//! # Modules
//!
//! - [`scheduler`] — frame pacing: predict, wait, mark, notify.
//! - [`swapchain`] — swapchain/image allocation and the acquire/wait/release lifecycle.
//! - [`layer`] — per-frame layer submission, validation, and ordering.
//! - [`compose`] — the rasterization and compute composition paths.
//! - [`present`] — the presentation-target contract and a headless reference backend.
//! - [`session`] — per-client session state machine and event queue.
//! - [`driver`] — the shared Vulkan resource layer (device, images, pipelines, pools).
//! - [`pool`] — resource leasing pools built atop [`driver`].
//! - [`compositor`] — the top-level object wiring the above into one runtime.

#![allow(dead_code)]

#[macro_use]
extern crate log;

pub mod compose;
pub mod compositor;
pub mod config;
pub mod destroy;
pub mod driver;
pub mod error;
pub mod event;
pub mod format;
pub mod layer;
pub mod math;
pub mod pool;
pub mod present;
pub mod scheduler;
pub mod session;
pub mod shared_memory;
pub mod swapchain;

/// Things used by nearly every caller of this crate.
pub mod prelude {
    pub use crate::{
        compositor::Compositor,
        config::CompositorConfig,
        error::CompositorError,
        event::CompositorEvent,
        layer::{EyeVisibility, LayerSubmission},
        scheduler::{FrameId, FrameScheduler},
        session::{Session, SessionState},
        swapchain::{Swapchain, SwapchainHandle},
    };
}

pub use self::error::CompositorError;

/// Initializes [`pretty_env_logger`] for standalone binaries embedding this crate.
///
/// Libraries that already configure `log` themselves should not call this; it is provided for
/// the reference headless backend and for tests.
pub fn init_debug() {
    let _ = pretty_env_logger::try_init();
}
