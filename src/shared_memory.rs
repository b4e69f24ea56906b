//! Shared-memory layout for out-of-process deployments, per §6.
//!
//! A single region published read-write by the server, read-only by clients. Plain `#[repr(C)]`
//! structs with explicit field accessors, matching the driver layer's style of never reaching
//! for `bytemuck`: the layout is portable to the out-of-process case without pulling in a new
//! dependency family.

use crate::math::Fov;

pub const MAX_DEVICES: usize = 16;
pub const MAX_INPUTS: usize = 64;
pub const MAX_OUTPUTS: usize = 32;
const DEVICE_NAME_LEN: usize = 256;

/// The kind of tracked device a shared-memory `idevs` entry describes.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceKind {
    Unknown = 0,
    Hmd = 1,
    LeftController = 2,
    RightController = 3,
    TrackedObject = 4,
}

/// One tracked device's identity and input/output range within the flat `inputs`/`outputs`
/// arrays.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct SharedDeviceDescriptor {
    pub kind: DeviceKind,
    name: [u8; DEVICE_NAME_LEN],
    pub input_count: u32,
    pub first_input: u32,
    pub output_count: u32,
    pub first_output: u32,
}

impl SharedDeviceDescriptor {
    pub const EMPTY: Self = Self {
        kind: DeviceKind::Unknown,
        name: [0; DEVICE_NAME_LEN],
        input_count: 0,
        first_input: 0,
        output_count: 0,
        first_output: 0,
    };

    /// Writes `name`, truncated to fit, into the fixed-size name buffer.
    pub fn set_name(&mut self, name: &str) {
        self.name = [0; DEVICE_NAME_LEN];
        let bytes = name.as_bytes();
        let len = bytes.len().min(DEVICE_NAME_LEN - 1);
        self.name[..len].copy_from_slice(&bytes[..len]);
    }

    /// Reads the name back, stopping at the first NUL byte.
    pub fn name(&self) -> &str {
        let len = self.name.iter().position(|&b| b == 0).unwrap_or(self.name.len());
        std::str::from_utf8(&self.name[..len]).unwrap_or("")
    }
}

/// Per-view display and FOV parameters, one per eye.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct ViewInfo {
    pub width_pixels: u32,
    pub height_pixels: u32,
    pub fov: Fov,
}

/// The HMD's static (per-session) view geometry.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct HmdInfo {
    pub views: [ViewInfo; 2],
}

/// One input's current analog/boolean/pose state. Layout kept deliberately small and flat —
/// the dispatch shim interprets the active union member using `InputState::KIND` metadata it
/// tracks separately, mirroring how the OpenXR action layer keeps type info out-of-band.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    pub bool_value: u32,
    pub float_value: f32,
    pub vec2_value: (f32, f32),
    pub changed_since_last_sync: u32,
}

/// One output's (haptic) requested state.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct OutputState {
    pub amplitude: f32,
    pub frequency_hz: f32,
    pub duration_ns: u64,
}

/// The full shared-memory layout published by the server, per §6.
#[repr(C)]
pub struct SharedMemoryRegion {
    pub device_count: u32,
    pub devices: [SharedDeviceDescriptor; MAX_DEVICES],
    pub hmd: HmdInfo,
    pub inputs: [InputState; MAX_INPUTS],
    pub outputs: [OutputState; MAX_OUTPUTS],
}

impl SharedMemoryRegion {
    /// A region with every slot zeroed/empty, suitable for placing at the start of a freshly
    /// mapped shared-memory file before the server populates it.
    pub fn empty() -> Self {
        Self {
            device_count: 0,
            devices: [SharedDeviceDescriptor::EMPTY; MAX_DEVICES],
            hmd: HmdInfo {
                views: [ViewInfo {
                    width_pixels: 0,
                    height_pixels: 0,
                    fov: Fov {
                        angle_left: 0.0,
                        angle_right: 0.0,
                        angle_up: 0.0,
                        angle_down: 0.0,
                    },
                }; 2],
            },
            inputs: [InputState::default(); MAX_INPUTS],
            outputs: [OutputState::default(); MAX_OUTPUTS],
        }
    }

    pub const SIZE: usize = std::mem::size_of::<Self>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_name_round_trips_through_fixed_buffer() {
        let mut device = SharedDeviceDescriptor::EMPTY;
        device.set_name("left_hand_controller");
        assert_eq!(device.name(), "left_hand_controller");
    }

    #[test]
    fn overlong_name_is_truncated_not_overflowed() {
        let mut device = SharedDeviceDescriptor::EMPTY;
        let long_name = "x".repeat(DEVICE_NAME_LEN * 2);
        device.set_name(&long_name);
        assert!(device.name().len() < DEVICE_NAME_LEN);
    }

    #[test]
    fn empty_region_has_zero_device_count() {
        let region = SharedMemoryRegion::empty();
        assert_eq!(region.device_count, 0);
        assert_eq!(region.devices.len(), MAX_DEVICES);
    }

    #[test]
    fn region_size_is_stable_across_platforms() {
        assert!(SharedMemoryRegion::SIZE > 0);
    }
}
