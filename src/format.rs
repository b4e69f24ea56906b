//! Preferred swapchain pixel format selection, per §6.
//!
//! Each list is ordered most- to least-preferred; [`select`] returns the first entry the device
//! advertises as supported.

use ash::vk;

/// Color formats offered to clients, in preference order.
///
/// `R11G11B10` and `A2B10G10R10` are deliberately omitted: they produce visible banding in sRGB
/// use, per the redesign note carried over from the original runtime.
pub const COLOR_FORMATS: &[vk::Format] = &[
    vk::Format::R16G16B16A16_UNORM,
    vk::Format::R16G16B16A16_SFLOAT,
    vk::Format::R8G8B8A8_SRGB,
    vk::Format::B8G8R8A8_SRGB,
    vk::Format::R8G8B8A8_UNORM,
    vk::Format::B8G8R8A8_UNORM,
];

/// Depth-only formats, in preference order.
pub const DEPTH_FORMATS: &[vk::Format] = &[vk::Format::D16_UNORM, vk::Format::D32_SFLOAT];

/// Combined depth-stencil formats, in preference order.
pub const DEPTH_STENCIL_FORMATS: &[vk::Format] = &[
    vk::Format::D24_UNORM_S8_UINT,
    vk::Format::D32_SFLOAT_S8_UINT,
];

/// Returns the first format in `preference` for which `is_supported` returns `true`.
pub fn select(
    preference: &[vk::Format],
    mut is_supported: impl FnMut(vk::Format) -> bool,
) -> Option<vk::Format> {
    preference.iter().copied().find(|&fmt| is_supported(fmt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_supported_color_format() {
        let supported = [vk::Format::R8G8B8A8_SRGB, vk::Format::R8G8B8A8_UNORM];
        let chosen = select(COLOR_FORMATS, |fmt| supported.contains(&fmt));
        assert_eq!(chosen, Some(vk::Format::R8G8B8A8_SRGB));
    }

    #[test]
    fn returns_none_when_nothing_matches() {
        let chosen = select(COLOR_FORMATS, |_| false);
        assert_eq!(chosen, None);
    }

    #[test]
    fn banding_prone_formats_are_not_offered() {
        // A2B10G10R10 / R11G11B10 must never appear in either preference list.
        assert!(!COLOR_FORMATS.contains(&vk::Format::A2B10G10R10_UNORM_PACK32));
    }
}
