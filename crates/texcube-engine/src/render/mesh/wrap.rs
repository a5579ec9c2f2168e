use crate::texture::WrapMode;

/// Sampler address mode for a raw wrap code.
///
/// Unrecognised codes fall back to clamp-to-edge; the second value reports
/// whether that happened.
pub(crate) fn address_mode(code: f64) -> (wgpu::AddressMode, bool) {
    match WrapMode::from_code(code) {
        Some(WrapMode::Repeat) => (wgpu::AddressMode::Repeat, true),
        Some(WrapMode::ClampToEdge) => (wgpu::AddressMode::ClampToEdge, true),
        Some(WrapMode::MirroredRepeat) => (wgpu::AddressMode::MirrorRepeat, true),
        None => (wgpu::AddressMode::ClampToEdge, false),
    }
}

/// `address_mode`, logging the fallback. Called once per texture version,
/// which bounds the warning to once per change.
pub(crate) fn address_mode_logged(axis: char, code: f64, version: u64) -> wgpu::AddressMode {
    let (mode, recognised) = address_mode(code);
    if !recognised {
        log::warn!(
            "texture v{version}: wrap {axis} = {code} is not a wrap mode; sampling with clamp-to-edge"
        );
    }
    mode
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_address_modes() {
        assert_eq!(address_mode(1000.0), (wgpu::AddressMode::Repeat, true));
        assert_eq!(address_mode(1001.0), (wgpu::AddressMode::ClampToEdge, true));
        assert_eq!(address_mode(1002.0), (wgpu::AddressMode::MirrorRepeat, true));
    }

    #[test]
    fn nan_falls_back_to_clamp() {
        assert_eq!(address_mode(f64::NAN), (wgpu::AddressMode::ClampToEdge, false));
        assert_eq!(address_mode_logged('s', 42.0, 3), wgpu::AddressMode::ClampToEdge);
    }
}
