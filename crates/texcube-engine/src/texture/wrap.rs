pub const REPEAT_WRAPPING: f64 = 1000.0;
pub const CLAMP_TO_EDGE_WRAPPING: f64 = 1001.0;
pub const MIRRORED_REPEAT_WRAPPING: f64 = 1002.0;

/// How sampling behaves outside `[0, 1]` on one axis.
///
/// Stored on the texture as the raw numeric code, because the panel edits the
/// code as text and may leave something unparseable behind.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WrapMode {
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

impl WrapMode {
    pub const ALL: [WrapMode; 3] = [WrapMode::ClampToEdge, WrapMode::Repeat, WrapMode::MirroredRepeat];

    /// Recognises exactly the three wrap codes. NaN and any other value yield
    /// `None`.
    pub fn from_code(code: f64) -> Option<Self> {
        if code == REPEAT_WRAPPING {
            Some(WrapMode::Repeat)
        } else if code == CLAMP_TO_EDGE_WRAPPING {
            Some(WrapMode::ClampToEdge)
        } else if code == MIRRORED_REPEAT_WRAPPING {
            Some(WrapMode::MirroredRepeat)
        } else {
            None
        }
    }

    pub fn code(self) -> f64 {
        match self {
            WrapMode::Repeat => REPEAT_WRAPPING,
            WrapMode::ClampToEdge => CLAMP_TO_EDGE_WRAPPING,
            WrapMode::MirroredRepeat => MIRRORED_REPEAT_WRAPPING,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WrapMode::Repeat => "RepeatWrapping",
            WrapMode::ClampToEdge => "ClampToEdgeWrapping",
            WrapMode::MirroredRepeat => "MirroredRepeatWrapping",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for mode in WrapMode::ALL {
            assert_eq!(WrapMode::from_code(mode.code()), Some(mode));
        }
    }

    #[test]
    fn known_code_values() {
        assert_eq!(WrapMode::from_code(1000.0), Some(WrapMode::Repeat));
        assert_eq!(WrapMode::from_code(1001.0), Some(WrapMode::ClampToEdge));
        assert_eq!(WrapMode::from_code(1002.0), Some(WrapMode::MirroredRepeat));
    }

    #[test]
    fn anything_else_is_unrecognised() {
        assert_eq!(WrapMode::from_code(f64::NAN), None);
        assert_eq!(WrapMode::from_code(1000.5), None);
        assert_eq!(WrapMode::from_code(0.0), None);
        assert_eq!(WrapMode::from_code(f64::INFINITY), None);
    }
}
