/// Something drawn into at one size and shown at another.
///
/// Sizes are physical pixels.
pub trait RenderSurface {
    fn display_size(&self) -> (u32, u32);
    fn backing_size(&self) -> (u32, u32);
    fn set_backing_size(&mut self, width: u32, height: u32);
}

/// Matches the backing size to the display size.
///
/// Returns `true` when the surface had to be reconfigured. A surface that is
/// already in sync is left untouched.
pub fn resize_to_display_size<S: RenderSurface + ?Sized>(surface: &mut S) -> bool {
    let display = surface.display_size();
    if surface.backing_size() == display {
        return false;
    }
    log::debug!(
        "resizing backing surface {:?} -> {:?}",
        surface.backing_size(),
        display
    );
    surface.set_backing_size(display.0, display.1);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSurface {
        display: (u32, u32),
        backing: (u32, u32),
        reconfigures: u32,
    }

    impl RenderSurface for FakeSurface {
        fn display_size(&self) -> (u32, u32) {
            self.display
        }
        fn backing_size(&self) -> (u32, u32) {
            self.backing
        }
        fn set_backing_size(&mut self, width: u32, height: u32) {
            self.backing = (width, height);
            self.reconfigures += 1;
        }
    }

    #[test]
    fn in_sync_surface_is_untouched() {
        let mut s = FakeSurface { display: (800, 600), backing: (800, 600), reconfigures: 0 };
        assert!(!resize_to_display_size(&mut s));
        assert_eq!(s.reconfigures, 0);
    }

    #[test]
    fn mismatch_reconfigures_once() {
        let mut s = FakeSurface { display: (1024, 768), backing: (800, 600), reconfigures: 0 };
        assert!(resize_to_display_size(&mut s));
        assert_eq!(s.backing, (1024, 768));
        assert!(!resize_to_display_size(&mut s));
        assert_eq!(s.reconfigures, 1);
    }

    #[test]
    fn one_axis_change_counts() {
        let mut s = FakeSurface { display: (800, 601), backing: (800, 600), reconfigures: 0 };
        assert!(resize_to_display_size(&mut s));
    }

    #[test]
    fn works_through_trait_object() {
        let mut s = FakeSurface { display: (0, 0), backing: (10, 10), reconfigures: 0 };
        let dynamic: &mut dyn RenderSurface = &mut s;
        assert!(resize_to_display_size(dynamic));
        assert_eq!(s.backing, (0, 0));
    }
}
