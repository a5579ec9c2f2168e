use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: `[min, max)`.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }


    /// Splits off the left `w` pixels, returning `(left, rest)`.
    pub fn split_left(self, w: f32) -> (Rect, Rect) {
        let w = w.clamp(0.0, self.size.x.max(0.0));
        (
            Rect::new(self.origin.x, self.origin.y, w, self.size.y),
            Rect::new(self.origin.x + w, self.origin.y, self.size.x - w, self.size.y),
        )
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(r.contains(Vec2::new(9.9, 9.9)));
        assert!(!r.contains(Vec2::new(10.0, 5.0)));
        assert!(!r.contains(Vec2::new(-0.1, 5.0)));
    }

    #[test]
    fn split_left_partitions_width() {
        let (l, rest) = Rect::new(10.0, 0.0, 100.0, 20.0).split_left(30.0);
        assert_eq!(l, Rect::new(10.0, 0.0, 30.0, 20.0));
        assert_eq!(rest, Rect::new(40.0, 0.0, 70.0, 20.0));
    }

    #[test]
    fn split_left_clamps_to_width() {
        let (l, rest) = Rect::new(0.0, 0.0, 20.0, 5.0).split_left(50.0);
        assert_eq!(l.size.x, 20.0);
        assert!(rest.is_empty());
    }

    #[test]
    fn center_of_rect() {
        assert_eq!(Rect::new(2.0, 4.0, 6.0, 8.0).center(), Vec2::new(5.0, 8.0));
    }
}
