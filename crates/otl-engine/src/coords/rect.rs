use super::Vec2;

/// Axis-aligned rectangle: `origin` is the minimum corner, `size` is non-negative
/// after [`normalized`](Rect::normalized).
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

    /// Rectangle of `size` centered on `center`.
    #[inline]
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn translated(self, by: Vec2) -> Self {
        Self {
            origin: self.origin + by,
            size: self.size,
        }
    }

    /// The four corners, counter-clockwise starting at the minimum corner.
    pub fn corners(self) -> [Vec2; 4] {
        let (a, b) = (self.min(), self.max());
        [a, Vec2::new(b.x, a.y), b, Vec2::new(a.x, b.y)]
    }

    /// Flips negative extents so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut r = self;
        if r.size.x < 0.0 {
            r.origin.x += r.size.x;
            r.size.x = -r.size.x;
        }
        if r.size.y < 0.0 {
            r.origin.y += r.size.y;
            r.size.y = -r.size.y;
        }
        r
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        let max = r.max();
        p.x >= r.origin.x && p.y >= r.origin.y && p.x < max.x && p.y < max.y
    }

    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let (a, b) = (self.normalized(), other.normalized());
        let lo = Vec2::new(a.origin.x.max(b.origin.x), a.origin.y.max(b.origin.y));
        let hi = Vec2::new(a.max().x.min(b.max().x), a.max().y.min(b.max().y));
        let size = hi - lo;

        if size.x <= 0.0 || size.y <= 0.0 {
            None
        } else {
            Some(Rect::from_min_size(lo, size))
        }
    }

    /// Smallest translation that moves `self` out of `other`, along one axis.
    ///
    /// Returns `None` when the rectangles do not overlap.
    pub fn separation_from(self, other: Rect) -> Option<Vec2> {
        let overlap = self.intersect(other)?;
        let delta = self.center() - other.center();

        if overlap.size.x < overlap.size.y {
            let dir = if delta.x < 0.0 { -1.0 } else { 1.0 };
            Some(Vec2::new(overlap.size.x * dir, 0.0))
        } else {
            let dir = if delta.y < 0.0 { -1.0 } else { 1.0 };
            Some(Vec2::new(0.0, overlap.size.y * dir))
        }
    }

    #[inline]
    const fn from_min_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_flips_negative_extents() {
        let n = r(10.0, 10.0, -4.0, -3.0).normalized();
        assert_eq!(n, r(6.0, 7.0, 4.0, 3.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_is_half_open() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(!rect.contains(Vec2::new(10.0, 10.0)));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let i = r(0.0, 0.0, 10.0, 10.0).intersect(r(5.0, 5.0, 10.0, 10.0));
        assert_eq!(i, Some(r(5.0, 5.0, 5.0, 5.0)));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        assert!(r(0.0, 0.0, 10.0, 10.0).intersect(r(10.0, 0.0, 10.0, 10.0)).is_none());
    }

    // ── separation ────────────────────────────────────────────────────────

    #[test]
    fn separation_pushes_up_out_of_floor() {
        let floor = r(-10.0, -1.0, 20.0, 1.0);
        let body = r(0.0, -0.25, 1.0, 1.0);
        assert_eq!(body.separation_from(floor), Some(Vec2::new(0.0, 0.25)));
    }

    #[test]
    fn separation_pushes_sideways_out_of_wall() {
        let wall = r(0.0, 0.0, 1.0, 10.0);
        let body = r(-0.9, 4.0, 1.0, 1.0);
        let push = body.separation_from(wall).unwrap();
        assert!((push.x + 0.1).abs() < 1e-5);
        assert_eq!(push.y, 0.0);
    }

    #[test]
    fn separation_none_when_apart() {
        assert!(r(0.0, 0.0, 1.0, 1.0).separation_from(r(5.0, 5.0, 1.0, 1.0)).is_none());
    }

    #[test]
    fn centered_round_trips_center() {
        let c = Vec2::new(3.0, -2.0);
        assert_eq!(Rect::centered(c, Vec2::new(4.0, 2.0)).center(), c);
    }
}
