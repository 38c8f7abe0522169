/// Axis-aligned 2D extent.
///
/// Used both in lon/lat degrees and in projected metres; the caller knows
/// which. An empty extent has `min > max` and absorbs nothing until extended.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Extent {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Extent {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Extent { min, max }
    }

    pub fn empty() -> Self {
        Extent {
            min: [f64::INFINITY, f64::INFINITY],
            max: [f64::NEG_INFINITY, f64::NEG_INFINITY],
        }
    }

    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = [f64; 2]>,
    {
        let mut e = Self::empty();
        for p in points {
            e.extend(p);
        }
        e
    }

    pub fn extend(&mut self, p: [f64; 2]) {
        self.min[0] = self.min[0].min(p[0]);
        self.min[1] = self.min[1].min(p[1]);
        self.max[0] = self.max[0].max(p[0]);
        self.max[1] = self.max[1].max(p[1]);
    }

    pub fn union(&self, other: &Extent) -> Extent {
        if other.is_empty() {
            return *self;
        }
        let mut out = *self;
        out.extend(other.min);
        out.extend(other.max);
        out
    }

    pub fn is_empty(&self) -> bool {
        self.min[0] > self.max[0] || self.min[1] > self.max[1]
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max[0] - self.min[0] }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max[1] - self.min[1] }
    }

    pub fn center(&self) -> [f64; 2] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
        ]
    }

    pub fn contains(&self, p: [f64; 2]) -> bool {
        p[0] >= self.min[0] && p[0] <= self.max[0] && p[1] >= self.min[1] && p[1] <= self.max[1]
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Extent;

    #[test]
    fn empty_extent_absorbs_first_point() {
        let mut e = Extent::empty();
        assert!(e.is_empty());
        e.extend([1.0, 2.0]);
        assert!(!e.is_empty());
        assert_eq!(e.min, [1.0, 2.0]);
        assert_eq!(e.max, [1.0, 2.0]);
        assert_eq!(e.width(), 0.0);
    }

    #[test]
    fn from_points_center_and_contains() {
        let e = Extent::from_points([[-3.0, 4.5], [1.5, 11.0], [0.0, 6.0]]);
        assert_eq!(e.min, [-3.0, 4.5]);
        assert_eq!(e.max, [1.5, 11.0]);
        assert_eq!(e.center(), [-0.75, 7.75]);
        assert!(e.contains([0.0, 5.0]));
        assert!(!e.contains([2.0, 5.0]));
    }

    #[test]
    fn union_ignores_empty() {
        let a = Extent::new([0.0, 0.0], [1.0, 1.0]);
        assert_eq!(a.union(&Extent::empty()), a);
        let b = Extent::new([2.0, -1.0], [3.0, 0.5]);
        assert_eq!(a.union(&b), Extent::new([0.0, -1.0], [3.0, 1.0]));
    }
}
