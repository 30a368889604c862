use super::*;

#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    extents: [Point3; 2],
}

impl Aabb {
    /// The empty box: +inf mins, -inf maxes. Unions with it are identity.
    #[inline]
    pub fn new() -> Self {
        Self {
            extents: [
                Vec3::repeat(f32::INFINITY).into(),
                Vec3::repeat(f32::NEG_INFINITY).into(),
            ],
        }
    }

    pub fn from_points<'a, Iter>(points: Iter) -> Self
    where
        Iter: IntoIterator<Item = &'a Point3>,
    {
        let mut aabb = Self::new();
        for point in points {
            aabb.extend(point);
        }
        aabb
    }

    #[inline]
    pub fn min(&self) -> Point3 {
        self.extents[0]
    }

    #[inline]
    pub fn max(&self) -> Point3 {
        self.extents[1]
    }

    #[inline]
    pub fn extents(&self) -> Vec3 {
        self.max() - self.min()
    }

    #[inline]
    pub fn longest_axis(&self) -> usize {
        let (axis, _) = self.extents().argmax();
        axis
    }

    pub fn extend(&mut self, point: &Point3) {
        self.extents[0] = self.min().coords.inf(&point.coords).into();
        self.extents[1] = self.max().coords.sup(&point.coords).into();
    }

    pub fn merged(&self, other: &Aabb) -> Self {
        Self {
            extents: [self.min().inf(&other.min()), self.max().sup(&other.max())],
        }
    }

    /// Inclusive on all six planes.
    #[inline]
    pub fn contains_point(&self, point: &Point3) -> bool {
        let mn = self.min();
        let mx = self.max();
        point.x >= mn.x
            && point.x <= mx.x
            && point.y >= mn.y
            && point.y <= mx.y
            && point.z >= mn.z
            && point.z <= mx.z
    }

    pub fn contains_box(&self, other: &Aabb) -> bool {
        self.contains_point(&other.min()) && self.contains_point(&other.max())
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new()
    }
}

//
// Tests
//
