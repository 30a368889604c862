use super::*;

/// A ray with its current best hit distance. Traversal shrinks `t` as closer
/// hits are found, which in turn tightens the AABB rejection test.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Point3,
    pub dir: Normal,
    pub t: f32,
}

impl Ray {
    pub fn new(origin: Point3, dir: Normal) -> Self {
        Self {
            origin,
            dir,
            t: f32::INFINITY,
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + t * self.dir.into_inner()
    }

    /// Möller-Trumbore test against a triangle. Returns the hit distance and
    /// the barycentric weights of the three vertices.
    ///
    /// Back faces are culled: an emissive surface seen from behind would
    /// otherwise self-illuminate. Refraction re-orients normals itself.
    pub fn hit_triangle(&self, triangle: &Triangle) -> Option<(f32, Vec3)> {
        const DET_EPSILON: f32 = 1e-8;

        if self.dir.dot(&triangle.normal) >= 0.0 {
            return None;
        }

        let s = self.origin - triangle.vertices[0].position;
        let s1 = self.dir.cross(&triangle.edge2);
        let s2 = s.cross(&triangle.edge1);
        let det = s1.dot(&triangle.edge1);
        if det.abs() < DET_EPSILON {
            return None;
        }

        let t = s2.dot(&triangle.edge2) / det;
        let b1 = s1.dot(&s) / det;
        let b2 = s2.dot(&self.dir) / det;
        let b0 = 1.0 - b1 - b2;
        if t < 0.0 {
            return None;
        }
        if b0 < 0.0 || b1 < 0.0 || b2 < 0.0 || b0 > 1.0 || b1 > 1.0 || b2 > 1.0 {
            return None;
        }

        Some((t, vector![b0, b1, b2]))
    }

    /// Slab test. A box further away than the current best hit is a miss.
    pub fn hits_aabb(&self, aabb: &Aabb) -> bool {
        if aabb.contains_point(&self.origin) {
            return true;
        }

        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        for axis in 0..3 {
            let mut t_min = (aabb.min()[axis] - self.origin[axis]) / self.dir[axis];
            let mut t_max = (aabb.max()[axis] - self.origin[axis]) / self.dir[axis];
            if self.dir[axis] < 0.0 {
                mem::swap(&mut t_min, &mut t_max);
            }
            t_enter = t_enter.max(t_min);
            t_exit = t_exit.min(t_max);
        }

        t_enter <= t_exit && t_enter >= 0.0 && t_enter < self.t
    }
}

//
// Tests
//
