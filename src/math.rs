use super::*;

pub type Vec3 = na::Vector3<f32>;
pub type Point2 = na::Point2<f32>;
pub type Point3 = na::Point3<f32>;
pub type Normal = na::Unit<na::Vector3<f32>>;

//
// Geometric
//

/// Mirrors `v` about `n`. `v` points into the surface, `n` is unit length.
pub fn reflect_vector(v: &Vec3, n: &Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

//
// Tests
//
