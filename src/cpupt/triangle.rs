use super::*;

#[derive(Clone, Debug)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    pub edge1: Vec3,
    pub edge2: Vec3,
    pub normal: Normal,
    pub area: f32,
    pub bounds: Aabb,
}

impl Triangle {
    /// Precomputes edges, the geometric normal, area and bounds. The
    /// geometric normal is flipped, if needed, to agree with the mean of the
    /// shading normals. Degenerate triangles are rejected.
    pub fn new(vertices: [Vertex; 3]) -> Result<Self> {
        let edge1 = vertices[1].position - vertices[0].position;
        let edge2 = vertices[2].position - vertices[0].position;
        let cross = edge1.cross(&edge2);
        let area = 0.5 * cross.norm();
        ensure!(
            area.is_finite() && area > 0.0,
            "degenerate triangle at {:?}",
            vertices[0].position
        );

        let mean_shading_normal = vertices[0].normal.into_inner()
            + vertices[1].normal.into_inner()
            + vertices[2].normal.into_inner();
        let mut normal = Normal::new_normalize(cross);
        if normal.dot(&mean_shading_normal) < 0.0 {
            normal = -normal;
        }

        let bounds = Aabb::from_points(vertices.iter().map(|vertex| &vertex.position));

        Ok(Self {
            vertices,
            edge1,
            edge2,
            normal,
            area,
            bounds,
        })
    }

    pub fn interpolated_normal(&self, barycentrics: &Vec3) -> Normal {
        Normal::new_normalize(
            self.vertices[0].normal.into_inner() * barycentrics.x
                + self.vertices[1].normal.into_inner() * barycentrics.y
                + self.vertices[2].normal.into_inner() * barycentrics.z,
        )
    }

    pub fn interpolated_tex_coord(&self, barycentrics: &Vec3) -> Point2 {
        Point2::from(
            self.vertices[0].tex_coord.coords * barycentrics.x
                + self.vertices[1].tex_coord.coords * barycentrics.y
                + self.vertices[2].tex_coord.coords * barycentrics.z,
        )
    }

    /// Uniform point on the surface with density `1 / area`.
    pub fn sample(&self, uniform: &mut UniformSampler) -> (Point3, f32) {
        let u = uniform.sample().sqrt();
        let v = uniform.sample();
        let point = Point3::from(
            self.vertices[0].position.coords * (1.0 - u)
                + self.vertices[1].position.coords * (u * (1.0 - v))
                + self.vertices[2].position.coords * (u * v),
        );
        (point, 1.0 / self.area)
    }
}

//
// Tests
//
