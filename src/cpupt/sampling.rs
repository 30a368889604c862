use super::*;

#[derive(Clone)]
pub struct UniformSampler {
    state: rand_pcg::Pcg64Mcg,
    distribution: rand::distributions::Uniform<f32>,
}

impl UniformSampler {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: rand_pcg::Pcg64Mcg::seed_from_u64(seed),
            distribution: rand::distributions::Uniform::new(0.0, 1.0),
        }
    }

    #[inline]
    pub fn sample(&mut self) -> f32 {
        self.distribution.sample(&mut self.state)
    }
}

/// The image plane of a perspective camera, precomputed once per render.
///
/// The plane passes through the look-at point: its local y axis is the
/// normalized up vector, its local x axis is view x up, and its half-extents
/// come from the vertical field of view and the aspect ratio.
pub struct ImagePlane {
    position: Point3,
    top_left: Point3,
    local_x: Vec3,
    local_y: Vec3,
    pixel_step_x: f32,
    pixel_step_y: f32,
}

impl ImagePlane {
    pub fn new(camera: &Camera) -> Self {
        let scale = (camera.fov_deg * PI / 360.0).tan();
        let aspect_ratio = camera.width as f32 / camera.height as f32;
        let view = camera.look_at - camera.position;
        let local_y = camera.up.normalize();
        let local_x = view.cross(&local_y).normalize();
        let half_height = scale * view.norm();
        let half_width = half_height * aspect_ratio;
        let top_left = camera.look_at + local_y * half_height - local_x * half_width;
        Self {
            position: camera.position,
            top_left,
            local_x,
            local_y,
            pixel_step_x: 2.0 * half_width / camera.width as f32,
            pixel_step_y: 2.0 * half_height / camera.height as f32,
        }
    }

    /// Ray through the center of pixel `(pixel_x, pixel_y)`, with `(0, 0)`
    /// the top-left pixel.
    pub fn primary_ray(&self, pixel_x: u32, pixel_y: u32) -> Ray {
        let pixel_center = self.top_left
            - self.local_y * ((pixel_y as f32 + 0.5) * self.pixel_step_y)
            + self.local_x * ((pixel_x as f32 + 0.5) * self.pixel_step_x);
        Ray::new(
            self.position,
            Normal::new_normalize(pixel_center - self.position),
        )
    }
}

//
// Tests
//
