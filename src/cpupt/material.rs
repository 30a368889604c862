use super::*;

// Directional conventions, shared with the integrator:
//
// wi = unit vector from the surface toward the previous bounce
// wo = unit vector from the surface toward the next bounce
// normal = geometric or shading normal at the surface, unit length
//
// The reflectance returned by `evaluate` has max(cos(normal, wo), 0) folded
// in; the integrator multiplies its own cosine on top, on both the direct
// and the indirect side.

impl Material {
    /// Specular and refractive lobes are delta distributions: `evaluate` is
    /// zero for them and their contribution rides on the path throughput.
    #[inline]
    pub fn is_delta(&self) -> bool {
        matches!(self.kind, MaterialKind::Specular | MaterialKind::Refraction)
    }

    /// Draws an outgoing direction for the incident direction `wi`.
    pub fn sample(&self, wi: &Normal, normal: &Normal, uniform: &mut UniformSampler) -> Normal {
        match self.kind {
            MaterialKind::Diffuse => diffuse_sample(normal, uniform),
            MaterialKind::Glossy => glossy_sample(wi, normal, self.ns, uniform),
            MaterialKind::Specular => {
                Normal::new_normalize(reflect_vector(&-wi.into_inner(), normal))
            }
            MaterialKind::Refraction => refraction_sample(wi, normal, self.ni),
        }
    }

    /// Density of `sample`. Delta lobes report 1 and are special-cased by
    /// the caller; the glossy value is the integrator's fixed policy, not an
    /// exact importance-sampling density.
    pub fn pdf(&self) -> f32 {
        match self.kind {
            MaterialKind::Diffuse => 1.0 / (2.0 * PI),
            MaterialKind::Glossy => 1.0 / (2.0 * PI * self.ns) + (1.0 - 1.0 / self.ns),
            MaterialKind::Specular | MaterialKind::Refraction => 1.0,
        }
    }

    /// Reflectance for the pair `(wi, wo)` times max(cos(normal, wo), 0).
    /// `tex_color` replaces `kd` when the material carries a texture.
    pub fn evaluate(
        &self,
        wi: &Normal,
        wo: &Normal,
        normal: &Normal,
        tex_color: Option<ColorRgb>,
    ) -> ColorRgb {
        match self.kind {
            MaterialKind::Diffuse => self.diffuse_term(wo, normal, tex_color),
            MaterialKind::Glossy => {
                let half = Normal::new_normalize(wi.into_inner() + wo.into_inner());
                let specular = self.ks * normal.dot(&half).max(0.0).powf(self.ns);
                self.diffuse_term(wo, normal, tex_color) + specular
            }
            MaterialKind::Specular | MaterialKind::Refraction => ColorRgb::BLACK,
        }
    }

    fn diffuse_term(&self, wo: &Normal, normal: &Normal, tex_color: Option<ColorRgb>) -> ColorRgb {
        let albedo = tex_color.unwrap_or(self.kd);
        albedo * (normal.dot(wo).max(0.0) * INV_PI)
    }

    /// Dielectric Fresnel reflectance in [0, 1]; 1 under total internal
    /// reflection. The side of the interface is read off the sign of
    /// cos(wi, normal).
    pub fn fresnel(&self, wi: &Normal, normal: &Normal) -> f32 {
        let mut cos_i = wi.dot(normal).clamp(-1.0, 1.0);
        let mut eta_i = 1.0;
        let mut eta_t = self.ni;
        if cos_i < 0.0 {
            cos_i = -cos_i;
            mem::swap(&mut eta_i, &mut eta_t);
        }

        let sin_t = eta_i / eta_t * (1.0 - cos_i * cos_i).max(0.0).sqrt();
        if sin_t >= 1.0 {
            return 1.0;
        }

        let cos_t = (1.0 - sin_t * sin_t).max(0.0).sqrt();
        let r_s = (eta_t * cos_i - eta_i * cos_t) / (eta_t * cos_i + eta_i * cos_t);
        let r_p = (eta_i * cos_i - eta_t * cos_t) / (eta_i * cos_i + eta_t * cos_t);
        0.5 * (r_s * r_s + r_p * r_p)
    }
}

/// Cosine-weighted hemisphere around the normal.
fn diffuse_sample(normal: &Normal, uniform: &mut UniformSampler) -> Normal {
    let u = uniform.sample();
    let v = uniform.sample();
    let phi = TAU * u;
    let cos_theta = v.sqrt();
    let sin_theta = (1.0 - v).sqrt();

    let tangent = if normal.z.abs() > 0.999 {
        vector![1.0, 0.0, 0.0]
    } else {
        normal.cross(&Vec3::z()).normalize()
    };
    let bitangent = normal.cross(&tangent);

    Normal::new_normalize(
        tangent * (phi.cos() * sin_theta)
            + bitangent * (phi.sin() * sin_theta)
            + normal.into_inner() * cos_theta,
    )
}

/// Phong lobe around the mirror direction, sharpened by the shininess
/// exponent.
fn glossy_sample(wi: &Normal, normal: &Normal, ns: f32, uniform: &mut UniformSampler) -> Normal {
    let axis = Normal::new_normalize(reflect_vector(&-wi.into_inner(), normal));

    let u = uniform.sample();
    let v = uniform.sample();
    let cos_theta = u.max(1e-6).powf(1.0 / (ns.max(0.0) + 1.0));
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = TAU * v;

    let tangent = if axis.y.abs() > 0.999 {
        vector![1.0, 0.0, 0.0]
    } else {
        axis.cross(&Vec3::y()).normalize()
    };
    let bitangent = tangent.cross(&axis).normalize();

    Normal::new_normalize(
        tangent * (sin_theta * phi.cos())
            + bitangent * (sin_theta * phi.sin())
            + axis.into_inner() * cos_theta,
    )
}

/// Snell transmission. Falls back to mirror reflection under total internal
/// reflection; the Fresnel split between reflection and transmission is the
/// integrator's job.
fn refraction_sample(wi: &Normal, normal: &Normal, ni: f32) -> Normal {
    let d = -wi.into_inner();
    let mut cos_i = wi.dot(normal);
    let mut eta_i = 1.0;
    let mut eta_t = ni;
    let mut n = normal.into_inner();
    if cos_i < 0.0 {
        cos_i = -cos_i;
        n = -n;
        mem::swap(&mut eta_i, &mut eta_t);
    }

    let eta = eta_i / eta_t;
    let sin_i = (1.0 - cos_i * cos_i).max(0.0).sqrt();
    let sin_t = eta * sin_i;
    if sin_t >= 1.0 {
        return Normal::new_normalize(reflect_vector(&d, &n));
    }

    let cos_t = (1.0 - sin_t * sin_t).max(0.0).sqrt();
    Normal::new_normalize(eta * d + (eta * cos_i - cos_t) * n)
}

//
// Tests
//
