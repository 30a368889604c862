use super::*;

//
// Vertex
//

#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    pub position: Point3,
    pub normal: Normal,
    pub tex_coord: Point2,
}

//
// Material
//

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MaterialKind {
    Diffuse,
    Glossy,
    Specular,
    Refraction,
}

#[derive(Clone, Debug)]
pub struct Material {
    pub name: String,
    pub kind: MaterialKind,
    pub ka: ColorRgb,
    pub kd: ColorRgb,
    pub ks: ColorRgb,
    pub tr: ColorRgb,
    pub ns: f32,
    pub ni: f32,
    pub diffuse_texture: Option<u32>,
}

impl Material {
    pub fn diffuse(name: &str, kd: ColorRgb) -> Self {
        Self {
            name: name.to_owned(),
            kind: MaterialKind::Diffuse,
            ka: ColorRgb::BLACK,
            kd,
            ks: ColorRgb::BLACK,
            tr: ColorRgb::BLACK,
            ns: 0.0,
            ni: 1.0,
            diffuse_texture: None,
        }
    }

    pub fn glossy(name: &str, kd: ColorRgb, ks: ColorRgb, ns: f32) -> Self {
        Self {
            kind: MaterialKind::Glossy,
            ks,
            ns,
            ..Self::diffuse(name, kd)
        }
    }

    pub fn specular(name: &str, ks: ColorRgb) -> Self {
        Self {
            kind: MaterialKind::Specular,
            ks,
            ..Self::diffuse(name, ColorRgb::BLACK)
        }
    }

    pub fn refractive(name: &str, tr: ColorRgb, ni: f32) -> Self {
        Self {
            kind: MaterialKind::Refraction,
            tr,
            ni,
            ..Self::diffuse(name, ColorRgb::BLACK)
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (field, coefficient) in [
            ("ka", self.ka),
            ("kd", self.kd),
            ("ks", self.ks),
            ("tr", self.tr),
        ] {
            for channel in [coefficient.red(), coefficient.green(), coefficient.blue()] {
                ensure!(
                    (0.0..=1.0).contains(&channel),
                    "material {}: {field} component {channel} is outside 0..=1",
                    self.name
                );
            }
        }
        ensure!(
            self.ns >= 0.0 && self.ns.is_finite(),
            "material {}: shininess {} is invalid",
            self.name,
            self.ns
        );
        if self.kind == MaterialKind::Glossy {
            ensure!(
                self.ns > 0.0,
                "material {}: glossy materials require a positive shininess",
                self.name
            );
        }
        ensure!(
            self.ni >= 1.0 && self.ni.is_finite(),
            "material {}: refractive index {} is invalid",
            self.name,
            self.ni
        );
        Ok(())
    }
}

//
// Texture
//

#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Texture {
    /// `pixels` is row-major RGBA8.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        ensure!(width > 0 && height > 0, "texture has zero extent");
        ensure!(
            pixels.len() == (width * height * 4) as usize,
            "texture data is {} bytes, expected {}",
            pixels.len(),
            width * height * 4
        );
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Nearest-neighbour lookup with repeat wrapping on both axes.
    pub fn sample(&self, tex_coord: Point2) -> ColorRgb {
        let u = tex_coord.x - tex_coord.x.floor();
        let v = tex_coord.y - tex_coord.y.floor();
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        let index = ((y * self.width + x) * 4) as usize;
        ColorRgb::new(
            f32::from(self.pixels[index]) / 255.0,
            f32::from(self.pixels[index + 1]) / 255.0,
            f32::from(self.pixels[index + 2]) / 255.0,
        )
    }
}

//
// Camera
//

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CameraKind {
    Perspective,
    Orthographic,
}

#[derive(Clone, Debug)]
pub struct Camera {
    pub width: u32,
    pub height: u32,
    pub fov_deg: f32,
    pub position: Point3,
    pub look_at: Point3,
    pub up: Vec3,
    pub kind: CameraKind,
}

impl Camera {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "camera image size {}x{} has zero extent",
            self.width,
            self.height
        );
        ensure!(
            self.fov_deg > 0.0 && self.fov_deg < 180.0,
            "camera field of view {} is outside (0, 180)",
            self.fov_deg
        );
        let view = self.look_at - self.position;
        ensure!(view.norm() > 0.0, "camera looks at its own position");
        ensure!(
            view.cross(&self.up).norm() > 1e-6,
            "camera up vector is parallel to the view direction"
        );
        Ok(())
    }
}

//
// Scene description
//

/// One renderable object: a triangle mesh with a single material.
#[derive(Clone, Debug)]
pub struct ObjectDesc {
    pub name: String,
    pub triangles: Vec<[Vertex; 3]>,
    pub material: Material,
    pub is_light: bool,
    pub radiance: ColorRgb,
}

/// The loader-facing scene record. Everything the renderer consumes is here;
/// how it was produced (file formats, generators) is the loader's business.
#[derive(Clone, Debug)]
pub struct SceneDesc {
    pub name: String,
    pub camera: Camera,
    pub objects: Vec<ObjectDesc>,
    pub textures: Vec<Texture>,
    pub ambient: ColorRgb,
}

impl SceneDesc {
    pub fn validate(&self) -> Result<()> {
        self.camera
            .validate()
            .with_context(|| format!("scene {}", self.name))?;
        ensure!(!self.objects.is_empty(), "scene {} has no objects", self.name);
        for object in &self.objects {
            ensure!(
                !object.triangles.is_empty(),
                "object {} has no triangles",
                object.name
            );
            object
                .material
                .validate()
                .with_context(|| format!("object {}", object.name))?;
            if let Some(texture) = object.material.diffuse_texture {
                ensure!(
                    (texture as usize) < self.textures.len(),
                    "object {} references texture {} but the scene has {}",
                    object.name,
                    texture,
                    self.textures.len()
                );
            }
        }
        Ok(())
    }
}

//
// Tests
//
