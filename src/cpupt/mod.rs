use super::*;

mod aabb;
mod bvh;
mod material;
mod ray;
mod sampling;
mod triangle;

use aabb::*;
use bvh::*;
use ray::*;
use sampling::*;
use triangle::*;

// Shadow rays accept a blocker this close to the sampled light point as the
// light itself.
const SHADOW_EPSILON: f32 = 1e-3;

//
// Params
//

pub struct Params {
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub seed: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            samples_per_pixel: 64,
            max_depth: 5,
            seed: 0,
        }
    }
}

//
// Scene
//

struct SceneObject {
    name: String,
    material: Material,
    bvh: Bvh<Triangle>,
    is_light: bool,
    radiance: ColorRgb,
}

#[derive(Clone, Copy, Debug)]
struct ObjectRef {
    index: u32,
    bounds: Aabb,
    area: f32,
}

impl Primitive for ObjectRef {
    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn area(&self) -> f32 {
        self.area
    }
}

#[derive(Clone, Copy, Debug)]
struct SurfaceHit {
    t: f32,
    point: Point3,
    normal: Normal,
    tex_coord: Point2,
    object: u32,
}

struct LightSample {
    point: Point3,
    normal: Normal,
    object: u32,
    pdf: f32,
}

/// The render-ready scene: per-object triangle hierarchies under an object
/// hierarchy, plus the emissive-object table. Immutable once created, so
/// worker threads share it freely.
pub struct Scene {
    camera: Camera,
    objects: Vec<SceneObject>,
    bvh: Bvh<ObjectRef>,
    lights: Vec<u32>,
    light_area: f32,
    ambient: ColorRgb,
    textures: Vec<Texture>,
}

impl Scene {
    pub fn create(desc: &SceneDesc) -> Result<Self> {
        let timer = Instant::now();

        desc.validate()?;
        ensure!(
            desc.camera.kind == CameraKind::Perspective,
            "scene {}: only perspective cameras are supported",
            desc.name
        );

        let mut objects = Vec::with_capacity(desc.objects.len());
        let mut triangle_count = 0;
        for object in &desc.objects {
            let triangles = object
                .triangles
                .iter()
                .map(|vertices| Triangle::new(*vertices))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("object {}", object.name))?;
            triangle_count += triangles.len();
            objects.push(SceneObject {
                name: object.name.clone(),
                material: object.material.clone(),
                bvh: Bvh::build(triangles),
                is_light: object.is_light,
                radiance: object.radiance,
            });
        }
        for object in &objects {
            debug!(
                "Object {:?}: {} nodes, area {:.03}",
                object.name,
                object.bvh.nodes.len(),
                object.bvh.area()
            );
        }

        let object_refs = objects
            .iter()
            .enumerate()
            .map(|(index, object)| ObjectRef {
                index: index as u32,
                bounds: object.bvh.bounds(),
                area: object.bvh.area(),
            })
            .collect::<Vec<_>>();
        let bvh = Bvh::build(object_refs);

        let lights = objects
            .iter()
            .enumerate()
            .filter(|(_, object)| object.is_light)
            .map(|(index, _)| index as u32)
            .collect::<Vec<_>>();
        let light_area = lights
            .iter()
            .map(|&index| objects[index as usize].bvh.area())
            .sum();

        info!(
            "Built scene {:?}: {} objects, {triangle_count} triangles, {} lights in {:.03} s",
            desc.name,
            objects.len(),
            lights.len(),
            timer.elapsed().as_secs_f64()
        );

        Ok(Self {
            camera: desc.camera.clone(),
            objects,
            bvh,
            lights,
            light_area,
            ambient: desc.ambient,
            textures: desc.textures.clone(),
        })
    }

    fn intersect(&self, ray: &mut Ray) -> Option<SurfaceHit> {
        self.traverse(0, ray)
    }

    fn traverse(&self, index: u32, ray: &mut Ray) -> Option<SurfaceHit> {
        let node = &self.bvh.nodes[index as usize];
        if !ray.hits_aabb(&node.bounds) {
            return None;
        }
        match &node.kind {
            NodeKind::Leaf(object_ref) => {
                let object = &self.objects[object_ref.index as usize];
                // Authoring convention: "Blinds" occluders exist for the
                // rasterizer only and are invisible to rays.
                if object.material.name == "Blinds" {
                    return None;
                }
                let hit = object.bvh.intersect(ray)?;
                Some(SurfaceHit {
                    t: hit.t,
                    point: hit.point,
                    normal: hit.normal,
                    tex_coord: hit.tex_coord,
                    object: object_ref.index,
                })
            }
            NodeKind::Inner { left, right } => {
                let left_hit = self.traverse(*left, ray);
                let right_hit = self.traverse(*right, ray);
                match (left_hit, right_hit) {
                    (Some(lhs), Some(rhs)) => Some(if rhs.t < lhs.t { rhs } else { lhs }),
                    (hit, None) | (None, hit) => hit,
                }
            }
        }
    }

    /// Picks an emissive object with probability proportional to its area,
    /// then a uniform point on it. The combined density is 1 / total light
    /// area.
    fn sample_light(&self, uniform: &mut UniformSampler) -> Option<LightSample> {
        if self.lights.is_empty() {
            return None;
        }

        let p = uniform.sample() * self.light_area;
        let mut accumulated = 0.0;
        let mut chosen = *self.lights.last().expect("Lights are non-empty");
        for &index in &self.lights {
            accumulated += self.objects[index as usize].bvh.area();
            if p <= accumulated {
                chosen = index;
                break;
            }
        }

        let object = &self.objects[chosen as usize];
        let (point, normal, pdf) = object.bvh.sample(uniform);
        Some(LightSample {
            point,
            normal,
            object: chosen,
            pdf: pdf * object.bvh.area() / self.light_area,
        })
    }
}

//
// Integrator
//

/// Estimates the radiance arriving along `ray`.
///
/// Iterative form: each scattering bounce pushes its direct-light estimate
/// together with the coefficient that scales everything behind it, and the
/// stack is folded back toward the camera at the end. Termination is the
/// fixed bounce budget only; there is no Russian roulette.
fn shade(scene: &Scene, mut ray: Ray, max_depth: u32, uniform: &mut UniformSampler) -> ColorRgb {
    let mut stack = Vec::with_capacity(max_depth as usize + 1);
    let mut depth = 0;
    let mut delta_path = true;

    loop {
        let Some(hit) = scene.intersect(&mut ray) else {
            stack.push((scene.ambient, ColorRgb::BLACK));
            break;
        };
        let object = &scene.objects[hit.object as usize];

        if object.is_light {
            // Seen directly or through a chain of mirrors the emitter is the
            // answer; behind a scattering bounce its contribution was
            // already taken by that bounce's light sample.
            if delta_path {
                return object.radiance;
            }
            stack.push((scene.ambient, ColorRgb::BLACK));
            break;
        }

        let material = &object.material;
        let point = hit.point;
        let normal = hit.normal;
        let wo = -ray.dir;
        let tex_color = material
            .diffuse_texture
            .map(|texture| scene.textures[texture as usize].sample(hit.tex_coord));

        if material.is_delta() {
            let wi = match material.kind {
                MaterialKind::Refraction
                    if uniform.sample() < material.fresnel(&wo, &normal) =>
                {
                    Normal::new_normalize(reflect_vector(&ray.dir, &normal))
                }
                _ => material.sample(&wo, &normal, uniform),
            };
            ray = Ray::new(point, wi);
        } else {
            delta_path = false;

            let mut direct = ColorRgb::BLACK;
            if let Some(light) = scene.sample_light(uniform) {
                let to_light = light.point - point;
                let distance = to_light.norm();
                let ws = Normal::new_normalize(to_light);
                let mut shadow_ray = Ray::new(point, ws);
                let blocker_t = scene
                    .intersect(&mut shadow_ray)
                    .map_or(f32::INFINITY, |blocker| blocker.t);
                if blocker_t - distance > -SHADOW_EPSILON {
                    let emitter = &scene.objects[light.object as usize];
                    let cos_surface = normal.dot(&ws).max(0.0);
                    let cos_light = (-light.normal.dot(&ws)).max(0.0);
                    direct = emitter.radiance
                        * material.evaluate(&wo, &ws, &normal, tex_color)
                        * (cos_surface * cos_light / (distance * distance * light.pdf));
                }
            }

            let wi = material.sample(&wo, &normal, uniform);
            let coefficient = material.evaluate(&wo, &wi, &normal, tex_color)
                * (normal.dot(&wi).max(0.0) / material.pdf());
            stack.push((direct, coefficient));
            ray = Ray::new(point, wi);
        }

        depth += 1;
        if depth >= max_depth {
            stack.push((ColorRgb::BLACK, ColorRgb::BLACK));
            break;
        }
    }

    // Fold the path back toward the camera.
    let (mut color, _) = stack
        .pop()
        .expect("The path stack ends with a terminal entry");
    while let Some((direct, coefficient)) = stack.pop() {
        color = direct + color * coefficient;
    }
    debug_assert!(color.is_finite(), "radiance={color}");
    color
}

//
// Framebuffer driver
//

pub fn render(scene: &Scene, params: &Params) -> Vec<ColorRgb> {
    render_with_cancel(scene, params, &AtomicBool::new(false))
}

/// Renders the framebuffer, pixels in parallel. The cancellation flag is
/// checked once per pixel; pixels not visited before cancellation stay
/// black.
pub fn render_with_cancel(scene: &Scene, params: &Params, cancel: &AtomicBool) -> Vec<ColorRgb> {
    assert!(params.samples_per_pixel > 0, "samples_per_pixel must be positive");
    assert!(params.max_depth > 0, "max_depth must be positive");

    let width = scene.camera.width;
    let height = scene.camera.height;
    let plane = ImagePlane::new(&scene.camera);
    let timer = Instant::now();

    let mut framebuffer = vec![ColorRgb::BLACK; (width * height) as usize];
    framebuffer
        .par_iter_mut()
        .enumerate()
        .for_each(|(pixel_index, pixel)| {
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            let pixel_x = pixel_index as u32 % width;
            let pixel_y = pixel_index as u32 / width;
            let mut uniform = UniformSampler::with_seed(
                params.seed ^ (pixel_index as u64).wrapping_mul(0x9e3779b97f4a7c15),
            );
            let ray = plane.primary_ray(pixel_x, pixel_y);
            let mut accumulated = ColorRgb::BLACK;
            for _ in 0..params.samples_per_pixel {
                accumulated += shade(scene, ray, params.max_depth, &mut uniform);
            }
            *pixel = accumulated / params.samples_per_pixel as f32;
        });

    let elapsed = timer.elapsed().as_secs_f64();
    let rays =
        u64::from(width) * u64::from(height) * u64::from(params.samples_per_pixel);
    info!(
        "Rendering took {:.03} s, {:.03} rays/s",
        elapsed,
        rays as f64 / elapsed
    );

    framebuffer
}

//
// Tests
//

#[cfg(test)]
mod tests {
    use super::*;

    const AMBIENT: ColorRgb = ColorRgb::new(0.5, 0.5, 0.5);
    const EMISSION: ColorRgb = ColorRgb::new(10.0, 10.0, 10.0);

    fn camera(width: u32, height: u32, position: Point3, look_at: Point3) -> Camera {
        Camera {
            width,
            height,
            fov_deg: 60.0,
            position,
            look_at,
            up: vector![0.0, 1.0, 0.0],
            kind: CameraKind::Perspective,
        }
    }

    /// Rectangle `corners = [a, b, c, d]` split into two triangles, all
    /// shading normals `facing`.
    fn quad(name: &str, corners: [Point3; 4], facing: Vec3, material: Material) -> ObjectDesc {
        let normal = Normal::new_normalize(facing);
        let vertex = |position: Point3| Vertex {
            position,
            normal,
            tex_coord: Point2::origin(),
        };
        let [a, b, c, d] = corners;
        ObjectDesc {
            name: name.to_owned(),
            triangles: vec![
                [vertex(a), vertex(b), vertex(c)],
                [vertex(a), vertex(c), vertex(d)],
            ],
            material,
            is_light: false,
            radiance: ColorRgb::BLACK,
        }
    }

    fn emissive(mut object: ObjectDesc, radiance: ColorRgb) -> ObjectDesc {
        object.is_light = true;
        object.radiance = radiance;
        object
    }

    /// Unit-ish quad at `z`, facing the -z camera side.
    fn facing_quad(name: &str, half: f32, z: f32, material: Material) -> ObjectDesc {
        quad(
            name,
            [
                point![-half, -half, z],
                point![half, -half, z],
                point![half, half, z],
                point![-half, half, z],
            ],
            vector![0.0, 0.0, -1.0],
            material,
        )
    }

    fn scene_desc(name: &str, camera: Camera, objects: Vec<ObjectDesc>) -> SceneDesc {
        SceneDesc {
            name: name.to_owned(),
            camera,
            objects,
            textures: vec![],
            ambient: AMBIENT,
        }
    }

    fn render_once(desc: &SceneDesc, max_depth: u32) -> Vec<ColorRgb> {
        let scene = Scene::create(desc).unwrap();
        render(
            &scene,
            &Params {
                samples_per_pixel: 1,
                max_depth,
                seed: 0,
            },
        )
    }

    fn center_pixel(frame: &[ColorRgb], camera: &Camera) -> ColorRgb {
        frame[((camera.height / 2) * camera.width + camera.width / 2) as usize]
    }

    #[test]
    fn test_unlit_triangle_is_black_and_miss_is_ambient() {
        // One diffuse triangle, no lights, a single bounce: the direct
        // estimate has nothing to sample and the bounce budget ends the
        // path, so hit pixels are exactly zero while misses see the
        // environment unchanged.
        let camera = camera(3, 3, Point3::origin(), point![0.0, 0.0, 2.0]);
        let desc = scene_desc(
            "unlit",
            camera.clone(),
            vec![facing_quad(
                "panel",
                0.5,
                2.0,
                Material::diffuse("white", ColorRgb::new(0.7, 0.7, 0.7)),
            )],
        );
        let frame = render_once(&desc, 1);
        assert_eq!(center_pixel(&frame, &camera), ColorRgb::BLACK);
        assert_eq!(frame[0], AMBIENT);
        assert_eq!(frame[8], AMBIENT);
    }

    #[test]
    fn test_first_hit_emission_is_returned_exactly() {
        let camera = camera(3, 3, Point3::origin(), point![0.0, 0.0, 2.0]);
        let desc = scene_desc(
            "emitter",
            camera.clone(),
            vec![emissive(
                facing_quad("lamp", 0.5, 2.0, Material::diffuse("lamp", ColorRgb::BLACK)),
                EMISSION,
            )],
        );
        let frame = render_once(&desc, 1);
        assert_eq!(center_pixel(&frame, &camera), EMISSION);
        assert_eq!(frame[0], AMBIENT);
    }

    #[test]
    fn test_mirror_sees_emitter_within_depth_budget() {
        // Mirror panel ahead, emissive wall behind the camera. The mirror
        // bounce carries no direct estimate of its own, so the emitter only
        // shows up if the budget allows the second hit.
        let camera = camera(3, 3, Point3::origin(), point![0.0, 0.0, 2.0]);
        let mirror = facing_quad("mirror", 2.0, 2.0, Material::specular("mirror", ColorRgb::WHITE));
        let wall = emissive(
            quad(
                "wall",
                [
                    point![-4.0, -4.0, -2.0],
                    point![4.0, -4.0, -2.0],
                    point![4.0, 4.0, -2.0],
                    point![-4.0, 4.0, -2.0],
                ],
                vector![0.0, 0.0, 1.0],
                Material::diffuse("wall", ColorRgb::BLACK),
            ),
            EMISSION,
        );
        let mut desc = scene_desc("mirror", camera.clone(), vec![mirror, wall]);
        desc.ambient = ColorRgb::BLACK;

        let deep = render_once(&desc, 3);
        assert_eq!(center_pixel(&deep, &camera), EMISSION);

        // One bounce stops at the mirror and falls back to the (black)
        // environment.
        let shallow = render_once(&desc, 1);
        assert_eq!(center_pixel(&shallow, &camera), ColorRgb::BLACK);
    }

    #[test]
    fn test_blinds_are_invisible_to_rays() {
        let camera = camera(3, 3, Point3::origin(), point![0.0, 0.0, 2.0]);
        let blinds = facing_quad(
            "blinds",
            2.0,
            2.0,
            Material::diffuse("Blinds", ColorRgb::new(0.7, 0.7, 0.7)),
        );
        let lamp = emissive(
            facing_quad("lamp", 2.0, 4.0, Material::diffuse("lamp", ColorRgb::BLACK)),
            EMISSION,
        );
        let desc = scene_desc("blinds", camera.clone(), vec![blinds, lamp]);
        let frame = render_once(&desc, 2);
        assert_eq!(center_pixel(&frame, &camera), EMISSION);
    }

    #[test]
    fn test_cornell_box_statistics() {
        // A small closed box: red wall on the viewer's left (+x), green on
        // the right, white floor/ceiling/back, emissive patch under the
        // ceiling.
        let white = || Material::diffuse("white", ColorRgb::new(0.73, 0.73, 0.73));
        let camera = camera(
            16,
            16,
            point![0.5, 0.5, 0.05],
            point![0.5, 0.5, 1.0],
        );
        let mut desc = scene_desc(
            "cornell",
            camera.clone(),
            vec![
                quad(
                    "floor",
                    [
                        point![0.0, 0.0, 0.0],
                        point![1.0, 0.0, 0.0],
                        point![1.0, 0.0, 1.0],
                        point![0.0, 0.0, 1.0],
                    ],
                    vector![0.0, 1.0, 0.0],
                    white(),
                ),
                quad(
                    "ceiling",
                    [
                        point![0.0, 1.0, 0.0],
                        point![1.0, 1.0, 0.0],
                        point![1.0, 1.0, 1.0],
                        point![0.0, 1.0, 1.0],
                    ],
                    vector![0.0, -1.0, 0.0],
                    white(),
                ),
                quad(
                    "back",
                    [
                        point![0.0, 0.0, 1.0],
                        point![1.0, 0.0, 1.0],
                        point![1.0, 1.0, 1.0],
                        point![0.0, 1.0, 1.0],
                    ],
                    vector![0.0, 0.0, -1.0],
                    white(),
                ),
                quad(
                    "red-wall",
                    [
                        point![1.0, 0.0, 0.0],
                        point![1.0, 1.0, 0.0],
                        point![1.0, 1.0, 1.0],
                        point![1.0, 0.0, 1.0],
                    ],
                    vector![-1.0, 0.0, 0.0],
                    Material::diffuse("red", ColorRgb::new(0.65, 0.05, 0.05)),
                ),
                quad(
                    "green-wall",
                    [
                        point![0.0, 0.0, 0.0],
                        point![0.0, 1.0, 0.0],
                        point![0.0, 1.0, 1.0],
                        point![0.0, 0.0, 1.0],
                    ],
                    vector![1.0, 0.0, 0.0],
                    Material::diffuse("green", ColorRgb::new(0.12, 0.45, 0.15)),
                ),
                emissive(
                    quad(
                        "light",
                        [
                            point![0.35, 0.999, 0.35],
                            point![0.65, 0.999, 0.35],
                            point![0.65, 0.999, 0.65],
                            point![0.35, 0.999, 0.65],
                        ],
                        vector![0.0, -1.0, 0.0],
                        Material::diffuse("lamp", ColorRgb::BLACK),
                    ),
                    EMISSION,
                ),
            ],
        );
        desc.ambient = ColorRgb::BLACK;

        let scene = Scene::create(&desc).unwrap();
        let frame = render(
            &scene,
            &Params {
                samples_per_pixel: 32,
                max_depth: 4,
                seed: 1,
            },
        );

        let mean = |pixels: &[ColorRgb]| {
            pixels.iter().fold(ColorRgb::BLACK, |sum, &c| sum + c) * (1.0 / pixels.len() as f32)
        };

        // Bottom rows see the lit floor: bounded away from dark and from
        // the emitter.
        let floor: Vec<ColorRgb> = (14 * 16..16 * 16).map(|i| frame[i]).collect();
        let floor_mean = mean(&floor);
        assert!(floor_mean.red() > 0.0 && floor_mean.red() < EMISSION.red());
        assert!(floor_mean.green() > 0.0 && floor_mean.green() < EMISSION.green());

        // Wall hues: the viewer's left third leans red, the right third
        // leans green.
        let left: Vec<ColorRgb> = (0..16)
            .flat_map(|row| (0..5).map(move |col| row * 16 + col))
            .map(|i| frame[i])
            .collect();
        let right: Vec<ColorRgb> = (0..16)
            .flat_map(|row| (11..16).map(move |col| row * 16 + col))
            .map(|i| frame[i])
            .collect();
        let left_mean = mean(&left);
        let right_mean = mean(&right);
        assert!(left_mean.red() > left_mean.green(), "left={left_mean}");
        assert!(right_mean.green() > right_mean.red(), "right={right_mean}");
    }

    #[test]
    fn test_two_level_traversal_matches_linear_search() {
        let mut uniform = UniformSampler::with_seed(17);
        let mut random_point = |scale: f32, offset: Vec3| {
            point![
                uniform.sample() * scale + offset.x,
                uniform.sample() * scale + offset.y,
                uniform.sample() * scale + offset.z
            ]
        };

        let mut objects = Vec::new();
        let mut all_triangles: Vec<(u32, [Vertex; 3])> = Vec::new();
        for object_index in 0..64u32 {
            let center = random_point(8.0, vector![-4.0, -4.0, 2.0]).coords;
            let mut triangles = Vec::new();
            while triangles.len() < 4 {
                let a = random_point(1.0, center);
                let b = random_point(1.0, center);
                let c = random_point(1.0, center);
                let winding = (b - a).cross(&(c - a));
                if winding.norm() < 1e-4 {
                    continue;
                }
                let normal = Normal::new_normalize(winding);
                let vertex = |position: Point3| Vertex {
                    position,
                    normal,
                    tex_coord: Point2::origin(),
                };
                let triangle = [vertex(a), vertex(b), vertex(c)];
                triangles.push(triangle);
                all_triangles.push((object_index, triangle));
            }
            objects.push(ObjectDesc {
                name: format!("cloud-{object_index}"),
                triangles,
                material: Material::diffuse("gray", ColorRgb::new(0.5, 0.5, 0.5)),
                is_light: false,
                radiance: ColorRgb::BLACK,
            });
        }

        let camera = camera(2, 2, point![0.0, 0.0, -20.0], Point3::origin());
        let scene = Scene::create(&scene_desc("cloud", camera, objects)).unwrap();

        for _ in 0..256 {
            let origin = point![
                uniform.sample() * 24.0 - 12.0,
                uniform.sample() * 24.0 - 12.0,
                uniform.sample() * 24.0 - 12.0
            ];
            let dir = Normal::new_normalize(vector![
                uniform.sample() - 0.5,
                uniform.sample() - 0.5,
                uniform.sample() - 0.5
            ]);
            let ray = Ray::new(origin, dir);

            let linear_hit = all_triangles
                .iter()
                .filter_map(|(object_index, vertices)| {
                    let triangle = Triangle::new(*vertices).unwrap();
                    ray.hit_triangle(&triangle)
                        .map(|(t, _)| (*object_index, t))
                })
                .min_by(|a, b| a.1.partial_cmp(&b.1).expect("Unable to compare floats"));

            let mut scene_ray = ray;
            let scene_hit = scene.intersect(&mut scene_ray);

            match (linear_hit, scene_hit) {
                (None, None) => {}
                (Some((object_index, t)), Some(hit)) => {
                    assert_eq!(hit.object, object_index);
                    assert_abs_diff_eq!(hit.t, t, epsilon = 1e-5);
                }
                (lhs, rhs) => panic!("linear={lhs:?} bvh={rhs:?} disagree"),
            }
        }
    }

    #[test]
    fn test_textured_albedo_reaches_the_direct_estimate() {
        // Red 1x1 texture on a panel lit head-on by a white emitter behind
        // the camera: the lit pixel picks up the texel hue, not `kd`.
        let camera = camera(3, 3, Point3::origin(), point![0.0, 0.0, 2.0]);
        let mut panel_material = Material::diffuse("paper", ColorRgb::new(0.7, 0.7, 0.7));
        panel_material.diffuse_texture = Some(0);
        let panel = facing_quad("panel", 2.0, 2.0, panel_material);
        let lamp = emissive(
            quad(
                "lamp",
                [
                    point![-4.0, -4.0, -2.0],
                    point![4.0, -4.0, -2.0],
                    point![4.0, 4.0, -2.0],
                    point![-4.0, 4.0, -2.0],
                ],
                vector![0.0, 0.0, 1.0],
                Material::diffuse("lamp", ColorRgb::BLACK),
            ),
            EMISSION,
        );
        let mut desc = scene_desc("textured", camera.clone(), vec![panel, lamp]);
        desc.ambient = ColorRgb::BLACK;
        desc.textures = vec![Texture::new(1, 1, vec![255, 0, 0, 255]).unwrap()];

        let frame = render_once(&desc, 1);
        let pixel = center_pixel(&frame, &camera);
        assert!(pixel.red() > 0.0, "pixel={pixel}");
        assert_eq!(pixel.green(), 0.0);
        assert_eq!(pixel.blue(), 0.0);
    }

    #[test]
    fn test_cancelled_render_leaves_pixels_black() {
        let camera = camera(4, 4, Point3::origin(), point![0.0, 0.0, 2.0]);
        let desc = scene_desc(
            "cancelled",
            camera,
            vec![facing_quad(
                "panel",
                0.5,
                2.0,
                Material::diffuse("white", ColorRgb::new(0.7, 0.7, 0.7)),
            )],
        );
        let scene = Scene::create(&desc).unwrap();
        let cancel = AtomicBool::new(true);
        let frame = render_with_cancel(&scene, &Params::default(), &cancel);
        assert!(frame.iter().all(|&pixel| pixel == ColorRgb::BLACK));
    }
}
