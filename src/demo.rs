use super::*;

// Built-in demo content for the binary: the classic Cornell box with a
// mirror block, a glossy block and a glass pane. Authored in code; loading
// scenes from files is a host concern this binary does not take on.

fn quad(corners: [Point3; 4], facing: Vec3) -> Vec<[Vertex; 3]> {
    let normal = Normal::new_normalize(facing);
    let uvs = [
        point![0.0, 0.0],
        point![1.0, 0.0],
        point![1.0, 1.0],
        point![0.0, 1.0],
    ];
    let vertex = |index: usize| Vertex {
        position: corners[index],
        normal,
        tex_coord: uvs[index],
    };
    vec![
        [vertex(0), vertex(1), vertex(2)],
        [vertex(0), vertex(2), vertex(3)],
    ]
}

fn wall(name: &str, corners: [Point3; 4], facing: Vec3, material: Material) -> ObjectDesc {
    ObjectDesc {
        name: name.to_owned(),
        triangles: quad(corners, facing),
        material,
        is_light: false,
        radiance: ColorRgb::BLACK,
    }
}

/// Axis-aligned block spanning `min..max`, outward normals.
fn block(name: &str, min: Point3, max: Point3, material: Material) -> ObjectDesc {
    let mut triangles = Vec::with_capacity(12);
    // x faces.
    triangles.extend(quad(
        [
            point![min.x, min.y, min.z],
            point![min.x, max.y, min.z],
            point![min.x, max.y, max.z],
            point![min.x, min.y, max.z],
        ],
        vector![-1.0, 0.0, 0.0],
    ));
    triangles.extend(quad(
        [
            point![max.x, min.y, min.z],
            point![max.x, max.y, min.z],
            point![max.x, max.y, max.z],
            point![max.x, min.y, max.z],
        ],
        vector![1.0, 0.0, 0.0],
    ));
    // y faces.
    triangles.extend(quad(
        [
            point![min.x, min.y, min.z],
            point![max.x, min.y, min.z],
            point![max.x, min.y, max.z],
            point![min.x, min.y, max.z],
        ],
        vector![0.0, -1.0, 0.0],
    ));
    triangles.extend(quad(
        [
            point![min.x, max.y, min.z],
            point![max.x, max.y, min.z],
            point![max.x, max.y, max.z],
            point![min.x, max.y, max.z],
        ],
        vector![0.0, 1.0, 0.0],
    ));
    // z faces.
    triangles.extend(quad(
        [
            point![min.x, min.y, min.z],
            point![max.x, min.y, min.z],
            point![max.x, max.y, min.z],
            point![min.x, max.y, min.z],
        ],
        vector![0.0, 0.0, -1.0],
    ));
    triangles.extend(quad(
        [
            point![min.x, min.y, max.z],
            point![max.x, min.y, max.z],
            point![max.x, max.y, max.z],
            point![min.x, max.y, max.z],
        ],
        vector![0.0, 0.0, 1.0],
    ));
    ObjectDesc {
        name: name.to_owned(),
        triangles,
        material,
        is_light: false,
        radiance: ColorRgb::BLACK,
    }
}

fn checker_texture() -> Texture {
    const SIZE: u32 = 8;
    let mut pixels = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let value = if (x + y) % 2 == 0 { 230 } else { 150 };
            pixels.extend_from_slice(&[value, value, value, 255]);
        }
    }
    Texture::new(SIZE, SIZE, pixels).expect("Checker texture is well-formed")
}

pub fn cornell_box(width: u32, height: u32) -> SceneDesc {
    let white = || Material::diffuse("white", ColorRgb::new(0.73, 0.73, 0.73));
    let red = Material::diffuse("red", ColorRgb::new(0.65, 0.05, 0.05));
    let green = Material::diffuse("green", ColorRgb::new(0.12, 0.45, 0.15));
    let mut checkered = white();
    checkered.diffuse_texture = Some(0);

    let mut objects = vec![
        wall(
            "floor",
            [
                point![0.0, 0.0, 0.0],
                point![555.0, 0.0, 0.0],
                point![555.0, 0.0, 555.0],
                point![0.0, 0.0, 555.0],
            ],
            vector![0.0, 1.0, 0.0],
            checkered,
        ),
        wall(
            "ceiling",
            [
                point![0.0, 555.0, 0.0],
                point![555.0, 555.0, 0.0],
                point![555.0, 555.0, 555.0],
                point![0.0, 555.0, 555.0],
            ],
            vector![0.0, -1.0, 0.0],
            white(),
        ),
        wall(
            "back",
            [
                point![0.0, 0.0, 555.0],
                point![555.0, 0.0, 555.0],
                point![555.0, 555.0, 555.0],
                point![0.0, 555.0, 555.0],
            ],
            vector![0.0, 0.0, -1.0],
            white(),
        ),
        // Looking down +z with +y up, the viewer's left is +x.
        wall(
            "red-wall",
            [
                point![555.0, 0.0, 0.0],
                point![555.0, 555.0, 0.0],
                point![555.0, 555.0, 555.0],
                point![555.0, 0.0, 555.0],
            ],
            vector![-1.0, 0.0, 0.0],
            red,
        ),
        wall(
            "green-wall",
            [
                point![0.0, 0.0, 0.0],
                point![0.0, 555.0, 0.0],
                point![0.0, 555.0, 555.0],
                point![0.0, 0.0, 555.0],
            ],
            vector![1.0, 0.0, 0.0],
            green,
        ),
        block(
            "tall-block",
            point![265.0, 0.0, 296.0],
            point![430.0, 330.0, 472.0],
            Material::specular("mirror", ColorRgb::new(0.9, 0.9, 0.9)),
        ),
        block(
            "short-block",
            point![130.0, 0.0, 65.0],
            point![290.0, 165.0, 230.0],
            Material::glossy(
                "paint",
                ColorRgb::new(0.2, 0.3, 0.55),
                ColorRgb::new(0.35, 0.35, 0.35),
                60.0,
            ),
        ),
        block(
            "glass-pane",
            point![60.0, 0.0, 120.0],
            point![75.0, 300.0, 360.0],
            Material::refractive("glass", ColorRgb::WHITE, 1.5),
        ),
    ];

    let mut light = wall(
        "light",
        [
            point![213.0, 554.0, 227.0],
            point![343.0, 554.0, 227.0],
            point![343.0, 554.0, 332.0],
            point![213.0, 554.0, 332.0],
        ],
        vector![0.0, -1.0, 0.0],
        white(),
    );
    light.is_light = true;
    light.radiance = ColorRgb::new(17.0, 12.0, 4.0);
    objects.push(light);

    SceneDesc {
        name: "cornell".to_owned(),
        camera: Camera {
            width,
            height,
            fov_deg: 40.0,
            position: point![278.0, 273.0, -800.0],
            look_at: point![278.0, 273.0, 0.0],
            up: vector![0.0, 1.0, 0.0],
            kind: CameraKind::Perspective,
        },
        textures: vec![checker_texture()],
        ambient: ColorRgb::BLACK,
        objects,
    }
}

//
// Tests
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cornell_box_is_a_valid_scene() {
        let desc = cornell_box(64, 64);
        assert!(desc.validate().is_ok());
        assert_eq!(desc.objects.iter().filter(|object| object.is_light).count(), 1);
    }

    #[test]
    fn test_orthographic_cameras_are_rejected_by_the_renderer() {
        let mut desc = cornell_box(8, 8);
        desc.camera.kind = CameraKind::Orthographic;
        assert!(desc.validate().is_ok());
        assert!(cpupt::Scene::create(&desc).is_err());
    }
}
