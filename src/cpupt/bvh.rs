use super::*;

// Flat array of nodes, root at index 0, children always at larger indices.
// The same structure backs both levels: leaves hold triangles in the
// per-object hierarchy and object references in the scene hierarchy.

pub trait Primitive {
    fn bounds(&self) -> Aabb;
    fn area(&self) -> f32;
}

impl Primitive for Triangle {
    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn area(&self) -> f32 {
        self.area
    }
}

#[derive(Clone, Debug)]
pub struct Node<T> {
    pub bounds: Aabb,
    pub area: f32,
    pub kind: NodeKind<T>,
}

#[derive(Clone, Debug)]
pub enum NodeKind<T> {
    Leaf(T),
    Inner { left: u32, right: u32 },
}

#[derive(Clone, Debug)]
pub struct Bvh<T> {
    pub nodes: Vec<Node<T>>,
}

impl<T: Primitive> Bvh<T> {
    /// Top-down median-split build. Deterministic: the split axis is the
    /// longest axis of the node bounds and the sort is stable.
    pub fn build(items: Vec<T>) -> Self {
        assert!(!items.is_empty(), "BVH build requires at least one item");
        let mut slots = Vec::with_capacity(2 * items.len() - 1);
        slots.push(None);
        build_node(&mut slots, 0, items);
        let nodes = slots
            .into_iter()
            .map(|slot| slot.expect("Unfilled BVH node"))
            .collect();
        Self { nodes }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.nodes[0].bounds
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.nodes[0].area
    }
}

fn build_node<T: Primitive>(slots: &mut Vec<Option<Node<T>>>, index: usize, mut items: Vec<T>) {
    let bounds = items
        .iter()
        .fold(Aabb::new(), |bounds, item| bounds.merged(&item.bounds()));
    let area = items.iter().map(Primitive::area).sum();

    if items.len() == 1 {
        let item = items.pop().expect("Leaf item");
        slots[index] = Some(Node {
            bounds,
            area,
            kind: NodeKind::Leaf(item),
        });
        return;
    }

    // Children are appended before recursing, so every child index points
    // forward in the array and the root stays at 0.
    let left = slots.len();
    slots.push(None);
    let right = slots.len();
    slots.push(None);

    if items.len() == 2 {
        let second = items.pop().expect("Pair item");
        let first = items.pop().expect("Pair item");
        build_node(slots, left, vec![first]);
        build_node(slots, right, vec![second]);
    } else {
        let axis = bounds.longest_axis();
        items.sort_by(|a, b| {
            a.bounds().min()[axis]
                .partial_cmp(&b.bounds().min()[axis])
                .expect("Unable to compare floats")
        });
        let right_items = items.split_off(items.len() / 2);
        build_node(slots, left, items);
        build_node(slots, right, right_items);
    }

    debug_assert!(
        bounds.contains_box(&slots[left].as_ref().expect("Child is built").bounds)
            && bounds.contains_box(&slots[right].as_ref().expect("Child is built").bounds)
    );

    slots[index] = Some(Node {
        bounds,
        area,
        kind: NodeKind::Inner {
            left: left as u32,
            right: right as u32,
        },
    });
}

//
// Triangle-level queries
//

#[derive(Clone, Copy, Debug)]
pub struct TriangleHit {
    pub t: f32,
    pub point: Point3,
    pub normal: Normal,
    pub tex_coord: Point2,
}

impl Bvh<Triangle> {
    pub fn intersect(&self, ray: &mut Ray) -> Option<TriangleHit> {
        self.traverse(0, ray)
    }

    fn traverse(&self, index: u32, ray: &mut Ray) -> Option<TriangleHit> {
        let node = &self.nodes[index as usize];
        if !ray.hits_aabb(&node.bounds) {
            return None;
        }
        match &node.kind {
            NodeKind::Leaf(triangle) => {
                let (t, barycentrics) = ray.hit_triangle(triangle)?;
                ray.t = ray.t.min(t);
                Some(TriangleHit {
                    t,
                    point: ray.at(t),
                    normal: triangle.interpolated_normal(&barycentrics),
                    tex_coord: triangle.interpolated_tex_coord(&barycentrics),
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

    /// Area-weighted uniform point on the surface. Descends by child areas,
    /// samples the leaf triangle, and rescales the leaf density by the leaf
    /// selection probability, giving `1 / total area` overall.
    pub fn sample(&self, uniform: &mut UniformSampler) -> (Point3, Normal, f32) {
        let mut p = uniform.sample() * self.area();
        let mut index = 0;
        loop {
            let node = &self.nodes[index];
            match &node.kind {
                NodeKind::Leaf(triangle) => {
                    let (point, pdf) = triangle.sample(uniform);
                    return (point, triangle.normal, pdf * node.area / self.area());
                }
                NodeKind::Inner { left, right } => {
                    let left_area = self.nodes[*left as usize].area;
                    if p < left_area {
                        index = *left as usize;
                    } else {
                        p -= left_area;
                        index = *right as usize;
                    }
                }
            }
        }
    }
}

//
// Tests
//
