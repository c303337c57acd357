//! Arena-based Barnes-Hut octree.
//!
//! Nodes live contiguously in a `Vec` and refer to their children by
//! `NodeId`. The tree borrows the body slice it was built from and stores only
//! indices into it, so it can never outlive the bodies and is simply dropped
//! and rebuilt when they move.
//!
//! Bodies are inserted one at a time. A leaf keeps its residents until a
//! second body arrives, at which point it splits into eight octants and pushes
//! everything down; aggregate mass and center of mass are updated on the way
//! back up. Below `MAX_DEPTH` no further splitting happens and a leaf may keep
//! several residents (coincident bodies would otherwise recurse forever).
//!
//! # Example
//!
//! ```rust
//! use gravsim::body::Body;
//! use gravsim::octree::Octree;
//! use nalgebra::{Point3, Vector3};
//!
//! let bodies = vec![
//!     Body::new("Sun", 1.989e30, 6.9634e8, Point3::origin(), Vector3::zeros()),
//!     Body::new("Earth", 5.972e24, 6.371e6, Point3::new(1.496e11, 0.0, 0.0), Vector3::zeros()),
//! ];
//!
//! let tree = Octree::build(&bodies, Point3::origin(), 1e12);
//! assert_eq!(tree.total_mass(), 1.989e30 + 5.972e24);
//!
//! let force = tree.force_on(&bodies[1], 0.5, 6.6743e-11);
//! assert!(force.x < 0.0);
//! ```

use nalgebra::{Point3, Vector3};

use crate::body::Body;
use crate::forces::point_mass_acceleration;

/// Deepest level at which a leaf is still split
const MAX_DEPTH: usize = 48;

/// Aggregates lighter than this are treated as empty space
const NEGLIGIBLE_MASS: f64 = f64::MIN_POSITIVE;

/// Index into the node arena
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    fn new(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize, "NodeId overflow");
        NodeId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One cubic cell of the tree
#[derive(Clone, Debug)]
pub struct OctreeNode {
    /// Cube center
    pub center: Point3<f64>,
    /// Cube half-size
    pub size: f64,
    pub total_mass: f64,
    pub center_of_mass: Point3<f64>,
    children: Option<[NodeId; 8]>,
    /// Indices into the body slice; empty once the node is subdivided
    residents: Vec<usize>,
}

impl OctreeNode {
    fn new(center: Point3<f64>, size: f64) -> Self {
        Self {
            center,
            size,
            total_mass: 0.0,
            center_of_mass: center,
            children: None,
            residents: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn children(&self) -> Option<&[NodeId; 8]> {
        self.children.as_ref()
    }

    pub fn residents(&self) -> &[usize] {
        &self.residents
    }

    /// Whether `point` lies inside (or on the boundary of) this cube
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (point - self.center).iter().all(|d| d.abs() <= self.size)
    }

    /// Octant index 0-7: bit 0 for +x, bit 1 for +y, bit 2 for +z
    pub fn octant(&self, point: &Point3<f64>) -> usize {
        let x_bit = (point.x > self.center.x) as usize;
        let y_bit = (point.y > self.center.y) as usize;
        let z_bit = (point.z > self.center.z) as usize;
        x_bit | (y_bit << 1) | (z_bit << 2)
    }

    fn child_center(&self, octant: usize) -> Point3<f64> {
        let half = self.size / 2.0;
        let offset = |bit: usize| if octant & bit != 0 { half } else { -half };
        Point3::new(
            self.center.x + offset(1),
            self.center.y + offset(2),
            self.center.z + offset(4),
        )
    }

    /// Folds a body into the running mass-weighted average
    fn absorb(&mut self, position: Point3<f64>, mass: f64) {
        let combined = self.total_mass + mass;
        if combined != 0.0 {
            self.center_of_mass = Point3::from(
                (self.center_of_mass.coords * self.total_mass + position.coords * mass) / combined,
            );
        }
        self.total_mass = combined;
    }
}

/// Barnes-Hut octree over a borrowed body slice
pub struct Octree<'a> {
    nodes: Vec<OctreeNode>,
    bodies: &'a [Body],
}

impl<'a> Octree<'a> {
    /// Builds the tree by inserting every body, in slice order, into a root
    /// cube with the given center and half-size
    ///
    /// Bodies outside the root cube are still inserted (their octant is chosen
    /// by sign alone); keeping them inside is the caller's concern.
    pub fn build(bodies: &'a [Body], center: Point3<f64>, half_size: f64) -> Self {
        let mut tree = Octree {
            nodes: Vec::with_capacity(bodies.len() * 2 + 1),
            bodies,
        };
        tree.nodes.push(OctreeNode::new(center, half_size));

        for index in 0..bodies.len() {
            tree.insert(NodeId::ROOT, index, 0);
        }

        tree
    }

    fn insert(&mut self, node_id: NodeId, index: usize, depth: usize) {
        let body = &self.bodies[index];
        let (position, mass) = (body.position, body.mass);

        let node = &mut self.nodes[node_id.index()];
        if node.is_leaf() {
            if node.residents.is_empty() {
                node.residents.push(index);
                node.total_mass = mass;
                node.center_of_mass = position;
                return;
            }
            if depth >= MAX_DEPTH {
                node.residents.push(index);
                node.absorb(position, mass);
                return;
            }
        }

        let children = match self.nodes[node_id.index()].children {
            Some(children) => children,
            None => self.subdivide(node_id, depth),
        };
        let octant = self.nodes[node_id.index()].octant(&position);
        self.insert(children[octant], index, depth + 1);

        self.nodes[node_id.index()].absorb(position, mass);
    }

    /// Splits a leaf into eight children and pushes its residents down
    fn subdivide(&mut self, node_id: NodeId, depth: usize) -> [NodeId; 8] {
        let first = self.nodes.len();
        for octant in 0..8 {
            let parent = &self.nodes[node_id.index()];
            let child = OctreeNode::new(parent.child_center(octant), parent.size / 2.0);
            self.nodes.push(child);
        }
        let children: [NodeId; 8] = std::array::from_fn(|i| NodeId::new(first + i));

        let node = &mut self.nodes[node_id.index()];
        node.children = Some(children);
        let residents = std::mem::take(&mut node.residents);

        for resident in residents {
            let octant = self.nodes[node_id.index()].octant(&self.bodies[resident].position);
            self.insert(children[octant], resident, depth + 1);
        }

        children
    }

    /// Gravitational acceleration at `point` from the tree's contents
    ///
    /// `exclude` names a resident body whose own mass must not act on the
    /// point. Every cell on that body's insertion route is then opened rather
    /// than approximated, so its mass is never folded in through an
    /// aggregate, even when it lies outside the root cube. Zero-distance
    /// contributions are dropped.
    ///
    /// # Arguments
    ///
    /// * `point` - Query position in metres
    /// * `exclude` - Name of the body sitting at `point`, if any
    /// * `theta` - Opening angle; 0 opens every cell
    /// * `gravity_constant` - G in m³ kg⁻¹ s⁻²
    ///
    /// # Returns
    ///
    /// Acceleration in m/s²
    pub fn acceleration_at(
        &self,
        point: Point3<f64>,
        exclude: Option<&str>,
        theta: f64,
        gravity_constant: f64,
    ) -> Vector3<f64> {
        let on_path = exclude.is_some();
        self.accumulate(NodeId::ROOT, &point, exclude, on_path, theta, gravity_constant)
    }

    /// Net gravitational force on `body` from every other body in the tree
    pub fn force_on(&self, body: &Body, theta: f64, gravity_constant: f64) -> Vector3<f64> {
        self.acceleration_at(body.position, Some(&body.name), theta, gravity_constant) * body.mass
    }

    fn accumulate(
        &self,
        node_id: NodeId,
        point: &Point3<f64>,
        exclude: Option<&str>,
        on_path: bool,
        theta: f64,
        gravity_constant: f64,
    ) -> Vector3<f64> {
        let node = &self.nodes[node_id.index()];
        if node.total_mass.abs() < NEGLIGIBLE_MASS {
            return Vector3::zeros();
        }

        match &node.children {
            None => node
                .residents
                .iter()
                .map(|&i| &self.bodies[i])
                .filter(|other| exclude != Some(other.name.as_str()))
                .map(|other| {
                    point_mass_acceleration(point, &other.position, other.mass, gravity_constant)
                })
                .fold(Vector3::zeros(), |acc, a| acc + a),

            Some(children) => {
                let distance = (node.center_of_mass - point).magnitude();
                // Barnes-Hut criterion: s/d < θ (d = 0 gives ∞ and always opens)
                if !on_path && node.size / distance < theta {
                    point_mass_acceleration(
                        point,
                        &node.center_of_mass,
                        node.total_mass,
                        gravity_constant,
                    )
                } else {
                    // Same routing as `insert`, so the path is exact outside the root too
                    let route = node.octant(point);
                    children
                        .iter()
                        .enumerate()
                        .map(|(octant, &child)| {
                            let child_on_path = on_path && octant == route;
                            self.accumulate(
                                child,
                                point,
                                exclude,
                                child_on_path,
                                theta,
                                gravity_constant,
                            )
                        })
                        .fold(Vector3::zeros(), |acc, a| acc + a)
                }
            }
        }
    }

    pub fn root(&self) -> &OctreeNode {
        &self.nodes[NodeId::ROOT.index()]
    }

    pub fn node(&self, id: NodeId) -> &OctreeNode {
        &self.nodes[id.index()]
    }

    pub fn total_mass(&self) -> f64 {
        self.root().total_mass
    }

    pub fn center_of_mass(&self) -> Point3<f64> {
        self.root().center_of_mass
    }

    /// Number of nodes in the arena (for diagnostics)
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth of the deepest node; a lone root is depth 0
    pub fn depth(&self) -> usize {
        self.depth_below(NodeId::ROOT)
    }

    fn depth_below(&self, node_id: NodeId) -> usize {
        match &self.nodes[node_id.index()].children {
            None => 0,
            Some(children) => {
                1 + children
                    .iter()
                    .map(|&child| self.depth_below(child))
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Bodies lying outside the root cube
    pub fn out_of_bounds(&self) -> usize {
        let root = self.root();
        self.bodies
            .iter()
            .filter(|body| !root.contains(&body.position))
            .count()
    }
}
