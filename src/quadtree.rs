use tracing::{debug, trace, warn};

use crate::list::List;
use crate::{Normalizer, QuadtreeConfig, QuadtreeError, QuadtreeVisitor};

const NO_NODE: i32 = -1;

// Children are allocated together; these are offsets from `first_child`.
const NE: i32 = 0;
const SE: i32 = 1;
const SW: i32 = 2;
const NW: i32 = 3;

/// A rectangle stored in the tree, in normalized `[0,1)` coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Item<V> {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub value: V,
}

impl<V> Item<V> {
    /// Half-open containment: the left and top edges are inside, the right and bottom are not.
    #[inline]
    fn contains(&self, px: f64, py: f64) -> bool {
        self.x <= px && self.x + self.w > px && self.y <= py && self.y + self.h > py
    }

    /// Open-interval overlap; rectangles that only share an edge do not overlap.
    #[inline]
    fn overlaps(&self, x: f64, y: f64, w: f64, h: f64) -> bool {
        self.x < x + w && self.x + self.w > x && self.y < y + h && self.y + self.h > y
    }
}

/// A stored rectangle returned by a query, in world coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Hit<'a, V> {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub value: &'a V,
}

/// A childless node. Bounds are in world coordinates; `items` are left normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaf<'a, V> {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub items: &'a [Item<V>],
}

#[derive(Clone, Debug)]
struct Node<V> {
    x: f64,
    y: f64,
    size: f64,
    parent: i32,
    first_child: i32,
    items: Vec<Item<V>>,
}

impl<V> Node<V> {
    fn new(x: f64, y: f64, size: f64, parent: i32) -> Self {
        Self {
            x,
            y,
            size,
            parent,
            first_child: NO_NODE,
            items: Vec::new(),
        }
    }

    fn is_leaf(&self) -> bool {
        self.first_child == NO_NODE
    }
}

pub struct Quadtree<V> {
    norm: Normalizer,
    min_quadrant_ratio: f64,
    max_quadrant_capacity: usize,
    count: usize,
    root: i32,
    nodes: List<Node<V>>,
}

impl<V> Quadtree<V> {
    /// Creates an empty tree over `[x, x+width) × [y, y+height)`.
    ///
    /// Nothing is validated. Use [`Quadtree::from_config`] for a checked constructor.
    pub fn new(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        min_quadrant_ratio: f64,
        max_quadrant_capacity: usize,
    ) -> Self {
        debug!(
            x,
            y,
            width,
            height,
            min_quadrant_ratio,
            max_quadrant_capacity,
            "creating quadtree"
        );
        let mut nodes = List::new();
        let root = nodes.push(Node::new(0.0, 0.0, 1.0, NO_NODE));
        Self {
            norm: Normalizer::new(x, y, width, height),
            min_quadrant_ratio,
            max_quadrant_capacity,
            count: 0,
            root,
            nodes,
        }
    }

    pub fn from_config(config: &QuadtreeConfig) -> Result<Self, QuadtreeError> {
        config.validate()?;
        Ok(Self::new(
            config.x,
            config.y,
            config.width,
            config.height,
            config.min_quadrant_ratio,
            config.max_quadrant_capacity,
        ))
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.norm
    }

    pub fn min_quadrant_ratio(&self) -> f64 {
        self.min_quadrant_ratio
    }

    pub fn max_quadrant_capacity(&self) -> usize {
        self.max_quadrant_capacity
    }

    /// Number of inserted items.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.size() as usize
    }

    /// Depth of the deepest node; a tree that never split has depth 0.
    pub fn depth(&self) -> u32 {
        self.nodes
            .indices()
            .filter(|&idx| self.nodes.get(idx).is_leaf())
            .map(|idx| self.node_depth(idx))
            .max()
            .unwrap_or(0)
    }

    pub fn insert(&mut self, x: f64, y: f64, w: f64, h: f64, value: V) {
        let item = Item {
            x: self.norm.norm_x(x),
            y: self.norm.norm_y(y),
            w: self.norm.norm_w(w),
            h: self.norm.norm_h(h),
            value,
        };
        if !(0.0..1.0).contains(&item.x) || !(0.0..1.0).contains(&item.y) {
            warn!(x, y, w, h, "inserting rectangle outside the quadtree domain");
        }
        self.node_insert(self.root, item);
        self.count += 1;
    }

    /// Every stored rectangle containing the world-space point `(x, y)`.
    ///
    /// Only the nodes on the path from the root to the quadrant holding the point are visited.
    pub fn collisions(&self, x: f64, y: f64) -> Vec<Hit<'_, V>> {
        let px = self.norm.norm_x(x);
        let py = self.norm.norm_y(y);

        let mut out = Vec::new();
        let mut node_idx = self.root;
        loop {
            let node = self.nodes.get(node_idx);
            out.extend(
                node.items
                    .iter()
                    .filter(|item| item.contains(px, py))
                    .map(|item| self.hit(item)),
            );

            if node.is_leaf() {
                break;
            }

            let fc = node.first_child;
            let nw = self.nodes.get(fc + NW);
            node_idx = if nw.x + nw.size > px {
                if nw.y + nw.size > py {
                    fc + NW
                } else {
                    fc + SW
                }
            } else {
                let ne = self.nodes.get(fc + NE);
                if ne.y + ne.size > py {
                    fc + NE
                } else {
                    fc + SE
                }
            };
        }
        trace!(x, y, hits = out.len(), "collisions");
        out
    }

    /// Every stored rectangle whose interior overlaps the world-space rectangle.
    pub fn overlaps(&self, x: f64, y: f64, w: f64, h: f64) -> Vec<Hit<'_, V>> {
        let qx = self.norm.norm_x(x);
        let qy = self.norm.norm_y(y);
        let qw = self.norm.norm_w(w);
        let qh = self.norm.norm_h(h);

        let mut out = Vec::new();
        let mut to_process = List::<i32>::with_capacity(32);
        to_process.push(self.root);

        while let Some(node_idx) = to_process.pop() {
            let node = self.nodes.get(node_idx);
            out.extend(
                node.items
                    .iter()
                    .filter(|item| item.overlaps(qx, qy, qw, qh))
                    .map(|item| self.hit(item)),
            );

            if node.is_leaf() {
                continue;
            }

            if let Some(child) = self.select_quadrant(node_idx, qx, qy, qw, qh) {
                to_process.push(child);
                continue;
            }

            let half = node.size * 0.5;
            let mx = node.x + half;
            let my = node.y + half;
            let quadrants: &[i32] = if qy + qh < my {
                &[NW, NE]
            } else if qy > my {
                &[SW, SE]
            } else if qx + qw < mx {
                &[NW, SW]
            } else if qx > mx {
                &[NE, SE]
            } else {
                &[NE, SE, SW, NW]
            };
            // Reversed so children are visited in the listed order.
            for quadrant in quadrants.iter().rev() {
                to_process.push(node.first_child + quadrant);
            }
        }
        trace!(x, y, w, h, hits = out.len(), "overlaps");
        out
    }

    /// Every childless node, depth-first in `ne, se, sw, nw` order.
    pub fn leaves(&self) -> Vec<Leaf<'_, V>> {
        let mut out = Vec::new();
        let mut to_process = List::<i32>::with_capacity(32);
        to_process.push(self.root);

        while let Some(node_idx) = to_process.pop() {
            let node = self.nodes.get(node_idx);
            if node.is_leaf() {
                out.push(Leaf {
                    x: self.norm.scale_x(node.x),
                    y: self.norm.scale_y(node.y),
                    w: self.norm.scale_w(node.size),
                    h: self.norm.scale_h(node.size),
                    items: &node.items,
                });
                continue;
            }
            let fc = node.first_child;
            to_process.push(fc + NW);
            to_process.push(fc + SW);
            to_process.push(fc + SE);
            to_process.push(fc + NE);
        }
        out
    }

    /// Values of every stored item, in [`Quadtree::traverse`] order.
    pub fn values(&self) -> Vec<&V> {
        let mut collector = ValueCollector(Vec::with_capacity(self.count));
        self.traverse(&mut collector);
        collector.0
    }

    /// Every stored item in world coordinates, in [`Quadtree::traverse`] order.
    pub fn items(&self) -> Vec<Hit<'_, V>> {
        let mut collector = HitCollector(Vec::with_capacity(self.count));
        self.traverse(&mut collector);
        collector.0
    }

    pub fn traverse<'a, T>(&'a self, visitor: &mut T)
    where
        T: QuadtreeVisitor<'a, V>,
    {
        let mut to_process = List::<(i32, u32)>::with_capacity(32);
        to_process.push((self.root, 0));

        while let Some((node_idx, depth)) = to_process.pop() {
            let node = self.nodes.get(node_idx);
            let x = self.norm.scale_x(node.x);
            let y = self.norm.scale_y(node.y);
            let w = self.norm.scale_w(node.size);
            let h = self.norm.scale_h(node.size);
            if node.is_leaf() {
                visitor.leaf(depth, x, y, w, h);
            } else {
                visitor.branch(depth, x, y, w, h);
            }

            for item in &node.items {
                let hit = self.hit(item);
                visitor.item(hit.x, hit.y, hit.w, hit.h, hit.value);
            }

            if !node.is_leaf() {
                let fc = node.first_child;
                to_process.push((fc + SE, depth + 1));
                to_process.push((fc + SW, depth + 1));
                to_process.push((fc + NW, depth + 1));
                to_process.push((fc + NE, depth + 1));
            }
        }
    }

    fn hit<'a>(&self, item: &'a Item<V>) -> Hit<'a, V> {
        Hit {
            x: self.norm.scale_x(item.x),
            y: self.norm.scale_y(item.y),
            w: self.norm.scale_w(item.w),
            h: self.norm.scale_h(item.h),
            value: &item.value,
        }
    }

    fn node_depth(&self, node_idx: i32) -> u32 {
        let mut depth = 0;
        let mut parent = self.nodes.get(node_idx).parent;
        while parent != NO_NODE {
            depth += 1;
            parent = self.nodes.get(parent).parent;
        }
        depth
    }

    fn node_insert(&mut self, start_node: i32, item: Item<V>) {
        let mut node_idx = start_node;
        while let Some(child) = self.select_quadrant(node_idx, item.x, item.y, item.w, item.h) {
            node_idx = child;
        }
        self.leaf_insert(node_idx, item);
    }

    fn leaf_insert(&mut self, node_idx: i32, item: Item<V>) {
        let node = self.nodes.get_mut(node_idx);
        node.items.push(item);

        // A node splits at most once; items that do not fit a single child stay behind.
        if node.items.len() > self.max_quadrant_capacity
            && node.size * 0.5 >= self.min_quadrant_ratio
            && node.is_leaf()
        {
            self.split(node_idx);

            let items = std::mem::take(&mut self.nodes.get_mut(node_idx).items);
            let mut residual = Vec::new();
            let mut moved = 0;
            for item in items {
                match self.select_quadrant(node_idx, item.x, item.y, item.w, item.h) {
                    Some(child) => {
                        self.nodes.get_mut(child).items.push(item);
                        moved += 1;
                    }
                    None => residual.push(item),
                }
            }
            debug!(
                node = node_idx,
                depth = self.node_depth(node_idx),
                moved,
                residual = residual.len(),
                "split quadrant"
            );
            self.nodes.get_mut(node_idx).items = residual;
        }
    }

    fn split(&mut self, node_idx: i32) {
        let node = self.nodes.get(node_idx);
        let size = node.size * 0.5;
        let x = node.x;
        let y = node.y;

        let fc = self.nodes.push(Node::new(x + size, y, size, node_idx));
        self.nodes.push(Node::new(x + size, y + size, size, node_idx));
        self.nodes.push(Node::new(x, y + size, size, node_idx));
        self.nodes.push(Node::new(x, y, size, node_idx));
        self.nodes.get_mut(node_idx).first_child = fc;
    }

    /// The child of `node_idx` that fully holds the rectangle, if any.
    ///
    /// "Top" needs both edges above the horizontal midline while "bottom" only checks that
    /// the top edge is strictly below it, so a rectangle whose top edge sits exactly on the
    /// midline belongs to neither half and stays on the node. The same holds for a left edge
    /// on the vertical midline.
    fn select_quadrant(&self, node_idx: i32, x: f64, y: f64, w: f64, h: f64) -> Option<i32> {
        let node = self.nodes.get(node_idx);
        if node.is_leaf() {
            return None;
        }
        let mx = node.x + node.size * 0.5;
        let my = node.y + node.size * 0.5;

        let top = y < my && y + h < my;
        let bottom = y > my;

        let quadrant = if x < mx && x + w < mx {
            if top {
                NW
            } else if bottom {
                SW
            } else {
                return None;
            }
        } else if x > mx {
            if top {
                NE
            } else if bottom {
                SE
            } else {
                return None;
            }
        } else {
            return None;
        };
        Some(node.first_child + quadrant)
    }
}

struct ValueCollector<'a, V>(Vec<&'a V>);

impl<'a, V> QuadtreeVisitor<'a, V> for ValueCollector<'a, V> {
    fn item(&mut self, _x: f64, _y: f64, _width: f64, _height: f64, value: &'a V) {
        self.0.push(value);
    }
}

struct HitCollector<'a, V>(Vec<Hit<'a, V>>);

impl<'a, V> QuadtreeVisitor<'a, V> for HitCollector<'a, V> {
    fn item(&mut self, x: f64, y: f64, width: f64, height: f64, value: &'a V) {
        self.0.push(Hit {
            x,
            y,
            w: width,
            h: height,
            value,
        });
    }
}
