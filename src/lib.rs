//! An adaptive region quadtree for axis-aligned rectangles.
//!
//! The tree indexes a single bounded world-space domain `[x, x+w) × [y, y+h)`. Every
//! rectangle is mapped into a normalized `[0,1) × [0,1)` space on insertion and mapped back
//! when it is returned from a query. Nodes split into four equal quadrants once they hold
//! more than `max_quadrant_capacity` items, as long as the resulting quadrants are not
//! smaller than `min_quadrant_ratio`. Rectangles that straddle a node's midlines stay on that
//! node for good. There is no removal.
//!
//! ```
//! use region_quadtree::Quadtree;
//!
//! let mut tree = Quadtree::new(0.0, 0.0, 100.0, 100.0, 0.01, 4);
//! tree.insert(10.0, 10.0, 5.0, 5.0, "a");
//! tree.insert(60.0, 60.0, 10.0, 10.0, "b");
//!
//! let hits = tree.collisions(12.0, 12.0);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(*hits[0].value, "a");
//! assert!(tree.collisions(90.0, 90.0).is_empty());
//! ```

mod config;
mod error;
mod list;
mod normalize;
mod quadtree;

/// Receives the nodes and items of a [`Quadtree`] during [`Quadtree::traverse`].
///
/// Nodes are reported depth-first, pre-order: a node, then its `ne`, `nw`, `sw` and `se`
/// children. Each node's `branch` or `leaf` call is followed by one `item` call per item
/// stored on that node. All coordinates are in world space.
pub trait QuadtreeVisitor<'a, V> {
    fn item(&mut self, x: f64, y: f64, width: f64, height: f64, value: &'a V);

    fn leaf(&mut self, _depth: u32, _x: f64, _y: f64, _width: f64, _height: f64) {}

    fn branch(&mut self, _depth: u32, _x: f64, _y: f64, _width: f64, _height: f64) {}
}

pub use config::*;
pub use error::*;
pub use normalize::*;
pub use quadtree::*;
