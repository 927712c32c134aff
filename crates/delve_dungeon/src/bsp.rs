//! Binary space partitioning.
//!
//! The tree is an arena of nodes addressed by index; node 0 is the root and
//! covers the whole map. Children are always created in pairs.

use delve_foundation::GameRng;
use rand::Rng;

use crate::map::Rect;

/// One partition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BspNode {
    /// Area covered.
    pub rect: Rect,
    /// `(first, second)` child indices for internal nodes.
    pub children: Option<(usize, usize)>,
}

impl BspNode {
    /// True for terminal partitions.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Split limits taken from the generator config.
#[derive(Clone, Copy, Debug)]
pub struct SplitRules {
    /// Minimum distance from a cut to either edge.
    pub min_leaf: i32,
    /// Keep splitting while the larger side exceeds this.
    pub max_leaf: i32,
    /// Aspect ratio that forces the cut orientation.
    pub split_ratio: f32,
}

/// A partition tree over a rectangle.
#[derive(Clone, Debug)]
pub struct BspTree {
    nodes: Vec<BspNode>,
}

impl BspTree {
    /// Partitions `area` until every leaf satisfies `rules`.
    ///
    /// A partition is split while its larger side exceeds `max_leaf`, as
    /// long as a cut can keep both halves at least `min_leaf` wide. With
    /// `max_leaf >= 2 * min_leaf` (which the generator config enforces) that
    /// cut always exists, so every leaf ends up within both bounds. Cutting
    /// across the longer side is forced once the aspect ratio reaches
    /// `split_ratio`; otherwise the orientation is a coin flip.
    pub fn build(area: Rect, rules: SplitRules, rng: &mut GameRng) -> Self {
        let mut tree = Self {
            nodes: vec![BspNode {
                rect: area,
                children: None,
            }],
        };
        tree.split(0, rules, rng);
        tree
    }

    fn split(&mut self, index: usize, rules: SplitRules, rng: &mut GameRng) {
        let rect = self.nodes[index].rect;
        if rect.w.max(rect.h) <= rules.max_leaf {
            return;
        }

        let can_cut_width = rect.w >= 2 * rules.min_leaf;
        let can_cut_height = rect.h >= 2 * rules.min_leaf;
        let cut_width = match (can_cut_width, can_cut_height) {
            (false, false) => return,
            (true, false) => true,
            (false, true) => false,
            (true, true) => {
                let (w, h) = (f64::from(rect.w), f64::from(rect.h));
                let ratio = f64::from(rules.split_ratio);
                if w / h >= ratio {
                    true
                } else if h / w >= ratio {
                    false
                } else {
                    rng.gen_bool(0.5)
                }
            }
        };

        let (first, second) = if cut_width {
            let at = rng.gen_range(rules.min_leaf..=rect.w - rules.min_leaf);
            (
                Rect::new(rect.x, rect.y, at, rect.h),
                Rect::new(rect.x + at, rect.y, rect.w - at, rect.h),
            )
        } else {
            let at = rng.gen_range(rules.min_leaf..=rect.h - rules.min_leaf);
            (
                Rect::new(rect.x, rect.y, rect.w, at),
                Rect::new(rect.x, rect.y + at, rect.w, rect.h - at),
            )
        };

        let a = self.push(first);
        let b = self.push(second);
        self.nodes[index].children = Some((a, b));
        self.split(a, rules, rng);
        self.split(b, rules, rng);
    }

    fn push(&mut self, rect: Rect) -> usize {
        self.nodes.push(BspNode {
            rect,
            children: None,
        });
        self.nodes.len() - 1
    }

    /// The node at `index`.
    #[must_use]
    pub fn node(&self, index: usize) -> &BspNode {
        &self.nodes[index]
    }

    /// Number of nodes, internal and terminal.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a tree holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Leaf indices, left subtree before right.
    #[must_use]
    pub fn leaves(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![0];
        while let Some(i) = stack.pop() {
            match self.nodes[i].children {
                Some((a, b)) => {
                    stack.push(b);
                    stack.push(a);
                }
                None => out.push(i),
            }
        }
        out
    }

    /// Internal node indices, children before parents.
    #[must_use]
    pub fn internal_post_order(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.post_order(0, &mut out);
        out
    }

    fn post_order(&self, index: usize, out: &mut Vec<usize>) {
        if let Some((a, b)) = self.nodes[index].children {
            self.post_order(a, out);
            self.post_order(b, out);
            out.push(index);
        }
    }

    /// Leaf indices under `index`, in left-to-right order.
    #[must_use]
    pub fn leaves_under(&self, index: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![index];
        while let Some(i) = stack.pop() {
            match self.nodes[i].children {
                Some((a, b)) => {
                    stack.push(b);
                    stack.push(a);
                }
                None => out.push(i),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_foundation::seeded;

    const RULES: SplitRules = SplitRules {
        min_leaf: 8,
        max_leaf: 20,
        split_ratio: 1.25,
    };

    #[test]
    fn leaves_tile_the_area() {
        let area = Rect::new(0, 0, 80, 40);
        let tree = BspTree::build(area, RULES, &mut seeded(1));
        let total: i32 = tree
            .leaves()
            .iter()
            .map(|i| tree.node(*i).rect.w * tree.node(*i).rect.h)
            .sum();
        assert_eq!(total, 80 * 40);
    }

    #[test]
    fn leaves_respect_bounds() {
        let tree = BspTree::build(Rect::new(0, 0, 80, 40), RULES, &mut seeded(7));
        for i in tree.leaves() {
            let r = tree.node(i).rect;
            assert!(r.w >= RULES.min_leaf && r.h >= RULES.min_leaf, "{r:?}");
            assert!(r.w.max(r.h) <= RULES.max_leaf, "{r:?}");
        }
    }

    #[test]
    fn small_area_is_single_leaf() {
        let tree = BspTree::build(Rect::new(0, 0, 12, 10), RULES, &mut seeded(3));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.leaves(), vec![0]);
        assert!(tree.internal_post_order().is_empty());
    }

    #[test]
    fn tight_bounds_still_cap_every_leaf() {
        // max_leaf at exactly twice min_leaf leaves no slack for the cut.
        let rules = SplitRules {
            min_leaf: 8,
            max_leaf: 16,
            split_ratio: 1.25,
        };
        for seed in 0..20 {
            let tree = BspTree::build(Rect::new(0, 0, 17, 45), rules, &mut seeded(seed));
            assert!(tree.leaves().len() >= 4);
            for i in tree.leaves() {
                let r = tree.node(i).rect;
                assert!(r.w.min(r.h) >= 8, "seed {seed}: {r:?}");
                assert!(r.w.max(r.h) <= 16, "seed {seed}: {r:?}");
            }
        }
    }

    #[test]
    fn post_order_lists_root_last() {
        let tree = BspTree::build(Rect::new(0, 0, 80, 40), RULES, &mut seeded(11));
        let order = tree.internal_post_order();
        assert_eq!(order.last(), Some(&0));
        assert_eq!(order.len(), tree.leaves().len() - 1);
    }
}
