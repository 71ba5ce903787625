//! ## R-tree index
//!
//! A height-balanced R-tree over axis-aligned MBRs, bulk-populated by
//! repeated insertion with Guttman quadratic splitting. Leaf entries carry
//! polygon-arena indices, not polygons themselves, so the tree never clones a
//! ring. The tree is built once (mutable `insert`) and then queried
//! (immutable `search`); `search` performs no node allocation or parent
//! rewiring and is safe to call from multiple threads once construction is
//! finished.
//!
//! Nodes are arena-allocated: the tree owns a single `Vec<Node>` and refers
//! to nodes by index, so parent back-references are plain `usize`s rather
//! than `Rc`/`Box` cycles (see spec.md §9, "Parent back-references").

use crate::error::GeoError;
use crate::geometry::Rect;
use tracing::{debug, info};

/// Either the payload of a leaf entry (an index into the caller's object arena)
/// or a child node index, statically distinguished by which `Vec` it lives in
/// (`NodeKind::Leaf` vs `NodeKind::Internal`) — a leaf entry can never be
/// confused with an internal one at the type level, which is how this module
/// resolves the `chooseNode` precondition spec.md §9 flags as merely
/// conventionally enforced in the source.
#[derive(Debug, Clone, Copy)]
struct LeafEntry {
    mbr: Rect,
    object: usize,
}

#[derive(Debug, Clone, Copy)]
struct InternalEntry {
    mbr: Rect,
    child: usize,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Leaf(Vec<LeafEntry>),
    Internal(Vec<InternalEntry>),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<usize>,
}

impl Node {
    fn len(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(entries) => entries.len(),
            NodeKind::Internal(entries) => entries.len(),
        }
    }
}

/// An arena-backed R-tree indexing axis-aligned rectangles.
///
/// Callers supply a `usize` index (into whatever arena they own) plus a
/// `Rect` at `insert` time; `search` hands indices back, never touching the
/// objects themselves.
#[derive(Debug)]
pub struct Rtree {
    nodes: Vec<Node>,
    root: usize,
    min_children: usize,
    max_children: usize,
}

impl Rtree {
    /// Creates an empty R-tree with the given node capacity bounds.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidCapacity`] unless `1 <= min_children <= max_children / 2`.
    pub fn new(min_children: usize, max_children: usize) -> Result<Self, GeoError> {
        if min_children < 1 || min_children > max_children / 2 {
            return Err(GeoError::InvalidCapacity {
                min: min_children,
                max: max_children,
            });
        }
        info!(
            "Creating new Rtree with min_children={}, max_children={}",
            min_children, max_children
        );
        Ok(Rtree {
            nodes: vec![Node {
                kind: NodeKind::Leaf(Vec::new()),
                parent: None,
            }],
            root: 0,
            min_children,
            max_children,
        })
    }

    /// Inserts `object` (an index into the caller's arena) with bounding rectangle `mbr`.
    pub fn insert(&mut self, object: usize, mbr: Rect) {
        debug!("Inserting object {} into Rtree with mbr {:?}", object, mbr);
        let leaf = self.choose_leaf(mbr);
        match &mut self.nodes[leaf].kind {
            NodeKind::Leaf(entries) => entries.push(LeafEntry { mbr, object }),
            NodeKind::Internal(_) => unreachable!("choose_leaf always returns a leaf"),
        }
        self.adjust_tree(leaf);
    }

    /// Returns all object indices whose stored MBR intersects `window`.
    ///
    /// Order is implementation-defined (depth-first over entry order).
    pub fn search(&self, window: &Rect) -> Vec<usize> {
        let mut result = Vec::new();
        self.search_node(self.root, window, &mut result);
        result
    }

    fn search_node(&self, node_idx: usize, window: &Rect, result: &mut Vec<usize>) {
        match &self.nodes[node_idx].kind {
            NodeKind::Leaf(entries) => {
                for entry in entries {
                    if entry.mbr.intersects(window) {
                        result.push(entry.object);
                    }
                }
            }
            NodeKind::Internal(entries) => {
                for entry in entries {
                    if entry.mbr.intersects(window) {
                        self.search_node(entry.child, window, result);
                    }
                }
            }
        }
    }

    /// Choose-subtree: descend from the root, at each internal node picking the
    /// entry needing least enlargement to cover `mbr` (ties broken by smaller area),
    /// until a leaf is reached.
    fn choose_leaf(&self, mbr: Rect) -> usize {
        let mut current = self.root;
        loop {
            match &self.nodes[current].kind {
                NodeKind::Leaf(_) => return current,
                NodeKind::Internal(entries) => {
                    let mut best = 0usize;
                    let mut best_enlargement = entries[0].mbr.enlargement(&mbr);
                    let mut best_area = entries[0].mbr.size();
                    for (i, entry) in entries.iter().enumerate().skip(1) {
                        let enlargement = entry.mbr.enlargement(&mbr);
                        let area = entry.mbr.size();
                        if enlargement < best_enlargement
                            || (enlargement == best_enlargement && area < best_area)
                        {
                            best = i;
                            best_enlargement = enlargement;
                            best_area = area;
                        }
                    }
                    current = entries[best].child;
                }
            }
        }
    }

    /// Walks from `node_idx` toward the root, refreshing bounding boxes and
    /// propagating splits. Grows the tree's height when the root itself splits.
    fn adjust_tree(&mut self, node_idx: usize) {
        let mut node_idx = node_idx;
        let mut split: Option<usize> = if self.nodes[node_idx].len() > self.max_children {
            Some(self.split_node(node_idx))
        } else {
            None
        };

        loop {
            let parent = self.nodes[node_idx].parent;
            match parent {
                None => {
                    // node_idx is the root.
                    if let Some(split_idx) = split {
                        self.grow_root(node_idx, split_idx);
                    }
                    return;
                }
                Some(parent_idx) => {
                    self.refresh_parent_entry(parent_idx, node_idx);
                    if let Some(split_idx) = split {
                        self.insert_child_entry(parent_idx, split_idx);
                        split = if self.nodes[parent_idx].len() > self.max_children {
                            Some(self.split_node(parent_idx))
                        } else {
                            None
                        };
                    } else {
                        split = None;
                    }
                    node_idx = parent_idx;
                }
            }
        }
    }

    fn node_mbr(&self, node_idx: usize) -> Rect {
        match &self.nodes[node_idx].kind {
            NodeKind::Leaf(entries) => {
                let mut iter = entries.iter();
                let first = iter.next().expect("node must be non-empty").mbr;
                iter.fold(first, |acc, e| acc.union(&e.mbr))
            }
            NodeKind::Internal(entries) => {
                let mut iter = entries.iter();
                let first = iter.next().expect("node must be non-empty").mbr;
                iter.fold(first, |acc, e| acc.union(&e.mbr))
            }
        }
    }

    fn refresh_parent_entry(&mut self, parent_idx: usize, child_idx: usize) {
        let new_mbr = self.node_mbr(child_idx);
        if let NodeKind::Internal(entries) = &mut self.nodes[parent_idx].kind {
            for entry in entries.iter_mut() {
                if entry.child == child_idx {
                    entry.mbr = new_mbr;
                    return;
                }
            }
        }
        unreachable!("parent must hold an entry for its child");
    }

    fn insert_child_entry(&mut self, parent_idx: usize, child_idx: usize) {
        let mbr = self.node_mbr(child_idx);
        if let NodeKind::Internal(entries) = &mut self.nodes[parent_idx].kind {
            entries.push(InternalEntry {
                mbr,
                child: child_idx,
            });
        } else {
            unreachable!("parent of a split node must be internal");
        }
        self.nodes[child_idx].parent = Some(parent_idx);
    }

    fn grow_root(&mut self, old_root: usize, split_idx: usize) {
        info!("Root overflowed; growing tree height");
        let mbr_old = self.node_mbr(old_root);
        let mbr_new = self.node_mbr(split_idx);
        let new_root_idx = self.nodes.len();
        self.nodes.push(Node {
            kind: NodeKind::Internal(vec![
                InternalEntry {
                    mbr: mbr_old,
                    child: old_root,
                },
                InternalEntry {
                    mbr: mbr_new,
                    child: split_idx,
                },
            ]),
            parent: None,
        });
        self.nodes[old_root].parent = Some(new_root_idx);
        self.nodes[split_idx].parent = Some(new_root_idx);
        self.root = new_root_idx;
    }

    /// Guttman quadratic split: `node_idx`'s entries overflow `max_children`.
    /// Splits them between `node_idx` (reused identity) and a freshly
    /// allocated sibling, returning the sibling's index.
    fn split_node(&mut self, node_idx: usize) -> usize {
        debug!("Splitting overflowing node {}", node_idx);
        let parent = self.nodes[node_idx].parent;
        match std::mem::replace(&mut self.nodes[node_idx].kind, NodeKind::Leaf(Vec::new())) {
            NodeKind::Leaf(entries) => {
                let (left, right) = quadratic_split(entries, self.min_children, |e| e.mbr);
                self.nodes[node_idx].kind = NodeKind::Leaf(left);
                let right_idx = self.nodes.len();
                self.nodes.push(Node {
                    kind: NodeKind::Leaf(right),
                    parent,
                });
                right_idx
            }
            NodeKind::Internal(entries) => {
                let (left, right) = quadratic_split(entries, self.min_children, |e| e.mbr);
                self.nodes[node_idx].kind = NodeKind::Internal(left);
                let right_idx = self.nodes.len();
                for entry in &right {
                    self.nodes[entry.child].parent = Some(right_idx);
                }
                self.nodes.push(Node {
                    kind: NodeKind::Internal(right),
                    parent,
                });
                right_idx
            }
        }
    }

    /// Height of the tree: 1 for an empty or single-level root, growing only via root split.
    pub fn height(&self) -> usize {
        let mut h = 1;
        let mut node = self.root;
        loop {
            match &self.nodes[node].kind {
                NodeKind::Leaf(_) => return h,
                NodeKind::Internal(entries) => {
                    node = entries[0].child;
                    h += 1;
                }
            }
        }
    }
}

/// Guttman's O(n^2) quadratic split, generic over the entry type via an `mbr`
/// projection so it serves both leaf entries (payload = object index) and
/// internal entries (payload = child index) without duplicating the
/// algorithm.
fn quadratic_split<E: Copy>(
    entries: Vec<E>,
    min_children: usize,
    mbr_of: impl Fn(&E) -> Rect,
) -> (Vec<E>, Vec<E>) {
    let n = entries.len();
    debug_assert!(n >= 2, "split requires at least two entries");

    // pickSeeds: the pair maximizing wasted space if grouped together.
    let (mut seed_a, mut seed_b) = (0usize, 1usize);
    let mut max_waste = f64::NEG_INFINITY;
    for i in 0..n {
        for j in (i + 1)..n {
            let bi = mbr_of(&entries[i]);
            let bj = mbr_of(&entries[j]);
            let waste = bi.union(&bj).size() - bi.size() - bj.size();
            if waste > max_waste {
                max_waste = waste;
                seed_a = i;
                seed_b = j;
            }
        }
    }

    let mut assigned = vec![false; n];
    assigned[seed_a] = true;
    assigned[seed_b] = true;

    let mut left: Vec<E> = vec![entries[seed_a]];
    let mut right: Vec<E> = vec![entries[seed_b]];
    let mut left_mbr = mbr_of(&entries[seed_a]);
    let mut right_mbr = mbr_of(&entries[seed_b]);
    let mut remaining = n - 2;

    loop {
        if remaining == 0 {
            break;
        }
        // Forced assignment: one group must take everything left to satisfy min_children.
        if left.len() + remaining <= min_children {
            for (i, &taken) in assigned.iter().enumerate() {
                if !taken {
                    left.push(entries[i]);
                    left_mbr = left_mbr.union(&mbr_of(&entries[i]));
                }
            }
            break;
        }
        if right.len() + remaining <= min_children {
            for (i, &taken) in assigned.iter().enumerate() {
                if !taken {
                    right.push(entries[i]);
                    right_mbr = right_mbr.union(&mbr_of(&entries[i]));
                }
            }
            break;
        }

        // pickNext: the unassigned entry with the largest |d1 - d2|.
        let mut next = usize::MAX;
        let mut next_d1 = 0.0;
        let mut next_d2 = 0.0;
        let mut max_diff = f64::NEG_INFINITY;
        for (i, &taken) in assigned.iter().enumerate() {
            if taken {
                continue;
            }
            let b = mbr_of(&entries[i]);
            let d1 = left_mbr.enlargement(&b);
            let d2 = right_mbr.enlargement(&b);
            let diff = (d1 - d2).abs();
            if diff > max_diff {
                max_diff = diff;
                next = i;
                next_d1 = d1;
                next_d2 = d2;
            }
        }

        assigned[next] = true;
        remaining -= 1;
        let to_left = if next_d1 < next_d2 {
            true
        } else if next_d2 < next_d1 {
            false
        } else if left_mbr.size() != right_mbr.size() {
            left_mbr.size() < right_mbr.size()
        } else if left.len() != right.len() {
            left.len() < right.len()
        } else {
            true
        };
        if to_left {
            left_mbr = left_mbr.union(&mbr_of(&entries[next]));
            left.push(entries[next]);
        } else {
            right_mbr = right_mbr.union(&mbr_of(&entries[next]));
            right.push(entries[next]);
        }
    }

    (left, right)
}
