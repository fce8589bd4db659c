//! Skip list
//!
//! Index-based skip list over arena handles.
//!
//! ```text
//! Level 2:  HEAD ───────────────► 20 ─────────────────────► NIL
//! Level 1:  HEAD ──► 10 ────────► 20 ──────► 35 ──────────► NIL
//! Level 0:  HEAD ──► 10 ──► 15 ─► 20 ──► 25 ► 35 ──► 40 ──► NIL
//!                    ◄──────── prev links (level 0 only) ────────
//! ```
//!
//! Nodes live in a `Vec` and link by index. Level 0 is doubly linked so
//! stepping backward is O(1) and exact even across equal entries.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::arena::{Arena, ArenaHandle};
use crate::config::MAX_SUPPORTED_HEIGHT;

use super::Comparator;

/// Index of the head sentinel in `nodes`
const HEAD: usize = 0;

struct Node {
    /// None only for the head sentinel
    handle: Option<ArenaHandle>,
    /// Forward links, one per level of this node's tower
    next: Vec<Option<usize>>,
    /// Level 0 backward link; None for the first element
    prev: Option<usize>,
}

/// Ordered index of arena buffers under a comparator
pub struct SkipList<C> {
    nodes: Vec<Node>,
    /// Tallest tower currently in use
    height: usize,
    max_height: usize,
    branching_factor: u32,
    rng: StdRng,
    cmp: C,
    len: usize,
}

impl<C: Comparator> SkipList<C> {
    /// Create an empty list
    ///
    /// `max_height` is clamped to 1..=MAX_SUPPORTED_HEIGHT and
    /// `branching_factor` to at least 2.
    pub fn new(cmp: C, max_height: usize, branching_factor: u32, seed: Option<u64>) -> Self {
        let max_height = max_height.clamp(1, MAX_SUPPORTED_HEIGHT);
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let head = Node {
            handle: None,
            next: vec![None; max_height],
            prev: None,
        };
        Self {
            nodes: vec![head],
            height: 1,
            max_height,
            branching_factor: branching_factor.max(2),
            rng,
            cmp,
            len: 0,
        }
    }

    /// Number of stored buffers
    pub fn len(&self) -> usize {
        self.len
    }

    /// True iff nothing was inserted
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a buffer; equal entries keep insertion order
    pub fn insert(&mut self, arena: &Arena, handle: ArenaHandle) {
        let new_key = arena.get(handle);

        // Predecessor at each level: last node not greater than the new key
        let mut update = [HEAD; MAX_SUPPORTED_HEIGHT];
        let mut node = HEAD;
        for level in (0..self.height).rev() {
            while let Some(next) = self.nodes[node].next[level] {
                if self.cmp.compare(self.key(arena, next), new_key).is_gt() {
                    break;
                }
                node = next;
            }
            update[level] = node;
        }

        let height = self.random_height();
        if height > self.height {
            // update[] already holds HEAD for the new levels
            self.height = height;
        }

        let idx = self.nodes.len();
        let successor = self.nodes[update[0]].next[0];
        let mut next = Vec::with_capacity(height);
        for (level, &pred) in update.iter().enumerate().take(height) {
            next.push(self.nodes[pred].next[level]);
        }
        self.nodes.push(Node {
            handle: Some(handle),
            next,
            prev: (update[0] != HEAD).then_some(update[0]),
        });

        for (level, &pred) in update.iter().enumerate().take(height) {
            self.nodes[pred].next[level] = Some(idx);
        }
        if let Some(successor) = successor {
            self.nodes[successor].prev = Some(idx);
        }
        self.len += 1;
    }

    /// Cursor over this list, reading buffers from `arena`
    pub fn cursor<'a>(&'a self, arena: &'a Arena) -> Cursor<'a, C> {
        Cursor {
            list: self,
            arena,
            node: None,
        }
    }

    // =========================================================================
    // Internal Search
    // =========================================================================

    fn key<'a>(&self, arena: &'a Arena, node: usize) -> &'a [u8] {
        match self.nodes[node].handle {
            Some(handle) => arena.get(handle),
            None => &[],
        }
    }

    /// First node not less than `probe`
    fn find_greater_or_equal(&self, arena: &Arena, probe: &[u8]) -> Option<usize> {
        let mut node = HEAD;
        for level in (0..self.height).rev() {
            while let Some(next) = self.nodes[node].next[level] {
                if !self.cmp.compare(self.key(arena, next), probe).is_lt() {
                    break;
                }
                node = next;
            }
        }
        self.nodes[node].next[0]
    }

    fn first(&self) -> Option<usize> {
        self.nodes[HEAD].next[0]
    }

    fn last(&self) -> Option<usize> {
        let mut node = HEAD;
        for level in (0..self.height).rev() {
            while let Some(next) = self.nodes[node].next[level] {
                node = next;
            }
        }
        (node != HEAD).then_some(node)
    }

    fn random_height(&mut self) -> usize {
        let mut height = 1;
        while height < self.max_height && self.rng.gen_ratio(1, self.branching_factor) {
            height += 1;
        }
        height
    }
}

/// Position within a SkipList
///
/// Invalid before the first positioning call, and after stepping off
/// either end.
pub struct Cursor<'a, C> {
    list: &'a SkipList<C>,
    arena: &'a Arena,
    node: Option<usize>,
}

impl<'a, C: Comparator> Cursor<'a, C> {
    /// True iff the cursor sits on a buffer
    pub fn is_valid(&self) -> bool {
        self.node.is_some()
    }

    /// Drop the current position; the cursor becomes invalid
    pub fn reset(&mut self) {
        self.node = None;
    }

    /// Buffer at the cursor, if valid
    pub fn current(&self) -> Option<&'a [u8]> {
        self.node.map(|node| self.list.key(self.arena, node))
    }

    /// Lower bound: first buffer not less than `probe`
    pub fn seek(&mut self, probe: &[u8]) {
        self.node = self.list.find_greater_or_equal(self.arena, probe);
    }

    /// Position at the smallest buffer
    pub fn seek_to_first(&mut self) {
        self.node = self.list.first();
    }

    /// Position at the largest buffer
    pub fn seek_to_last(&mut self) {
        self.node = self.list.last();
    }

    /// Step to the next buffer; no-op when invalid
    pub fn advance_forward(&mut self) {
        self.node = self.node.and_then(|node| self.list.nodes[node].next[0]);
    }

    /// Step to the previous buffer via the level-0 back link
    pub fn advance_backward(&mut self) {
        self.node = self.node.and_then(|node| self.list.nodes[node].prev);
    }
}
