//! Disjoint-set (union-find) over dense `usize` indices
//!
//! Path compression plus union-by-size gives near-constant amortized cost
//! per operation. Elements are `0..len` indices; callers keep their own
//! mapping from domain objects to indices.

/// Disjoint-set forest over the indices `0..len`.
///
/// # Example
///
/// ```
/// use aoc_solutions::utils::disjoint_set::DisjointSet;
///
/// let mut sets = DisjointSet::new(4);
/// assert_eq!(sets.set_count(), 4);
/// assert!(sets.union(0, 1));
/// assert!(!sets.union(1, 0)); // already joined
/// assert!(sets.same_set(0, 1));
/// assert_eq!(sets.set_count(), 3);
/// assert_eq!(sets.size_of(1), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
    set_count: usize,
}

impl DisjointSet {
    /// Create `len` singleton sets.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
            set_count: len,
        }
    }

    /// Number of elements across all sets.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// True when the structure holds no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets currently present.
    pub fn set_count(&self) -> usize {
        self.set_count
    }

    /// Representative of the set containing `x`, with path compression.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Second pass: repoint the chain at the root.
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets containing `a` and `b`.
    ///
    /// Returns `true` when two distinct sets were merged, `false` when `a`
    /// and `b` were already in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        // Union by size: hang the smaller tree below the larger.
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        self.set_count -= 1;
        true
    }

    /// True iff `a` and `b` are in the same set.
    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Size of the set containing `x`.
    pub fn size_of(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }

    /// Sizes of all sets, in no particular order.
    pub fn set_sizes(&mut self) -> Vec<usize> {
        (0..self.parent.len())
            .filter_map(|i| (self.find(i) == i).then(|| self.size[i]))
            .collect()
    }
}
