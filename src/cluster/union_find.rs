// src/cluster/union_find.rs
//! Union-Find data structure for clustering.

pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

// Indexing is safe here: all indices passed to find/union must be < n (from new()).
#[allow(clippy::indexing_slicing)]
impl UnionFind {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression without recursion; long typo chains stay shallow.
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    pub fn union(&mut self, x: usize, y: usize) {
        let rx = self.find(x);
        let ry = self.find(y);

        if rx == ry {
            return;
        }

        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
    }

    /// Groups `0..n` by root, each group and the group order following
    /// first appearance.
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let n = self.parent.len();
        let mut slot_of_root: Vec<Option<usize>> = vec![None; n];
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for i in 0..n {
            let root = self.find(i);
            match slot_of_root[root] {
                Some(slot) => groups[slot].push(i),
                None => {
                    slot_of_root[root] = Some(groups.len());
                    groups.push(vec![i]);
                }
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_joins_transitively() {
        let mut uf = UnionFind::new(5);
        uf.union(0, 3);
        uf.union(3, 4);
        assert_eq!(uf.find(0), uf.find(4));
        assert_ne!(uf.find(0), uf.find(1));
    }

    #[test]
    fn groups_follow_first_appearance() {
        let mut uf = UnionFind::new(5);
        uf.union(4, 1);
        uf.union(2, 0);
        assert_eq!(uf.groups(), vec![vec![0, 2], vec![1, 4], vec![3]]);
    }
}
