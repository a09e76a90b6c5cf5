// Copyright 2025 Cowboy AI, LLC.

//! Union-find over arbitrary elements
//!
//! Used to compute the clusters behind coequalizers and quotient morphisms.
//! Classes are merged by size and paths are compressed on every lookup made
//! through [`PartitionAlgorithm::relate`]; neither changes the resulting
//! partition.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// A partition of a set of elements, refined by [`relate`](Self::relate) calls
#[derive(Debug, Clone)]
pub struct PartitionAlgorithm<T> {
    index: HashMap<T, usize>,
    elements: Vec<T>,
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl<T> PartitionAlgorithm<T>
where
    T: Clone + Eq + Hash + Ord,
{
    /// Start with one singleton class per element
    pub fn new<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut partition = Self {
            index: HashMap::new(),
            elements: Vec::new(),
            parent: Vec::new(),
            size: Vec::new(),
        };
        for element in elements {
            partition.insert(element);
        }
        partition
    }

    /// Add an element as a singleton class; returns its slot
    pub fn insert(&mut self, element: T) -> usize {
        if let Some(&slot) = self.index.get(&element) {
            return slot;
        }
        let slot = self.elements.len();
        self.index.insert(element.clone(), slot);
        self.elements.push(element);
        self.parent.push(slot);
        self.size.push(1);
        slot
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether there are no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn root(&self, mut slot: usize) -> usize {
        while self.parent[slot] != slot {
            slot = self.parent[slot];
        }
        slot
    }

    fn find(&mut self, slot: usize) -> usize {
        let root = self.root(slot);
        let mut current = slot;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Put `a` and `b` into the same class. Unknown elements are added first.
    pub fn relate(&mut self, a: &T, b: &T) {
        if a == b {
            self.insert(a.clone());
            return;
        }
        let a = self.insert(a.clone());
        let b = self.insert(b.clone());
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
    }

    /// Whether `a` and `b` are in the same class
    pub fn same_class(&self, a: &T, b: &T) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&a), Some(&b)) => self.root(a) == self.root(b),
            _ => false,
        }
    }

    /// The class containing `element`
    pub fn class_of(&self, element: &T) -> BTreeSet<T> {
        match self.index.get(element) {
            Some(&slot) => {
                let root = self.root(slot);
                (0..self.elements.len())
                    .filter(|&s| self.root(s) == root)
                    .map(|s| self.elements[s].clone())
                    .collect()
            }
            None => BTreeSet::new(),
        }
    }

    /// The final partition: the set of disjoint classes
    pub fn get_result(&self) -> BTreeSet<BTreeSet<T>> {
        let mut classes: HashMap<usize, BTreeSet<T>> = HashMap::new();
        for slot in 0..self.elements.len() {
            classes
                .entry(self.root(slot))
                .or_default()
                .insert(self.elements[slot].clone());
        }
        classes.into_values().collect()
    }
}
