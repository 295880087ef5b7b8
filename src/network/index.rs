use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;

use crate::types::Item;

use super::edge::{Edge, EdgeId};
use super::policy::item_hash;

/// Incident-edge list of one item.
pub type IncidentEdges = SmallVec<[EdgeId; 4]>;

/// Number of distinct incident edges and the sum of their counts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct LinkTally {
    /// Distinct edges touching the item.
    pub edges: usize,
    /// Sum of the counts of those edges.
    pub weight: u64,
}

#[derive(Clone, Debug)]
struct ItemEntry<T> {
    item: T,
    edges: IncidentEdges,
}

/// Item to incident-edge mapping, in first-seen item order.
///
/// Edge ids are appended only when an edge is created, so each list is in
/// edge creation order and never holds an id twice.
#[derive(Clone, Debug)]
pub struct ItemIndex<T> {
    entries: Vec<ItemEntry<T>>,
    slots: FxHashMap<u64, SmallVec<[usize; 1]>>,
}

impl<T> Default for ItemIndex<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            slots: FxHashMap::default(),
        }
    }
}

impl<T: Item> ItemIndex<T> {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, hash: u64, item: &T) -> Option<usize> {
        self.slots
            .get(&hash)?
            .iter()
            .copied()
            .find(|&slot| self.entries[slot].item == *item)
    }

    /// Records `edge` as incident to `item`.
    pub(crate) fn attach(&mut self, item: &T, edge: EdgeId) {
        let hash = item_hash(item);
        match self.slot(hash, item) {
            Some(slot) => self.entries[slot].edges.push(edge),
            None => {
                let slot = self.entries.len();
                let mut edges = IncidentEdges::new();
                edges.push(edge);
                self.entries.push(ItemEntry {
                    item: item.clone(),
                    edges,
                });
                self.slots.entry(hash).or_default().push(slot);
            }
        }
    }

    /// Records a new edge against both of its endpoints.
    ///
    /// A self-pair is recorded once.
    pub(crate) fn attach_edge(&mut self, id: EdgeId, edge: &Edge<T>) {
        self.attach(edge.a(), id);
        if edge.b() != edge.a() {
            self.attach(edge.b(), id);
        }
    }

    /// Edges incident to `item`, or an empty slice.
    pub fn incident(&self, item: &T) -> &[EdgeId] {
        match self.slot(item_hash(item), item) {
            Some(slot) => &self.entries[slot].edges,
            None => &[],
        }
    }

    /// Returns true if `item` is an endpoint of any edge.
    pub fn contains(&self, item: &T) -> bool {
        self.slot(item_hash(item), item).is_some()
    }
}

impl<T> ItemIndex<T> {
    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no item has been indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Items with their incident edges, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &[EdgeId])> + '_ {
        self.entries
            .iter()
            .map(|entry| (&entry.item, entry.edges.as_slice()))
    }

    /// Tallies an incident list against the owning edge slice.
    pub fn tally(ids: &[EdgeId], edges: &[Edge<T>]) -> LinkTally {
        LinkTally {
            edges: ids.len(),
            weight: ids
                .iter()
                .map(|id| edges[id.0].count())
                .fold(0u64, u64::saturating_add),
        }
    }
}
