use std::collections::BTreeSet;

use crate::domain::types::ItemId;

/// Item categories currently chosen as filter.
///
/// Mutated only through [`SelectionSet::toggle`], so an id is either present
/// once or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet(BTreeSet<ItemId>);

impl SelectionSet {
    /// Adds `id` when absent, removes it when present. Returns the new membership.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.0.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.0.iter().copied()
    }

    /// Drops ids the predicate does not recognise.
    pub fn retain_known(&mut self, known: impl Fn(ItemId) -> bool) {
        self.0.retain(|id| known(*id));
    }
}
