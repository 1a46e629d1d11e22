use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::item::{PagingItem, same_item};

/// The ordered items currently realized as menu cells.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MenuWindow<I> {
    items: Vec<I>,
}

impl<I> Default for MenuWindow<I> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<I> MenuWindow<I> {
    pub fn new(items: Vec<I>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&I> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    pub fn iter(&self) -> core::slice::Iter<'_, I> {
        self.items.iter()
    }
}

impl<I: PagingItem> MenuWindow<I> {
    pub fn index_of(&self, item: &I) -> Option<usize> {
        self.items.iter().position(|it| same_item(it, item))
    }

    pub fn contains(&self, item: &I) -> bool {
        self.index_of(item).is_some()
    }

    /// `true` when both windows hold the same identities in the same order.
    pub fn same_identities(&self, other: &[I]) -> bool {
        self.items.len() == other.len()
            && self
                .items
                .iter()
                .zip(other)
                .all(|(a, b)| same_item(a, b))
    }
}

/// The identity diff between two menu windows.
///
/// `kept` and `inserted` follow the order of the new window, `removed` the order of the old one.
/// Kept items carry their new payload.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReloadDelta<I> {
    pub kept: Vec<I>,
    pub inserted: Vec<I>,
    pub removed: Vec<I>,
}

impl<I> Default for ReloadDelta<I> {
    fn default() -> Self {
        Self {
            kept: Vec::new(),
            inserted: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<I> ReloadDelta<I> {
    /// `true` when no item was inserted or removed.
    pub fn is_identity_preserving(&self) -> bool {
        self.inserted.is_empty() && self.removed.is_empty()
    }
}

/// Diffs `old` against `new` by item identity.
pub fn reconcile<I: PagingItem>(old: &[I], new: &[I]) -> ReloadDelta<I> {
    let old_ids: BTreeSet<I::Id> = old.iter().map(PagingItem::identity).collect();
    let new_ids: BTreeSet<I::Id> = new.iter().map(PagingItem::identity).collect();

    let mut delta = ReloadDelta::default();
    for item in new {
        if old_ids.contains(&item.identity()) {
            delta.kept.push(item.clone());
        } else {
            delta.inserted.push(item.clone());
        }
    }
    delta.removed = old
        .iter()
        .filter(|it| !new_ids.contains(&it.identity()))
        .cloned()
        .collect();

    pdebug!(
        kept = delta.kept.len(),
        inserted = delta.inserted.len(),
        removed = delta.removed.len(),
        "reconcile"
    );
    delta
}
