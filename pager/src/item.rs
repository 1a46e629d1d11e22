use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;

/// One tab/page of a paging menu.
///
/// An item carries an identity plus whatever display payload the host needs (a title, an icon
/// name, a date). The engine only ever looks at the identity:
/// - two items with equal identities are the same slot, even if their payloads differ,
/// - items are ordered by their identities, and that order must stay stable across reloads.
///
/// This is what lets a menu-only reload update labels without touching page content.
pub trait PagingItem: Clone {
    type Id: Ord + Clone + fmt::Debug;

    fn identity(&self) -> Self::Id;
}

/// Returns `true` when `a` and `b` refer to the same logical slot.
pub fn same_item<I: PagingItem>(a: &I, b: &I) -> bool {
    a.identity() == b.identity()
}

/// Orders two items by identity.
pub fn compare_items<I: PagingItem>(a: &I, b: &I) -> Ordering {
    a.identity().cmp(&b.identity())
}

/// A stock item keyed by its position, with a display title.
///
/// Equality compares both fields; identity (and therefore reconciliation) only uses `index`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagingIndexItem {
    pub index: usize,
    pub title: String,
}

impl PagingIndexItem {
    pub fn new(index: usize, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
        }
    }
}

impl PagingItem for PagingIndexItem {
    type Id = usize;

    fn identity(&self) -> usize {
        self.index
    }
}

/// Position of an item in the ordered window, as seen from the page view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageSlot {
    Before,
    Selected,
    After,
}

/// Direction of a page transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PagingDirection {
    Forward,
    Backward,
}
