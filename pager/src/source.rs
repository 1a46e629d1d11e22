use alloc::vec::Vec;

use crate::item::{PagingDirection, PagingItem, compare_items};
use crate::PagingError;

/// A data source with a known number of items.
///
/// Indexes passed by the controller are always checked against `count()` first. The controller
/// queries the source again on every reload and never caches it across reloads.
pub trait PagingDataSource<I, C> {
    fn count(&self) -> usize;
    fn item_at(&self, index: usize) -> I;
    fn content_at(&self, index: usize) -> C;
}

/// A data source that discovers items by walking neighbors.
///
/// Returning `None` from `item_before`/`item_after` marks a boundary in that direction.
/// Generated neighbors must order strictly before/after the item they were asked about.
pub trait InfiniteDataSource<I, C> {
    fn item_before(&self, item: &I) -> Option<I>;
    fn item_after(&self, item: &I) -> Option<I>;
    fn content_for(&self, item: &I) -> C;
}

/// A finite source backed by two vectors.
///
/// `count()` is the shorter of the two lengths, so a half-updated source never hands out an
/// item without content.
#[derive(Clone, Debug)]
pub struct VecDataSource<I, C> {
    pub items: Vec<I>,
    pub contents: Vec<C>,
}

impl<I, C> Default for VecDataSource<I, C> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            contents: Vec::new(),
        }
    }
}

impl<I, C> VecDataSource<I, C> {
    pub fn new(items: Vec<I>, contents: Vec<C>) -> Self {
        Self { items, contents }
    }
}

impl<I: Clone, C: Clone> PagingDataSource<I, C> for VecDataSource<I, C> {
    fn count(&self) -> usize {
        self.items.len().min(self.contents.len())
    }

    fn item_at(&self, index: usize) -> I {
        self.items[index].clone()
    }

    fn content_at(&self, index: usize) -> C {
        self.contents[index].clone()
    }
}

/// A borrowed data source, handed to each controller operation.
///
/// Sources are never retained by the controller; the host passes the current one on every call.
pub enum ItemSource<'a, I, C> {
    Finite(&'a dyn PagingDataSource<I, C>),
    Infinite(&'a dyn InfiniteDataSource<I, C>),
}

impl<I, C> Clone for ItemSource<'_, I, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, C> Copy for ItemSource<'_, I, C> {}

impl<I, C> core::fmt::Debug for ItemSource<'_, I, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Finite(s) => f
                .debug_struct("Finite")
                .field("count", &s.count())
                .finish_non_exhaustive(),
            Self::Infinite(_) => f.write_str("Infinite(..)"),
        }
    }
}

impl<'a, I: PagingItem, C> ItemSource<'a, I, C> {
    pub fn finite(source: &'a dyn PagingDataSource<I, C>) -> Self {
        Self::Finite(source)
    }

    pub fn infinite(source: &'a dyn InfiniteDataSource<I, C>) -> Self {
        Self::Infinite(source)
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// The number of items, when known.
    pub fn count(&self) -> Option<usize> {
        match self {
            Self::Finite(s) => Some(s.count()),
            Self::Infinite(_) => None,
        }
    }

    pub fn checked_item_at(&self, index: usize) -> Result<I, PagingError> {
        match self {
            Self::Finite(s) => {
                let count = s.count();
                if index >= count {
                    pwarn!(index, count, "item_at: out-of-bounds index");
                    return Err(PagingError::IndexOutOfBounds { index, count });
                }
                Ok(s.item_at(index))
            }
            Self::Infinite(_) => Err(PagingError::IndexedSelectionUnsupported),
        }
    }

    pub fn checked_content_at(&self, index: usize) -> Result<C, PagingError> {
        match self {
            Self::Finite(s) => {
                let count = s.count();
                if index >= count {
                    pwarn!(index, count, "content_at: out-of-bounds index");
                    return Err(PagingError::IndexOutOfBounds { index, count });
                }
                Ok(s.content_at(index))
            }
            Self::Infinite(_) => Err(PagingError::IndexedSelectionUnsupported),
        }
    }

    /// Looks up the index of `item` by identity. Always `None` for infinite sources.
    pub fn index_of(&self, item: &I) -> Option<usize> {
        let Self::Finite(s) = self else {
            return None;
        };
        let id = item.identity();
        (0..s.count()).find(|&i| s.item_at(i).identity() == id)
    }

    /// All items of a finite source, in order. Empty for infinite sources.
    pub fn items(&self) -> Vec<I> {
        match self {
            Self::Finite(s) => (0..s.count()).map(|i| s.item_at(i)).collect(),
            Self::Infinite(_) => Vec::new(),
        }
    }

    /// Resolves `item` to the source's own instance (fresh payload, same identity).
    pub fn resolve(&self, item: &I) -> Result<I, PagingError> {
        match self {
            Self::Finite(_) => {
                let index = self.index_of(item).ok_or(PagingError::ItemNotFound)?;
                self.checked_item_at(index)
            }
            Self::Infinite(_) => Ok(item.clone()),
        }
    }

    pub fn content_for(&self, item: &I) -> Result<C, PagingError> {
        match self {
            Self::Finite(_) => {
                let index = self.index_of(item).ok_or(PagingError::ItemNotFound)?;
                self.checked_content_at(index)
            }
            Self::Infinite(s) => Ok(s.content_for(item)),
        }
    }

    /// Returns the neighbor of `item` in `direction`, or `None` at a boundary.
    pub fn neighbor(&self, item: &I, direction: PagingDirection) -> Option<I> {
        match self {
            Self::Finite(s) => {
                let index = self.index_of(item)?;
                let next = match direction {
                    PagingDirection::Forward => index.checked_add(1)?,
                    PagingDirection::Backward => index.checked_sub(1)?,
                };
                (next < s.count()).then(|| s.item_at(next))
            }
            Self::Infinite(s) => {
                let next = match direction {
                    PagingDirection::Forward => s.item_after(item)?,
                    PagingDirection::Backward => s.item_before(item)?,
                };
                if ordered_neighbor(item, &next, direction) {
                    Some(next)
                } else {
                    None
                }
            }
        }
    }

    /// Computes the menu window around `around`.
    ///
    /// Finite sources yield every item. Infinite sources grow alternately after and before the
    /// anchor until `window_size` items are realized or both directions reached a boundary. When
    /// one direction is exhausted, the other keeps growing, so the window is only smaller than
    /// `window_size` when the source itself has fewer items.
    pub fn window_around(&self, around: &I, window_size: usize) -> Vec<I> {
        if self.is_finite() {
            return self.items();
        }

        let target = window_size.max(1);
        let mut before: Vec<I> = Vec::new();
        let mut after: Vec<I> = Vec::new();
        let mut before_open = true;
        let mut after_open = true;

        while 1 + before.len() + after.len() < target && (before_open || after_open) {
            let grow_after = after_open && (!before_open || after.len() <= before.len());
            if grow_after {
                let anchor = after.last().unwrap_or(around);
                match self.neighbor(anchor, PagingDirection::Forward) {
                    Some(next) => after.push(next),
                    None => after_open = false,
                }
            } else {
                let anchor = before.last().unwrap_or(around);
                match self.neighbor(anchor, PagingDirection::Backward) {
                    Some(prev) => before.push(prev),
                    None => before_open = false,
                }
            }
        }

        pdebug!(
            before = before.len(),
            after = after.len(),
            window_size = target,
            "window_around"
        );

        let mut window = Vec::with_capacity(1 + before.len() + after.len());
        window.extend(before.into_iter().rev());
        window.push(around.clone());
        window.extend(after);
        window
    }
}

fn ordered_neighbor<I: PagingItem>(anchor: &I, next: &I, direction: PagingDirection) -> bool {
    let ordering = compare_items(next, anchor);
    let ok = match direction {
        PagingDirection::Forward => ordering.is_gt(),
        PagingDirection::Backward => ordering.is_lt(),
    };
    if !ok {
        pwarn!(
            anchor = ?anchor.identity(),
            next = ?next.identity(),
            "infinite source returned an unordered neighbor"
        );
        debug_assert!(
            ok,
            "infinite source returned an unordered neighbor (anchor={:?}, next={:?})",
            anchor.identity(),
            next.identity()
        );
    }
    ok
}
