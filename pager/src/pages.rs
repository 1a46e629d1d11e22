use alloc::vec::Vec;

use crate::item::{PageSlot, PagingDirection, PagingItem, same_item};
use crate::{ItemSource, PagingError};

/// An item paired with the content handle the host displays for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentEntry<I, C> {
    pub item: I,
    pub content: C,
}

/// The content realized in the page view: the selected page and its direct neighbors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSet<I, C> {
    pub before: Option<ContentEntry<I, C>>,
    pub selected: Option<ContentEntry<I, C>>,
    pub after: Option<ContentEntry<I, C>>,
}

impl<I, C> Default for PageSet<I, C> {
    fn default() -> Self {
        Self {
            before: None,
            selected: None,
            after: None,
        }
    }
}

impl<I, C> PageSet<I, C> {
    pub fn get(&self, slot: PageSlot) -> Option<&ContentEntry<I, C>> {
        match slot {
            PageSlot::Before => self.before.as_ref(),
            PageSlot::Selected => self.selected.as_ref(),
            PageSlot::After => self.after.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_none() && self.selected.is_none() && self.after.is_none()
    }

    /// Number of realized entries (0..=3).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Iterates over realized entries in page order.
    pub fn iter(&self) -> impl Iterator<Item = (PageSlot, &ContentEntry<I, C>)> {
        [
            (PageSlot::Before, self.before.as_ref()),
            (PageSlot::Selected, self.selected.as_ref()),
            (PageSlot::After, self.after.as_ref()),
        ]
        .into_iter()
        .filter_map(|(slot, entry)| entry.map(|e| (slot, e)))
    }

    fn into_entries(self) -> impl Iterator<Item = ContentEntry<I, C>> {
        [self.before, self.selected, self.after].into_iter().flatten()
    }
}

/// Content the host must activate and deactivate after a transition.
///
/// Apply `deactivated` before `activated`; the result then matches the controller's pages.
///
/// Entries carried over from the previous page set (same identity, no re-fetch) appear in
/// neither list, even if they moved to another slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageDiff<I, C> {
    pub activated: Vec<(PageSlot, ContentEntry<I, C>)>,
    pub deactivated: Vec<ContentEntry<I, C>>,
}

impl<I, C> Default for PageDiff<I, C> {
    fn default() -> Self {
        Self {
            activated: Vec::new(),
            deactivated: Vec::new(),
        }
    }
}

impl<I, C> PageDiff<I, C> {
    pub fn is_empty(&self) -> bool {
        self.activated.is_empty() && self.deactivated.is_empty()
    }
}

impl<I: PagingItem, C> PageDiff<I, C> {
    /// Folds `later` into the changes already recorded.
    ///
    /// The result is applied deactivations first. An entry activated here and deactivated by
    /// `later` was never shown, so both records are dropped. A deactivation followed by a fresh
    /// activation of the same identity is kept as a pair: the content may have been re-fetched.
    pub fn merge(&mut self, later: PageDiff<I, C>) {
        for gone in later.deactivated {
            let pending = self
                .activated
                .iter()
                .position(|(_, e)| same_item(&e.item, &gone.item));
            match pending {
                Some(index) => {
                    self.activated.remove(index);
                }
                None => self.deactivated.push(gone),
            }
        }
        self.activated.extend(later.activated);
    }

    /// Moves activated entries to the slot they hold in `pages`.
    pub(crate) fn resolve_slots(&mut self, pages: &PageSet<I, C>) {
        for (slot, entry) in &mut self.activated {
            if let Some((now, _)) = pages.iter().find(|(_, e)| same_item(&e.item, &entry.item)) {
                *slot = now;
            }
        }
    }
}

/// Builds the page set around `selected`.
///
/// With `reuse`, entries of `previous` whose identity is still wanted are carried over instead
/// of asking the source for new content. Nothing is mutated until every lookup succeeded.
pub(crate) fn materialize<I: PagingItem, C: Clone>(
    source: ItemSource<'_, I, C>,
    selected: &I,
    previous: &PageSet<I, C>,
    reuse: bool,
) -> Result<(PageSet<I, C>, PageDiff<I, C>), PagingError> {
    let before = source.neighbor(selected, PagingDirection::Backward);
    let after = source.neighbor(selected, PagingDirection::Forward);

    let mut diff = PageDiff::default();
    let mut next = PageSet::default();
    let mut carried: Vec<I> = Vec::new();

    let wanted = [
        (PageSlot::Before, before),
        (PageSlot::Selected, Some(selected.clone())),
        (PageSlot::After, after),
    ];

    for (slot, item) in wanted {
        let Some(item) = item else {
            continue;
        };
        let reused = reuse
            .then(|| previous.iter().find(|(_, e)| same_item(&e.item, &item)))
            .flatten()
            .map(|(_, e)| e.content.clone());
        let entry = match reused {
            Some(content) => {
                carried.push(item.clone());
                ContentEntry { item, content }
            }
            None => {
                let content = source.content_for(&item)?;
                let entry = ContentEntry { item, content };
                diff.activated.push((slot, entry.clone()));
                entry
            }
        };
        match slot {
            PageSlot::Before => next.before = Some(entry),
            PageSlot::Selected => next.selected = Some(entry),
            PageSlot::After => next.after = Some(entry),
        }
    }

    diff.deactivated = previous
        .clone()
        .into_entries()
        .filter(|e| !carried.iter().any(|c| same_item(c, &e.item)))
        .collect();

    Ok((next, diff))
}

/// Deactivates everything in `previous`.
pub(crate) fn clear<I: Clone, C: Clone>(previous: &PageSet<I, C>) -> PageDiff<I, C> {
    PageDiff {
        activated: Vec::new(),
        deactivated: previous.clone().into_entries().collect(),
    }
}
