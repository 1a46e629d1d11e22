use crate::item::{PagingItem, same_item};

/// Selection state of the paging controller.
///
/// `Scrolling` only exists while a page transition is in flight and always resolves to
/// `Selected` (either `to` when finished or `from` when cancelled).
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PagingState<I> {
    #[default]
    Empty,
    Selected {
        item: I,
    },
    Scrolling {
        from: I,
        to: I,
        /// Transition progress in `[0, 1]`.
        progress: f32,
    },
}

impl<I> PagingState<I> {
    /// The item currently considered selected. While scrolling this is still `from`.
    pub fn selected_item(&self) -> Option<&I> {
        match self {
            Self::Empty => None,
            Self::Selected { item } => Some(item),
            Self::Scrolling { from, .. } => Some(from),
        }
    }

    /// The item a transition is heading to, if any.
    pub fn upcoming_item(&self) -> Option<&I> {
        match self {
            Self::Scrolling { to, .. } => Some(to),
            _ => None,
        }
    }

    pub fn progress(&self) -> f32 {
        match self {
            Self::Scrolling { progress, .. } => *progress,
            _ => 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_scrolling(&self) -> bool {
        matches!(self, Self::Scrolling { .. })
    }
}

impl<I: PagingItem> PagingState<I> {
    /// `true` when `item` is the selected item of a settled `Selected` state.
    pub fn is_selected(&self, item: &I) -> bool {
        matches!(self, Self::Selected { item: selected } if same_item(selected, item))
    }
}

/// A lightweight, serializable snapshot of the selection.
///
/// This is what a host persists to restore the paging controller across sessions; pass it back
/// to [`crate::PagingController::restore`] together with the current data source.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagingSnapshot<I> {
    pub selected: Option<I>,
}

impl<I> Default for PagingSnapshot<I> {
    fn default() -> Self {
        Self { selected: None }
    }
}
