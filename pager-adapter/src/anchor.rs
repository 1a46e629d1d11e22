use core::fmt;

use pager::{PagingController, PagingItem};

/// A menu anchor: keeps the menu visually stable across reloads.
///
/// Typical use: labels change width or items are inserted in front of the visible ones, and the
/// menu should not jump.
#[derive(Clone, PartialEq, Eq)]
pub struct MenuAnchor<Id> {
    pub identity: Id,
    /// The distance from the anchor item's start to the menu scroll offset.
    pub offset_in_viewport: u64,
}

impl<Id: fmt::Debug> fmt::Debug for MenuAnchor<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuAnchor")
            .field("identity", &self.identity)
            .field("offset_in_viewport", &self.offset_in_viewport)
            .finish()
    }
}

/// Persistable menu scroll position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MenuScrollState {
    pub offset: u64,
}

/// Captures an anchor for the first menu cell visible at `menu_offset`.
///
/// Returns `None` when the menu is empty.
pub fn capture_first_visible_anchor<I: PagingItem, C: Clone>(
    p: &PagingController<I, C>,
    viewport_width: u32,
    menu_offset: u64,
) -> Option<MenuAnchor<I::Id>> {
    let cells = p.menu_layout(viewport_width);
    let cell = cells
        .iter()
        .find(|c| c.end() > menu_offset)
        .or(cells.last())?;
    let item = p.menu_window().get(cell.index)?;
    Some(MenuAnchor {
        identity: item.identity(),
        offset_in_viewport: menu_offset.saturating_sub(cell.start),
    })
}

/// Resolves a previously captured anchor against the current menu layout.
///
/// Returns the clamped menu offset, or `None` when the anchored identity is gone.
pub fn apply_anchor<I: PagingItem, C: Clone>(
    p: &PagingController<I, C>,
    anchor: &MenuAnchor<I::Id>,
    viewport_width: u32,
) -> Option<u64> {
    let window = p.menu_window();
    let index = window
        .iter()
        .position(|item| item.identity() == anchor.identity)?;
    let cells = p.menu_layout(viewport_width);
    let start = cells.get(index)?.start;
    let target = start.saturating_add(anchor.offset_in_viewport);
    Some(target.min(p.max_menu_offset(viewport_width)))
}
