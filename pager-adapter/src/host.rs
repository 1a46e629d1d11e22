use pager::{MenuWindow, PageDiff, PageSet, PagingState, ReloadDelta};

/// The host side of a paging menu: whatever renders menu cells and page content.
///
/// [`crate::Controller`] calls these after each operation, once per operation, with the
/// controller's settled state.
pub trait PagingHost<I, C> {
    /// The menu window changed (items inserted/removed, or labels reloaded).
    fn menu_changed(&mut self, window: &MenuWindow<I>, delta: &ReloadDelta<I>);

    /// Page content must be activated/deactivated. `pages` is the full realized set.
    fn page_changed(&mut self, pages: &PageSet<I, C>, diff: &PageDiff<I, C>);

    fn selection_changed(&mut self, state: &PagingState<I>) {
        let _ = state;
    }

    /// The menu should scroll to `offset`.
    fn menu_scrolled(&mut self, offset: u64) {
        let _ = offset;
    }
}
