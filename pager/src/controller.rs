use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::item::{PagingDirection, PagingItem, same_item};
use crate::layout::{IndicatorFrame, MenuCell, lerp_u32, lerp_u64};
use crate::pages::{self, PageDiff, PageSet};
use crate::reload::{MenuWindow, ReloadDelta, reconcile};
use crate::{
    ItemSource, MenuItemSize, PagingError, PagingOptions, PagingSnapshot, PagingState,
    SelectedScrollPosition,
};

/// A headless paging menu engine.
///
/// The controller keeps a tab menu and a page view in lock-step:
/// - It owns the selection state, the realized menu window and the realized pages.
/// - Data sources are borrowed per call and never retained.
/// - Rendering is left to the host: it reads [`Self::menu_window`], [`Self::pages`] and the
///   layout helpers, and drains content changes with [`Self::take_page_diff`].
///
/// Every mutation happens through `&mut self` on the host's UI sequence; nothing here blocks.
/// For gesture and host wiring, see the `pager-adapter` crate.
#[derive(Clone, Debug)]
pub struct PagingController<I: PagingItem, C> {
    options: PagingOptions<I, C>,
    state: PagingState<I>,
    window: MenuWindow<I>,
    pages: PageSet<I, C>,
    pending_diff: PageDiff<I, C>,
    measured: BTreeMap<I::Id, u32>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<I: PagingItem, C: Clone> PagingController<I, C> {
    /// Creates an empty controller. Nothing is realized until the first selection or reload.
    pub fn new(options: PagingOptions<I, C>) -> Self {
        pdebug!(
            window_size = options.window_size,
            menu_item_size = ?options.menu_item_size,
            "PagingController::new"
        );
        Self {
            options,
            state: PagingState::Empty,
            window: MenuWindow::default(),
            pages: PageSet::default(),
            pending_diff: PageDiff::default(),
            measured: BTreeMap::new(),
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &PagingOptions<I, C> {
        &self.options
    }

    /// Replaces the options. A new `window_size` applies from the next selection or reload.
    pub fn set_options(&mut self, options: PagingOptions<I, C>) {
        self.options = options;
        ptrace!(
            window_size = self.options.window_size,
            "PagingController::set_options"
        );
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut PagingOptions<I, C>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_menu_item_size(&mut self, menu_item_size: MenuItemSize) {
        if self.options.menu_item_size == menu_item_size {
            return;
        }
        self.options.menu_item_size = menu_item_size;
        self.notify();
    }

    pub fn set_size_provider(
        &mut self,
        size_provider: Option<impl Fn(&I, bool) -> u32 + Send + Sync + 'static>,
    ) {
        self.options.size_provider = size_provider.map(|f| Arc::new(f) as _);
        self.notify();
    }

    /// Applies from the next selection or reload; the current window is left as is.
    pub fn set_window_size(&mut self, window_size: usize) {
        if self.options.window_size == window_size {
            return;
        }
        self.options.window_size = window_size;
        self.notify();
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&PagingController<I, C>, bool) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self, self.state.is_scrolling());
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn state(&self) -> &PagingState<I> {
        &self.state
    }

    pub fn selected_item(&self) -> Option<&I> {
        self.state.selected_item()
    }

    pub fn is_scrolling(&self) -> bool {
        self.state.is_scrolling()
    }

    pub fn menu_window(&self) -> &MenuWindow<I> {
        &self.window
    }

    /// Index of the selected item inside the menu window.
    pub fn selected_menu_index(&self) -> Option<usize> {
        let selected = self.state.selected_item()?;
        self.window.index_of(selected)
    }

    pub fn pages(&self) -> &PageSet<I, C> {
        &self.pages
    }

    /// The content handle of the selected page.
    pub fn selected_content(&self) -> Option<&C> {
        self.pages.selected.as_ref().map(|e| &e.content)
    }

    /// Returns and clears the content changes recorded since the last call.
    ///
    /// Changes of several operations are folded together, so applying the result (deactivations
    /// first) brings a host from the pages of the previous call to [`Self::pages`].
    pub fn take_page_diff(&mut self) -> PageDiff<I, C> {
        let mut diff = core::mem::take(&mut self.pending_diff);
        diff.resolve_slots(&self.pages);
        diff
    }

    pub fn has_pending_page_diff(&self) -> bool {
        !self.pending_diff.is_empty()
    }

    /// Selects the item at `index` of a finite source.
    ///
    /// Returns `Ok(false)` when the item is already selected.
    pub fn select_index(
        &mut self,
        source: ItemSource<'_, I, C>,
        index: usize,
    ) -> Result<bool, PagingError> {
        let item = source.checked_item_at(index)?;
        self.select_resolved(source, item)
    }

    /// Selects `item`, materializing the menu window and pages around it.
    ///
    /// This works before any layout has happened. For infinite sources the window is grown
    /// around `item` until `window_size` items are realized or both boundaries are reached.
    ///
    /// Returns `Ok(false)` when the item is already selected.
    pub fn select_item(
        &mut self,
        source: ItemSource<'_, I, C>,
        item: I,
    ) -> Result<bool, PagingError> {
        let item = source.resolve(&item)?;
        self.select_resolved(source, item)
    }

    fn select_resolved(
        &mut self,
        source: ItemSource<'_, I, C>,
        item: I,
    ) -> Result<bool, PagingError> {
        if self.state.is_selected(&item) {
            ptrace!(item = ?item.identity(), "select: already selected");
            return Ok(false);
        }
        pdebug!(item = ?item.identity(), "select");
        let window = self.window_for_selection(source, &item);
        self.apply_selection(source, item, window, true)?;
        Ok(true)
    }

    fn window_for_selection(&self, source: ItemSource<'_, I, C>, item: &I) -> Vec<I> {
        if source.is_finite() && self.window.contains(item) {
            return self.window.items().to_vec();
        }
        source.window_around(item, self.options.window_size)
    }

    /// Moves to `Selected(item)` with `window`, materializing pages first so a failed content
    /// lookup leaves the controller untouched.
    fn apply_selection(
        &mut self,
        source: ItemSource<'_, I, C>,
        item: I,
        window: Vec<I>,
        reuse: bool,
    ) -> Result<ReloadDelta<I>, PagingError> {
        let (pages, diff) = pages::materialize(source, &item, &self.pages, reuse)?;
        let delta = reconcile(self.window.items(), &window);

        self.window = MenuWindow::new(window);
        self.pages = pages;
        self.pending_diff.merge(diff);
        self.state = PagingState::Selected { item };
        self.notify();
        Ok(delta)
    }

    fn clear(&mut self) -> ReloadDelta<I> {
        pdebug!(removed = self.window.len(), "clear");
        let delta = reconcile(self.window.items(), &[]);
        self.pending_diff.merge(pages::clear(&self.pages));
        self.pages = PageSet::default();
        self.window = MenuWindow::default();
        self.state = PagingState::Empty;
        self.notify();
        delta
    }

    /// Regenerates the menu window only.
    ///
    /// Items whose identity is unchanged pick up their new payload (e.g. a new title). Pages
    /// are never touched, even when the source now returns different content; if the selected
    /// identity disappeared, the selection stays as it is until a full reload.
    pub fn reload_menu(&mut self, source: ItemSource<'_, I, C>) -> ReloadDelta<I> {
        let items = match self.state.selected_item() {
            _ if source.is_finite() => source.items(),
            Some(selected) => source.window_around(selected, self.options.window_size),
            None => Vec::new(),
        };
        let delta = reconcile(self.window.items(), &items);

        if let PagingState::Selected { item } = &mut self.state {
            let fresh = items.iter().find(|it| same_item(*it, &*item)).cloned();
            match fresh {
                Some(fresh) => *item = fresh,
                None => {
                    pdebug!(item = ?item.identity(), "reload_menu: selected item is gone");
                }
            }
        }

        self.window = MenuWindow::new(items);
        self.notify();
        delta
    }

    /// Reloads menu and pages from `source`.
    ///
    /// The previous selection is kept when its identity still exists; otherwise the first item
    /// is selected, and an empty source clears the controller to [`PagingState::Empty`]. All
    /// page content is fetched again. An in-flight transition is discarded.
    ///
    /// Infinite sources have no "first" item: they re-expand around the current selection and
    /// do nothing without one.
    pub fn reload_data(
        &mut self,
        source: ItemSource<'_, I, C>,
    ) -> Result<ReloadDelta<I>, PagingError> {
        if !source.is_finite() {
            let Some(selected) = self.state.selected_item().cloned() else {
                pdebug!("reload_data: nothing selected");
                return Ok(ReloadDelta::default());
            };
            let window = source.window_around(&selected, self.options.window_size);
            return self.apply_selection(source, selected, window, false);
        }

        let items = source.items();
        let previous = self
            .state
            .selected_item()
            .and_then(|selected| items.iter().find(|it| same_item(*it, selected)))
            .cloned();
        let Some(target) = previous.or_else(|| items.first().cloned()) else {
            return Ok(self.clear());
        };
        pdebug!(
            count = items.len(),
            target = ?target.identity(),
            "reload_data"
        );
        self.apply_selection(source, target, items, false)
    }

    /// Reloads menu and pages from `source`, selecting `item` regardless of the previous
    /// selection.
    ///
    /// Finite sources must contain `item`'s identity.
    pub fn reload_data_around(
        &mut self,
        source: ItemSource<'_, I, C>,
        item: I,
    ) -> Result<ReloadDelta<I>, PagingError> {
        let target = source.resolve(&item)?;
        pdebug!(target = ?target.identity(), "reload_data_around");
        let window = source.window_around(&target, self.options.window_size);
        self.apply_selection(source, target, window, false)
    }

    /// Starts a transition to the neighbor page in `direction`.
    ///
    /// Returns `false` when nothing is selected, a transition is already running, or there is
    /// no page in that direction.
    pub fn begin_scroll(&mut self, direction: PagingDirection) -> bool {
        let PagingState::Selected { item } = &self.state else {
            return false;
        };
        let from = item.clone();
        let target = match direction {
            PagingDirection::Forward => self.pages.after.as_ref(),
            PagingDirection::Backward => self.pages.before.as_ref(),
        };
        let Some(to) = target.map(|e| e.item.clone()) else {
            ptrace!(?direction, "begin_scroll: boundary");
            return false;
        };
        ptrace!(?direction, "begin_scroll");
        self.state = PagingState::Scrolling {
            from,
            to,
            progress: 0.0,
        };
        self.notify();
        true
    }

    /// Updates the progress of the running transition (clamped to `[0, 1]`).
    pub fn update_scroll_progress(&mut self, progress: f32) {
        let next = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let PagingState::Scrolling { progress: p, .. } = &mut self.state else {
            return;
        };
        if *p == next {
            return;
        }
        *p = next;
        ptrace!(progress = next, "update_scroll_progress");
        self.notify();
    }

    /// Completes the running transition, selecting its target.
    pub fn finish_scroll(&mut self, source: ItemSource<'_, I, C>) -> Result<bool, PagingError> {
        let PagingState::Scrolling { to, .. } = &self.state else {
            return Ok(false);
        };
        let to = to.clone();
        let window = self.window_for_selection(source, &to);
        self.apply_selection(source, to, window, true)?;
        Ok(true)
    }

    /// Abandons the running transition, returning to its origin.
    pub fn cancel_scroll(&mut self) -> bool {
        let PagingState::Scrolling { from, .. } = &self.state else {
            return false;
        };
        let item = from.clone();
        ptrace!("cancel_scroll");
        self.state = PagingState::Selected { item };
        self.notify();
        true
    }

    /// Captures the selection for later [`Self::restore`].
    pub fn snapshot(&self) -> PagingSnapshot<I> {
        PagingSnapshot {
            selected: self.state.selected_item().cloned(),
        }
    }

    /// Restores a snapshot against the current `source`.
    ///
    /// Falls back to [`Self::reload_data`] when the saved item no longer exists.
    pub fn restore(
        &mut self,
        source: ItemSource<'_, I, C>,
        snapshot: PagingSnapshot<I>,
    ) -> Result<ReloadDelta<I>, PagingError> {
        let Some(item) = snapshot.selected else {
            return self.reload_data(source);
        };
        match self.reload_data_around(source, item) {
            Err(PagingError::ItemNotFound) => self.reload_data(source),
            other => other,
        }
    }

    /// Records the measured width of a self-sized menu item.
    ///
    /// Measurements are keyed by identity and survive reloads.
    pub fn measure(&mut self, item: &I, width: u32) {
        let prev = self.measured.insert(item.identity(), width);
        if prev != Some(width) {
            ptrace!(item = ?item.identity(), width, "measure");
            self.notify();
        }
    }

    pub fn measured_width(&self, item: &I) -> Option<u32> {
        self.measured.get(&item.identity()).copied()
    }

    pub fn reset_measurements(&mut self) {
        self.measured.clear();
        self.notify();
    }

    /// Returns the number of cached measured widths.
    pub fn measurement_cache_len(&self) -> usize {
        self.measured.len()
    }

    /// Exports the cached measured widths (useful for persistence).
    pub fn export_measurement_cache(&self) -> Vec<(I::Id, u32)> {
        self.measured.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }

    /// Replaces the cached measured widths.
    pub fn import_measurement_cache(&mut self, entries: impl IntoIterator<Item = (I::Id, u32)>) {
        self.measured.clear();
        self.measured.extend(entries);
        pdebug!(entries = self.measured.len(), "import_measurement_cache");
        self.notify();
    }

    /// The width of `item` in its selected/unselected state, before interpolation and
    /// size-to-fit stretching.
    pub fn item_width(&self, item: &I, is_selected: bool) -> u32 {
        if let Some(f) = &self.options.size_provider {
            return f(item, is_selected);
        }
        match self.options.menu_item_size {
            MenuItemSize::SelfSizing {
                estimated_width, ..
            } => self.measured_width(item).unwrap_or(estimated_width),
            size => size.width(),
        }
    }

    fn cell_width(&self, item: &I) -> u32 {
        match &self.state {
            PagingState::Empty => self.item_width(item, false),
            PagingState::Selected { item: selected } => {
                self.item_width(item, same_item(item, selected))
            }
            PagingState::Scrolling { from, to, progress } => {
                if same_item(item, from) {
                    lerp_u32(
                        self.item_width(item, true),
                        self.item_width(item, false),
                        *progress,
                    )
                } else if same_item(item, to) {
                    lerp_u32(
                        self.item_width(item, false),
                        self.item_width(item, true),
                        *progress,
                    )
                } else {
                    self.item_width(item, false)
                }
            }
        }
    }

    fn cell_is_selected(&self, item: &I) -> bool {
        match &self.state {
            PagingState::Empty => false,
            PagingState::Selected { item: selected } => same_item(item, selected),
            PagingState::Scrolling { from, to, progress } => {
                if *progress < 0.5 {
                    same_item(item, from)
                } else {
                    same_item(item, to)
                }
            }
        }
    }

    /// Lays out the menu window into `out` (cleared first).
    pub fn collect_menu_cells(&self, viewport_width: u32, out: &mut Vec<MenuCell>) {
        out.clear();
        let count = self.window.len();
        if count == 0 {
            return;
        }

        let height = self.options.menu_item_size.height();
        out.extend(self.window.iter().enumerate().map(|(index, item)| MenuCell {
            index,
            start: 0,
            width: self.cell_width(item),
            height,
            is_selected: self.cell_is_selected(item),
        }));

        let spacing = self.options.menu_item_spacing as u64;
        let insets = self.options.menu_inset_start as u64 + self.options.menu_inset_end as u64;
        let size_to_fit = self.options.size_provider.is_none()
            && matches!(self.options.menu_item_size, MenuItemSize::SizeToFit { .. });
        if size_to_fit {
            let gaps = spacing.saturating_mul(count as u64 - 1);
            let natural = out
                .iter()
                .fold(insets.saturating_add(gaps), |acc, c| acc.saturating_add(c.width as u64));
            let view = viewport_width as u64;
            if natural < view {
                let each = (view - insets - gaps) / count as u64;
                let each = u32::try_from(each).unwrap_or(u32::MAX);
                for cell in out.iter_mut() {
                    cell.width = cell.width.max(each);
                }
            }
        }

        let mut start = self.options.menu_inset_start as u64;
        for cell in out.iter_mut() {
            cell.start = start;
            start = start
                .saturating_add(cell.width as u64)
                .saturating_add(spacing);
        }
        ptrace!(count, viewport_width, "collect_menu_cells");
    }

    /// Lays out the menu window.
    ///
    /// This is a convenience wrapper around [`Self::collect_menu_cells`]; prefer that one with a
    /// reused buffer on hot paths.
    pub fn menu_layout(&self, viewport_width: u32) -> Vec<MenuCell> {
        let mut out = Vec::with_capacity(self.window.len());
        self.collect_menu_cells(viewport_width, &mut out);
        out
    }

    /// Total menu width, insets included.
    pub fn content_width(&self, viewport_width: u32) -> u64 {
        let cells = self.menu_layout(viewport_width);
        match cells.last() {
            Some(last) => last
                .end()
                .saturating_add(self.options.menu_inset_end as u64),
            None => self.options.menu_inset_start as u64 + self.options.menu_inset_end as u64,
        }
    }

    pub fn max_menu_offset(&self, viewport_width: u32) -> u64 {
        self.content_width(viewport_width)
            .saturating_sub(viewport_width as u64)
    }

    /// Frame of the selection indicator, interpolated while scrolling.
    pub fn indicator_frame(&self, viewport_width: u32) -> Option<IndicatorFrame> {
        let cells = self.menu_layout(viewport_width);
        let frame_of = |item: &I| {
            let cell = cells.get(self.window.index_of(item)?)?;
            Some(IndicatorFrame {
                start: cell.start,
                width: cell.width,
            })
        };
        match &self.state {
            PagingState::Empty => None,
            PagingState::Selected { item } => frame_of(item),
            PagingState::Scrolling { from, to, progress } => {
                match (frame_of(from), frame_of(to)) {
                    (Some(a), Some(b)) => Some(IndicatorFrame {
                        start: lerp_u64(a.start, b.start, *progress),
                        width: lerp_u32(a.width, b.width, *progress),
                    }),
                    (a, b) => a.or(b),
                }
            }
        }
    }

    /// The menu scroll offset that brings the selection to `selected_scroll_position`
    /// (clamped to the scrollable range).
    pub fn selected_scroll_offset(&self, viewport_width: u32) -> u64 {
        let Some(frame) = self.indicator_frame(viewport_width) else {
            return 0;
        };
        let view = viewport_width as u64;
        let target = match self.options.selected_scroll_position {
            SelectedScrollPosition::Left => frame
                .start
                .saturating_sub(self.options.menu_inset_start as u64),
            SelectedScrollPosition::Right => frame
                .end()
                .saturating_add(self.options.menu_inset_end as u64)
                .saturating_sub(view),
            SelectedScrollPosition::Center => {
                let center = frame.start.saturating_add(frame.width as u64 / 2);
                center.saturating_sub(view / 2)
            }
        };
        target.min(self.max_menu_offset(viewport_width))
    }
}
