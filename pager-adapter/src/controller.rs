use pager::{
    ItemSource, PagingController, PagingDirection, PagingError, PagingItem, PagingOptions,
    PagingSnapshot, ReloadDelta, reconcile,
};

use crate::{
    MenuAnchor, MenuScrollState, PagingHost, Transition, apply_anchor,
    capture_first_visible_anchor,
};

/// A framework-neutral controller that wraps a [`PagingController`] and wires it to a host.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_layout` whenever the menu viewport is laid out (the first call loads the data)
/// - `on_swipe_*` while the user drags the page view
/// - `tick(now_ms)` each frame while a programmatic transition runs
///
/// After each call the host is told what changed through [`PagingHost`]. The menu scroll offset
/// follows the selection, except across `reload_menu`, where it stays anchored to the first
/// visible item.
#[derive(Clone, Debug)]
pub struct Controller<I: PagingItem, C> {
    p: PagingController<I, C>,
    transition: Option<Transition>,
    viewport_width: u32,
    menu_offset: u64,
    laid_out: bool,
}

impl<I: PagingItem, C: Clone> Controller<I, C> {
    pub fn new(options: PagingOptions<I, C>) -> Self {
        Self::from_controller(PagingController::new(options))
    }

    pub fn from_controller(p: PagingController<I, C>) -> Self {
        Self {
            p,
            transition: None,
            viewport_width: 0,
            menu_offset: 0,
            laid_out: false,
        }
    }

    pub fn controller(&self) -> &PagingController<I, C> {
        &self.p
    }

    pub fn controller_mut(&mut self) -> &mut PagingController<I, C> {
        &mut self.p
    }

    pub fn into_controller(self) -> PagingController<I, C> {
        self.p
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Drops the running transition without resolving it.
    ///
    /// The core stays in `Scrolling`; pair this with a swipe or a selection.
    pub fn cancel_animation(&mut self) {
        self.transition = None;
    }

    pub fn has_laid_out(&self) -> bool {
        self.laid_out
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn menu_offset(&self) -> u64 {
        self.menu_offset
    }

    pub fn menu_scroll_state(&self) -> MenuScrollState {
        MenuScrollState {
            offset: self.menu_offset,
        }
    }

    /// Restores a saved menu offset, clamped to the current layout.
    ///
    /// Returns the applied offset.
    pub fn restore_menu_scroll_state(&mut self, state: MenuScrollState) -> u64 {
        self.on_menu_scroll(state.offset)
    }

    /// Call this when the user scrolls the menu directly.
    ///
    /// Returns the applied (clamped) offset.
    pub fn on_menu_scroll(&mut self, offset: u64) -> u64 {
        self.menu_offset = offset.min(self.p.max_menu_offset(self.viewport_width));
        self.menu_offset
    }

    /// Call this when the menu viewport is laid out.
    ///
    /// The first layout loads the data unless something was selected before rendering.
    pub fn on_layout(
        &mut self,
        source: ItemSource<'_, I, C>,
        host: &mut impl PagingHost<I, C>,
        viewport_width: u32,
    ) -> Result<(), PagingError> {
        self.viewport_width = viewport_width;
        if !self.laid_out {
            let delta = if self.p.state().is_empty() {
                self.p.reload_data(source)?
            } else {
                reconcile(&[], self.p.menu_window().items())
            };
            adebug!(viewport_width, items = self.p.menu_window().len(), "first layout");
            self.laid_out = true;
            host.menu_changed(self.p.menu_window(), &delta);
            self.flush(host);
        }
        self.follow_selection(host);
        Ok(())
    }

    /// Starts a user-driven transition. Returns `false` at a boundary or while another
    /// transition runs.
    pub fn on_swipe_began(
        &mut self,
        host: &mut impl PagingHost<I, C>,
        direction: PagingDirection,
    ) -> bool {
        if self.p.is_scrolling() || !self.p.begin_scroll(direction) {
            return false;
        }
        atrace!(?direction, "swipe began");
        host.selection_changed(self.p.state());
        true
    }

    pub fn on_swipe_progress(&mut self, host: &mut impl PagingHost<I, C>, progress: f32) {
        if self.transition.is_some() || !self.p.is_scrolling() {
            return;
        }
        self.p.update_scroll_progress(progress);
        host.selection_changed(self.p.state());
        self.follow_selection(host);
    }

    /// Ends a user-driven transition: `commit` selects the target, otherwise the origin is kept.
    ///
    /// Returns whether the selection changed.
    pub fn on_swipe_ended(
        &mut self,
        source: ItemSource<'_, I, C>,
        host: &mut impl PagingHost<I, C>,
        commit: bool,
    ) -> Result<bool, PagingError> {
        if self.transition.is_some() {
            return Ok(false);
        }
        atrace!(commit, "swipe ended");
        if commit {
            self.finish(source, host)
        } else {
            self.p.cancel_scroll();
            self.flush(host);
            Ok(false)
        }
    }

    /// Starts a programmatic transition to the neighbor page, driven by [`Self::tick`].
    ///
    /// Returns `false` at a boundary or while another transition runs.
    pub fn start_transition(
        &mut self,
        host: &mut impl PagingHost<I, C>,
        direction: PagingDirection,
        now_ms: u64,
        duration_ms: u64,
    ) -> bool {
        if self.p.is_scrolling() || !self.p.begin_scroll(direction) {
            return false;
        }
        let transition = Transition::new(now_ms, duration_ms);
        adebug!(?direction, duration_ms = transition.duration_ms, "start transition");
        self.transition = Some(transition);
        host.selection_changed(self.p.state());
        true
    }

    /// Advances the running transition.
    ///
    /// Returns the sampled progress, or `None` when nothing is animating. The sample that
    /// reaches `1.0` also selects the target.
    pub fn tick(
        &mut self,
        source: ItemSource<'_, I, C>,
        host: &mut impl PagingHost<I, C>,
        now_ms: u64,
    ) -> Result<Option<f32>, PagingError> {
        let Some(transition) = self.transition else {
            return Ok(None);
        };

        let progress = transition.progress(now_ms);
        self.p.update_scroll_progress(progress);

        if transition.is_done(now_ms) {
            self.transition = None;
            self.finish(source, host)?;
        } else {
            host.selection_changed(self.p.state());
            self.follow_selection(host);
        }
        Ok(Some(progress))
    }

    /// Selects the item at `index` of a finite source. A running transition is dropped.
    pub fn select_index(
        &mut self,
        source: ItemSource<'_, I, C>,
        host: &mut impl PagingHost<I, C>,
        index: usize,
    ) -> Result<bool, PagingError> {
        self.cancel_animation();
        self.track(host, |p| p.select_index(source, index))
    }

    pub fn select_item(
        &mut self,
        source: ItemSource<'_, I, C>,
        host: &mut impl PagingHost<I, C>,
        item: I,
    ) -> Result<bool, PagingError> {
        self.cancel_animation();
        self.track(host, |p| p.select_item(source, item))
    }

    /// Regenerates the menu only, keeping the first visible menu item in place.
    pub fn reload_menu(
        &mut self,
        source: ItemSource<'_, I, C>,
        host: &mut impl PagingHost<I, C>,
    ) -> ReloadDelta<I> {
        let anchor = self.capture_menu_anchor();
        let delta = self.p.reload_menu(source);
        host.menu_changed(self.p.menu_window(), &delta);
        host.selection_changed(self.p.state());

        if let Some(offset) = anchor.and_then(|a| self.apply_menu_anchor(&a)) {
            self.scroll_menu(host, offset);
        }
        delta
    }

    pub fn reload_data(
        &mut self,
        source: ItemSource<'_, I, C>,
        host: &mut impl PagingHost<I, C>,
    ) -> Result<ReloadDelta<I>, PagingError> {
        self.cancel_animation();
        self.reload(host, |p| p.reload_data(source))
    }

    pub fn reload_data_around(
        &mut self,
        source: ItemSource<'_, I, C>,
        host: &mut impl PagingHost<I, C>,
        item: I,
    ) -> Result<ReloadDelta<I>, PagingError> {
        self.cancel_animation();
        self.reload(host, |p| p.reload_data_around(source, item))
    }

    /// Restores a saved selection and menu offset.
    pub fn restore(
        &mut self,
        source: ItemSource<'_, I, C>,
        host: &mut impl PagingHost<I, C>,
        snapshot: PagingSnapshot<I>,
        menu: MenuScrollState,
    ) -> Result<ReloadDelta<I>, PagingError> {
        self.cancel_animation();
        let delta = self.reload(host, |p| p.restore(source, snapshot))?;
        let offset = self.restore_menu_scroll_state(menu);
        host.menu_scrolled(offset);
        Ok(delta)
    }

    /// Captures an anchor for the first visible menu item.
    pub fn capture_menu_anchor(&self) -> Option<MenuAnchor<I::Id>> {
        if !self.laid_out {
            return None;
        }
        capture_first_visible_anchor(&self.p, self.viewport_width, self.menu_offset)
    }

    /// Resolves `anchor` against the current menu. Returns the offset to scroll to.
    pub fn apply_menu_anchor(&self, anchor: &MenuAnchor<I::Id>) -> Option<u64> {
        apply_anchor(&self.p, anchor, self.viewport_width)
    }

    /// Resolves the running transition to its target. When the target can no longer be
    /// materialized the transition is cancelled, so the core never stays in `Scrolling`.
    fn finish(
        &mut self,
        source: ItemSource<'_, I, C>,
        host: &mut impl PagingHost<I, C>,
    ) -> Result<bool, PagingError> {
        match self.track(host, |p| p.finish_scroll(source)) {
            Ok(changed) => Ok(changed),
            Err(err) => {
                adebug!(?err, "finish failed, returning to origin");
                self.p.cancel_scroll();
                self.flush(host);
                self.follow_selection(host);
                Err(err)
            }
        }
    }

    /// Runs a selection, reporting a menu change only when the window's identities changed.
    fn track<T>(
        &mut self,
        host: &mut impl PagingHost<I, C>,
        f: impl FnOnce(&mut PagingController<I, C>) -> Result<T, PagingError>,
    ) -> Result<T, PagingError> {
        let before = self.p.menu_window().clone();
        let out = f(&mut self.p)?;
        let window = self.p.menu_window();
        if !before.same_identities(window.items()) {
            let delta = reconcile(before.items(), window.items());
            host.menu_changed(window, &delta);
        }
        self.flush(host);
        self.follow_selection(host);
        Ok(out)
    }

    fn reload(
        &mut self,
        host: &mut impl PagingHost<I, C>,
        f: impl FnOnce(&mut PagingController<I, C>) -> Result<ReloadDelta<I>, PagingError>,
    ) -> Result<ReloadDelta<I>, PagingError> {
        let delta = f(&mut self.p)?;
        host.menu_changed(self.p.menu_window(), &delta);
        self.flush(host);
        self.follow_selection(host);
        Ok(delta)
    }

    fn flush(&mut self, host: &mut impl PagingHost<I, C>) {
        let diff = self.p.take_page_diff();
        if !diff.is_empty() {
            host.page_changed(self.p.pages(), &diff);
        }
        host.selection_changed(self.p.state());
    }

    fn follow_selection(&mut self, host: &mut impl PagingHost<I, C>) {
        if !self.laid_out {
            return;
        }
        let offset = self.p.selected_scroll_offset(self.viewport_width);
        self.scroll_menu(host, offset);
    }

    fn scroll_menu(&mut self, host: &mut impl PagingHost<I, C>, offset: u64) {
        if offset == self.menu_offset {
            return;
        }
        atrace!(offset, "menu scrolled");
        self.menu_offset = offset;
        host.menu_scrolled(offset);
    }
}
