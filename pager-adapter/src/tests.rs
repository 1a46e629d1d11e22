use crate::*;

use alloc::format;
use alloc::vec::Vec;

use pager::{
    InfiniteDataSource, ItemSource, MenuWindow, PageDiff, PageSet, PagingDirection,
    PagingIndexItem, PagingOptions, PagingState, ReloadDelta, VecDataSource,
};

type Item = PagingIndexItem;
type Source = VecDataSource<Item, u32>;

/// Ten items, contents `base + index`.
fn source(base: u32) -> Source {
    let items = (0..10).map(|i| Item::new(i, format!("Title {i}"))).collect();
    let contents = (0..10).map(|i| base + i).collect();
    VecDataSource::new(items, contents)
}

fn controller() -> Controller<Item, u32> {
    Controller::new(PagingOptions::new().with_fixed_item_size(100, 50))
}

fn selected_index(c: &Controller<Item, u32>) -> Option<usize> {
    c.controller().selected_item().map(|it| it.index)
}

#[derive(Default)]
struct Recorder {
    menus: Vec<Vec<usize>>,
    activated: Vec<u32>,
    deactivated: Vec<u32>,
    selections: usize,
    offsets: Vec<u64>,
}

impl PagingHost<Item, u32> for Recorder {
    fn menu_changed(&mut self, window: &MenuWindow<Item>, _delta: &ReloadDelta<Item>) {
        self.menus.push(window.iter().map(|it| it.index).collect());
    }

    fn page_changed(&mut self, _pages: &PageSet<Item, u32>, diff: &PageDiff<Item, u32>) {
        self.activated
            .extend(diff.activated.iter().map(|(_, e)| e.content));
        self.deactivated
            .extend(diff.deactivated.iter().map(|e| e.content));
    }

    fn selection_changed(&mut self, _state: &PagingState<Item>) {
        self.selections += 1;
    }

    fn menu_scrolled(&mut self, offset: u64) {
        self.offsets.push(offset);
    }
}

fn laid_out(src: &Source, host: &mut Recorder) -> Controller<Item, u32> {
    let mut c = controller();
    c.on_layout(ItemSource::finite(src), host, 300).unwrap();
    c
}

#[test]
fn first_layout_loads_data_and_selects_first_item() {
    let src = source(100);
    let mut host = Recorder::default();
    let c = laid_out(&src, &mut host);

    assert!(c.has_laid_out());
    assert_eq!(selected_index(&c), Some(0));
    assert_eq!(host.menus, [(0..10).collect::<Vec<_>>()]);

    let mut activated = host.activated.clone();
    activated.sort_unstable();
    assert_eq!(activated, [100, 101]);
    assert!(host.selections > 0);
    assert!(host.offsets.is_empty());
}

#[test]
fn selection_before_layout_is_kept_by_first_layout() {
    let src = source(100);
    let mut host = Recorder::default();
    let mut c = controller();

    assert!(c.select_index(ItemSource::finite(&src), &mut host, 5).unwrap());
    assert!(host.offsets.is_empty());

    c.on_layout(ItemSource::finite(&src), &mut host, 300).unwrap();
    assert_eq!(selected_index(&c), Some(5));
    assert_eq!(host.menus.len(), 2);
    // Cell 5 spans 500..600; centered in a 300 wide viewport.
    assert_eq!(host.offsets, [400]);
    assert_eq!(c.menu_offset(), 400);
}

#[test]
fn committed_swipe_selects_neighbor() {
    let src = source(100);
    let mut host = Recorder::default();
    let mut c = laid_out(&src, &mut host);

    assert!(c.on_swipe_began(&mut host, PagingDirection::Forward));
    c.on_swipe_progress(&mut host, 0.5);
    assert_eq!(c.controller().state().progress(), 0.5);

    assert!(c.on_swipe_ended(ItemSource::finite(&src), &mut host, true).unwrap());
    assert_eq!(selected_index(&c), Some(1));
    assert_eq!(host.activated.last(), Some(&102));
    assert!(host.deactivated.is_empty());
}

#[test]
fn cancelled_swipe_keeps_origin() {
    let src = source(100);
    let mut host = Recorder::default();
    let mut c = laid_out(&src, &mut host);

    assert!(c.on_swipe_began(&mut host, PagingDirection::Forward));
    c.on_swipe_progress(&mut host, 0.3);
    assert!(!c.on_swipe_ended(ItemSource::finite(&src), &mut host, false).unwrap());

    assert_eq!(selected_index(&c), Some(0));
    assert!(!c.controller().is_scrolling());
}

#[test]
fn swipe_past_boundary_is_rejected() {
    let src = source(100);
    let mut host = Recorder::default();
    let mut c = laid_out(&src, &mut host);

    assert!(!c.on_swipe_began(&mut host, PagingDirection::Backward));
    assert!(!c.controller().is_scrolling());
}

#[test]
fn transition_ticks_to_target() {
    let src = source(100);
    let mut host = Recorder::default();
    let mut c = laid_out(&src, &mut host);
    c.select_index(ItemSource::finite(&src), &mut host, 3)
        .unwrap();

    assert!(c.start_transition(&mut host, PagingDirection::Forward, 0, 100));
    assert!(c.is_animating());

    let progress = c.tick(ItemSource::finite(&src), &mut host, 50).unwrap();
    assert_eq!(progress, Some(0.5));
    assert!(c.controller().is_scrolling());

    let progress = c.tick(ItemSource::finite(&src), &mut host, 100).unwrap();
    assert_eq!(progress, Some(1.0));
    assert!(!c.is_animating());
    assert_eq!(selected_index(&c), Some(4));

    assert_eq!(c.tick(ItemSource::finite(&src), &mut host, 120), Ok(None));
    // Centered on 3, halfway between 3 and 4, then on 4.
    assert_eq!(host.offsets, [200, 250, 300]);
}

#[test]
fn failed_transition_returns_to_origin() {
    let src = source(100);
    let mut host = Recorder::default();
    let mut c = laid_out(&src, &mut host);
    assert!(c.start_transition(&mut host, PagingDirection::Forward, 0, 100));

    let mut shrunk = source(100);
    shrunk.items.remove(1);
    shrunk.contents.remove(1);
    assert_eq!(
        c.tick(ItemSource::finite(&shrunk), &mut host, 100),
        Err(pager::PagingError::ItemNotFound)
    );

    assert!(!c.is_animating());
    assert!(!c.controller().is_scrolling());
    assert_eq!(selected_index(&c), Some(0));
    assert!(c.start_transition(&mut host, PagingDirection::Forward, 200, 100));
}

#[test]
fn failed_swipe_commit_returns_to_origin() {
    let src = source(100);
    let mut host = Recorder::default();
    let mut c = laid_out(&src, &mut host);
    assert!(c.on_swipe_began(&mut host, PagingDirection::Forward));

    let mut shrunk = source(100);
    shrunk.items.remove(1);
    shrunk.contents.remove(1);
    assert!(
        c.on_swipe_ended(ItemSource::finite(&shrunk), &mut host, true)
            .is_err()
    );

    assert!(!c.controller().is_scrolling());
    assert!(c.on_swipe_began(&mut host, PagingDirection::Forward));
}

#[test]
fn swipes_are_ignored_while_transition_runs() {
    let src = source(100);
    let mut host = Recorder::default();
    let mut c = laid_out(&src, &mut host);

    assert!(c.start_transition(&mut host, PagingDirection::Forward, 0, 100));
    assert!(!c.start_transition(&mut host, PagingDirection::Forward, 0, 100));
    assert!(!c.on_swipe_began(&mut host, PagingDirection::Forward));
    c.on_swipe_progress(&mut host, 0.9);
    assert_eq!(c.controller().state().progress(), 0.0);
    assert_eq!(
        c.on_swipe_ended(ItemSource::finite(&src), &mut host, true),
        Ok(false)
    );
    assert!(c.is_animating());
}

#[test]
fn selecting_cancels_running_transition() {
    let src = source(100);
    let mut host = Recorder::default();
    let mut c = laid_out(&src, &mut host);

    assert!(c.start_transition(&mut host, PagingDirection::Forward, 0, 100));
    c.select_index(ItemSource::finite(&src), &mut host, 7)
        .unwrap();

    assert!(!c.is_animating());
    assert_eq!(selected_index(&c), Some(7));
    assert_eq!(c.tick(ItemSource::finite(&src), &mut host, 50), Ok(None));
}

#[test]
fn reload_menu_keeps_first_visible_item_anchored() {
    let src = source(100);
    let mut host = Recorder::default();
    let mut c = laid_out(&src, &mut host);
    assert_eq!(c.on_menu_scroll(250), 250);

    let anchor = c.capture_menu_anchor().unwrap();
    assert_eq!(anchor.identity, 2);
    assert_eq!(anchor.offset_in_viewport, 50);

    let mut inserted = source(100);
    inserted.items.insert(0, Item::new(99, "New"));
    inserted.contents.insert(0, 199);

    let activated = host.activated.len();
    let delta = c.reload_menu(ItemSource::finite(&inserted), &mut host);
    assert_eq!(delta.inserted, [Item::new(99, "New")]);

    // Item 2 moved from 200 to 300.
    assert_eq!(c.menu_offset(), 350);
    assert_eq!(host.offsets.last(), Some(&350));
    assert_eq!(selected_index(&c), Some(0));
    assert_eq!(host.activated.len(), activated);
}

#[test]
fn reload_data_reports_page_changes() {
    let src = source(100);
    let mut host = Recorder::default();
    let mut c = laid_out(&src, &mut host);

    let delta = c
        .reload_data(ItemSource::finite(&source(200)), &mut host)
        .unwrap();
    assert!(delta.is_identity_preserving());
    assert_eq!(host.menus.len(), 2);

    let mut deactivated = host.deactivated.clone();
    deactivated.sort_unstable();
    assert_eq!(deactivated, [100, 101]);
    assert!(host.activated.contains(&200));
    assert!(host.activated.contains(&201));
    assert_eq!(c.controller().selected_content(), Some(&200));
}

#[test]
fn restore_brings_back_selection_and_menu_offset() {
    let src = source(100);
    let mut host = Recorder::default();
    let mut c = laid_out(&src, &mut host);
    c.select_index(ItemSource::finite(&src), &mut host, 6)
        .unwrap();
    c.on_menu_scroll(123);

    let snapshot = c.controller().snapshot();
    let menu = c.menu_scroll_state();
    assert_eq!(menu, MenuScrollState { offset: 123 });

    let mut host = Recorder::default();
    let mut restored = laid_out(&src, &mut host);
    restored
        .restore(ItemSource::finite(&src), &mut host, snapshot, menu)
        .unwrap();

    assert_eq!(selected_index(&restored), Some(6));
    assert_eq!(restored.menu_offset(), 123);
    assert_eq!(host.offsets.last(), Some(&123));
}

#[test]
fn menu_offset_is_clamped() {
    let src = source(100);
    let mut host = Recorder::default();
    let mut c = laid_out(&src, &mut host);

    assert_eq!(c.on_menu_scroll(5_000), 700);
    assert_eq!(
        c.restore_menu_scroll_state(MenuScrollState { offset: 9_999 }),
        700
    );
}

#[test]
fn anchor_needs_a_menu() {
    let c = controller();
    assert_eq!(c.capture_menu_anchor(), None);
    assert_eq!(capture_first_visible_anchor(c.controller(), 300, 0), None);
}

#[test]
fn transition_progress_is_linear_and_clamped() {
    assert_eq!(Transition::new(100, 0).duration_ms, 1);

    let t = Transition::new(100, 200);
    assert_eq!(t.progress(50), 0.0);
    assert_eq!(t.progress(200), 0.5);
    assert_eq!(t.progress(400), 1.0);
    assert!(!t.is_done(299));
    assert!(t.is_done(300));
}

/// Numbers in `[0, 100]`.
struct Numbers;

impl InfiniteDataSource<Item, u32> for Numbers {
    fn item_before(&self, item: &Item) -> Option<Item> {
        let index = item.index.checked_sub(1)?;
        Some(Item::new(index, format!("{index}")))
    }

    fn item_after(&self, item: &Item) -> Option<Item> {
        let index = item.index + 1;
        (index <= 100).then(|| Item::new(index, format!("{index}")))
    }

    fn content_for(&self, item: &Item) -> u32 {
        item.index as u32 * 10
    }
}

/// Only implements the required callbacks.
#[derive(Default)]
struct MenuCounter {
    windows: Vec<(usize, usize)>,
}

impl PagingHost<Item, u32> for MenuCounter {
    fn menu_changed(&mut self, window: &MenuWindow<Item>, _delta: &ReloadDelta<Item>) {
        let first = window.get(0).map_or(0, |it| it.index);
        self.windows.push((first, window.len()));
    }

    fn page_changed(&mut self, _pages: &PageSet<Item, u32>, _diff: &PageDiff<Item, u32>) {}
}

#[test]
fn infinite_window_follows_finished_transition() {
    let mut host = MenuCounter::default();
    let mut c = controller();

    c.select_item(ItemSource::infinite(&Numbers), &mut host, Item::new(50, "50"))
        .unwrap();
    assert_eq!(host.windows, [(40, 21)]);

    assert!(c.start_transition(&mut host, PagingDirection::Forward, 0, 10));
    c.tick(ItemSource::infinite(&Numbers), &mut host, 10)
        .unwrap();

    assert_eq!(selected_index(&c), Some(51));
    assert_eq!(host.windows, [(40, 21), (41, 21)]);
    assert_eq!(c.controller().selected_content(), Some(&510));
}
