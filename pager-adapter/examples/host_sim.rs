use pager::{
    ItemSource, MenuWindow, PageDiff, PageSet, PagingDirection, PagingIndexItem, PagingOptions,
    PagingState, ReloadDelta, VecDataSource,
};
use pager_adapter::{Controller, PagingHost};

/// A host that prints what it would do to its views.
struct PrintHost;

impl PagingHost<PagingIndexItem, String> for PrintHost {
    fn menu_changed(
        &mut self,
        window: &MenuWindow<PagingIndexItem>,
        delta: &ReloadDelta<PagingIndexItem>,
    ) {
        println!(
            "menu: {} cells (+{} -{})",
            window.len(),
            delta.inserted.len(),
            delta.removed.len()
        );
    }

    fn page_changed(
        &mut self,
        _pages: &PageSet<PagingIndexItem, String>,
        diff: &PageDiff<PagingIndexItem, String>,
    ) {
        for (slot, e) in &diff.activated {
            println!("  show {:?} page: {}", slot, e.content);
        }
        for e in &diff.deactivated {
            println!("  drop page: {}", e.content);
        }
    }

    fn selection_changed(&mut self, state: &PagingState<PagingIndexItem>) {
        if let PagingState::Scrolling { progress, .. } = state {
            println!("  scrolling {progress:.2}");
        }
    }

    fn menu_scrolled(&mut self, offset: u64) {
        println!("  menu offset -> {offset}");
    }
}

fn main() {
    // Example: a host feeding layout, a swipe and a programmatic transition into the adapter.
    let items = (0..12)
        .map(|i| PagingIndexItem::new(i, format!("Section {i}")))
        .collect();
    let contents = (0..12).map(|i| format!("page #{i}")).collect();
    let data = VecDataSource::new(items, contents);
    let source = ItemSource::finite(&data);

    let mut host = PrintHost;
    let mut c = Controller::new(PagingOptions::new().with_fixed_item_size(100, 44));

    c.on_layout(source, &mut host, 320).unwrap();

    println!("swipe forward");
    c.on_swipe_began(&mut host, PagingDirection::Forward);
    c.on_swipe_progress(&mut host, 0.4);
    c.on_swipe_progress(&mut host, 0.8);
    c.on_swipe_ended(source, &mut host, true).unwrap();

    println!("jump to 6, then animate forward");
    c.select_index(source, &mut host, 6).unwrap();
    c.start_transition(&mut host, PagingDirection::Forward, 0, 240);
    let mut now_ms = 0;
    while c.tick(source, &mut host, now_ms).unwrap().is_some() {
        now_ms += 80;
    }

    let snapshot = c.controller().snapshot();
    println!(
        "saved selection={:?} menu={:?}",
        snapshot.selected.map(|it| it.title),
        c.menu_scroll_state()
    );
}
