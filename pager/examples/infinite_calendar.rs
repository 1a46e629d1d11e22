use pager::{
    InfiniteDataSource, ItemSource, MenuItemSize, PagingController, PagingDirection, PagingItem,
    PagingOptions,
};

/// A day, counted from an arbitrary epoch.
#[derive(Clone, Debug)]
struct Day(i64);

impl PagingItem for Day {
    type Id = i64;

    fn identity(&self) -> i64 {
        self.0
    }
}

/// Every day there is, with a page title as content.
struct Calendar;

impl InfiniteDataSource<Day, String> for Calendar {
    fn item_before(&self, item: &Day) -> Option<Day> {
        Some(Day(item.0 - 1))
    }

    fn item_after(&self, item: &Day) -> Option<Day> {
        Some(Day(item.0 + 1))
    }

    fn content_for(&self, item: &Day) -> String {
        format!("agenda for day {}", item.0)
    }
}

fn main() {
    // Example: an infinite calendar. Only `window_size` days around the selection are realized;
    // the window follows the selection.
    let mut c: PagingController<Day, String> = PagingController::new(
        PagingOptions::new()
            .with_menu_item_size(MenuItemSize::SelfSizing {
                estimated_width: 60,
                height: 32,
            })
            .with_window_size(7),
    );

    let source = ItemSource::infinite(&Calendar);
    c.select_item(source, Day(20_000)).unwrap();
    print_window(&c);

    // Pretend the host measured the selected label.
    c.measure(&Day(20_000), 96);

    for _ in 0..3 {
        c.begin_scroll(PagingDirection::Forward);
        c.update_scroll_progress(1.0);
        c.finish_scroll(source).unwrap();
        print_window(&c);
    }

    let diff = c.take_page_diff();
    println!(
        "pages activated={} deactivated={} selected={:?}",
        diff.activated.len(),
        diff.deactivated.len(),
        c.selected_content()
    );
    println!("measured={:?}", c.export_measurement_cache());
}

fn print_window(c: &PagingController<Day, String>) {
    let days: Vec<i64> = c.menu_window().iter().map(|d| d.0).collect();
    println!(
        "selected={:?} window={days:?} width={}",
        c.selected_item().map(|d| d.0),
        c.content_width(320)
    );
}
