use pager::{
    ItemSource, PageSlot, PagingController, PagingDirection, PagingIndexItem, PagingOptions,
    SelectedScrollPosition, VecDataSource,
};

fn main() {
    // Example: a fixed set of tabs, each with a page identified by a `u32` content handle.
    //
    // A host would:
    // - call reload_data once it is ready to show something
    // - drain take_page_diff() to create/destroy page views
    // - lay out menu cells with collect_menu_cells and scroll the menu to selected_scroll_offset
    let titles = ["Inbox", "Starred", "Snoozed", "Sent", "Drafts", "Spam", "Trash"];
    let items = titles
        .iter()
        .enumerate()
        .map(|(i, t)| PagingIndexItem::new(i, *t))
        .collect();
    let contents = (0..titles.len() as u32).map(|i| 1_000 + i).collect();
    let source = VecDataSource::new(items, contents);

    let mut c: PagingController<PagingIndexItem, u32> = PagingController::new(
        PagingOptions::new()
            .with_fixed_item_size(120, 40)
            .with_menu_item_spacing(8)
            .with_menu_insets(16, 16)
            .with_selected_scroll_position(SelectedScrollPosition::Center),
    );

    c.reload_data(ItemSource::finite(&source)).unwrap();
    print_pages("reload", &mut c);

    c.select_index(ItemSource::finite(&source), 4).unwrap();
    print_pages("select 4", &mut c);

    let viewport = 360;
    let mut cells = Vec::new();
    c.collect_menu_cells(viewport, &mut cells);
    for cell in &cells {
        let title = &c.menu_window().items()[cell.index].title;
        println!(
            "cell {:>7} start={:>4} width={} selected={}",
            title, cell.start, cell.width, cell.is_selected
        );
    }
    println!("menu offset={}", c.selected_scroll_offset(viewport));

    // A swipe towards the next page.
    c.begin_scroll(PagingDirection::Forward);
    for p in [0.25, 0.5, 0.75] {
        c.update_scroll_progress(p);
        println!(
            "progress={p} indicator={:?} offset={}",
            c.indicator_frame(viewport),
            c.selected_scroll_offset(viewport)
        );
    }
    c.finish_scroll(ItemSource::finite(&source)).unwrap();
    print_pages("swipe", &mut c);
}

fn print_pages(label: &str, c: &mut PagingController<PagingIndexItem, u32>) {
    let diff = c.take_page_diff();
    let activated: Vec<u32> = diff.activated.iter().map(|(_, e)| e.content).collect();
    let deactivated: Vec<u32> = diff.deactivated.iter().map(|e| e.content).collect();
    println!(
        "{label}: selected={:?} after={:?} activated={activated:?} deactivated={deactivated:?}",
        c.selected_item().map(|it| it.title.as_str()),
        c.pages().get(PageSlot::After).map(|e| e.content),
    );
}
