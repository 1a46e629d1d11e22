use alloc::sync::Arc;

use crate::controller::PagingController;
use crate::item::PagingItem;

/// A callback fired when the controller's state, window or pages change.
///
/// The second argument is `is_scrolling`. The controller is passed in rather than captured, so
/// a callback never keeps the controller alive.
pub type OnChangeCallback<I, C> = Arc<dyn Fn(&PagingController<I, C>, bool) + Send + Sync>;

/// Returns the menu width of an item for its selected/unselected state.
///
/// Must be pure: the layout may call it several times for the same item within one pass.
pub type SizeProvider<I> = Arc<dyn Fn(&I, bool) -> u32 + Send + Sync>;

/// How menu items are sized when no [`SizeProvider`] is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MenuItemSize {
    /// Every item has the same width.
    Fixed { width: u32, height: u32 },
    /// Items get `min_width`, stretched evenly when the menu would not fill the viewport.
    SizeToFit { min_width: u32, height: u32 },
    /// Items use `estimated_width` until the host measures them.
    SelfSizing { estimated_width: u32, height: u32 },
}

impl MenuItemSize {
    pub fn width(&self) -> u32 {
        match *self {
            Self::Fixed { width, .. } => width,
            Self::SizeToFit { min_width, .. } => min_width,
            Self::SelfSizing {
                estimated_width, ..
            } => estimated_width,
        }
    }

    pub fn height(&self) -> u32 {
        match *self {
            Self::Fixed { height, .. }
            | Self::SizeToFit { height, .. }
            | Self::SelfSizing { height, .. } => height,
        }
    }
}

impl Default for MenuItemSize {
    fn default() -> Self {
        Self::Fixed {
            width: 150,
            height: 40,
        }
    }
}

/// Where the selected menu item is scrolled to inside the menu viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectedScrollPosition {
    Left,
    Right,
    #[default]
    Center,
}

/// Number of menu items realized around the selection of an infinite source.
pub const DEFAULT_WINDOW_SIZE: usize = 21;

/// Configuration for [`crate::PagingController`].
///
/// Cheap to clone: closures are stored in `Arc`s.
pub struct PagingOptions<I: PagingItem, C> {
    pub menu_item_size: MenuItemSize,
    /// Overrides `menu_item_size` widths when set.
    pub size_provider: Option<SizeProvider<I>>,
    /// Space between menu items.
    pub menu_item_spacing: u32,
    /// Space before the first menu item.
    pub menu_inset_start: u32,
    /// Space after the last menu item.
    pub menu_inset_end: u32,
    /// Items realized around the selection of an infinite source. Finite sources always realize
    /// every item.
    pub window_size: usize,
    pub selected_scroll_position: SelectedScrollPosition,
    pub on_change: Option<OnChangeCallback<I, C>>,
}

impl<I: PagingItem, C> Clone for PagingOptions<I, C> {
    fn clone(&self) -> Self {
        Self {
            menu_item_size: self.menu_item_size,
            size_provider: self.size_provider.clone(),
            menu_item_spacing: self.menu_item_spacing,
            menu_inset_start: self.menu_inset_start,
            menu_inset_end: self.menu_inset_end,
            window_size: self.window_size,
            selected_scroll_position: self.selected_scroll_position,
            on_change: self.on_change.clone(),
        }
    }
}

impl<I: PagingItem, C> Default for PagingOptions<I, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: PagingItem, C> PagingOptions<I, C> {
    pub fn new() -> Self {
        Self {
            menu_item_size: MenuItemSize::default(),
            size_provider: None,
            menu_item_spacing: 0,
            menu_inset_start: 0,
            menu_inset_end: 0,
            window_size: DEFAULT_WINDOW_SIZE,
            selected_scroll_position: SelectedScrollPosition::default(),
            on_change: None,
        }
    }

    pub fn with_menu_item_size(mut self, menu_item_size: MenuItemSize) -> Self {
        self.menu_item_size = menu_item_size;
        self
    }

    pub fn with_fixed_item_size(self, width: u32, height: u32) -> Self {
        self.with_menu_item_size(MenuItemSize::Fixed { width, height })
    }

    pub fn with_size_provider(
        mut self,
        size_provider: Option<impl Fn(&I, bool) -> u32 + Send + Sync + 'static>,
    ) -> Self {
        self.size_provider = size_provider.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_menu_item_spacing(mut self, spacing: u32) -> Self {
        self.menu_item_spacing = spacing;
        self
    }

    pub fn with_menu_insets(mut self, start: u32, end: u32) -> Self {
        self.menu_inset_start = start;
        self.menu_inset_end = end;
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_selected_scroll_position(mut self, position: SelectedScrollPosition) -> Self {
        self.selected_scroll_position = position;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&PagingController<I, C>, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl<I: PagingItem, C> core::fmt::Debug for PagingOptions<I, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PagingOptions")
            .field("menu_item_size", &self.menu_item_size)
            .field("menu_item_spacing", &self.menu_item_spacing)
            .field("menu_inset_start", &self.menu_inset_start)
            .field("menu_inset_end", &self.menu_inset_end)
            .field("window_size", &self.window_size)
            .field("selected_scroll_position", &self.selected_scroll_position)
            .finish_non_exhaustive()
    }
}
