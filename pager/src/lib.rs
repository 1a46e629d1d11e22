//! A headless paging menu engine.
//!
//! For host wiring (gestures, animated transitions, menu anchoring), see the `pager-adapter`
//! crate.
//!
//! This crate keeps a horizontally scrolling tab menu and a swipeable page view in lock-step:
//! selection state, the window of realized menu items, the realized pages around the
//! selection, reload reconciliation and menu layout math.
//!
//! It is UI-agnostic. A host toolkit is expected to provide:
//! - a finite ([`PagingDataSource`]) or infinite ([`InfiniteDataSource`]) data source
//! - the menu viewport width
//! - rendering of menu cells and page content
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod error;
mod item;
mod layout;
mod options;
mod pages;
mod reload;
mod source;
mod state;


pub use controller::PagingController;
pub use error::PagingError;
pub use item::{PageSlot, PagingDirection, PagingIndexItem, PagingItem, compare_items, same_item};
pub use layout::{IndicatorFrame, MenuCell};
pub use options::{
    DEFAULT_WINDOW_SIZE, MenuItemSize, OnChangeCallback, PagingOptions, SelectedScrollPosition,
    SizeProvider,
};
pub use pages::{ContentEntry, PageDiff, PageSet};
pub use reload::{MenuWindow, ReloadDelta, reconcile};
pub use source::{InfiniteDataSource, ItemSource, PagingDataSource, VecDataSource};
pub use state::{PagingSnapshot, PagingState};
