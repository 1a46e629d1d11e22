//! Host adapter utilities for the `pager` crate.
//!
//! The `pager` crate is UI-agnostic and focuses on the paging state and menu math. This crate
//! provides small, framework-neutral helpers commonly needed by hosts:
//!
//! - A [`PagingHost`] trait the host implements to render menu and page changes
//! - A [`Controller`] that turns layout, swipe and timer events into core operations
//! - Menu anchoring so reloads do not make the menu jump
//! - Tick-driven linear transitions for programmatic page changes
//!
//! This crate is framework-agnostic (no toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod controller;
mod host;
mod transition;

#[cfg(test)]
mod tests;

pub use anchor::{MenuAnchor, MenuScrollState, apply_anchor, capture_first_visible_anchor};
pub use controller::Controller;
pub use host::PagingHost;
pub use transition::Transition;
