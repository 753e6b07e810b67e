//! # Ghostwrite Access
//!
//! Who may read what, and the catalog views derived from it.
//!
//! ## Overview
//!
//! Access is not stored as a flag. It is derived on every query from two
//! facts held in the ledger cache: who authored an item, and which purchase
//! receipts exist. A viewer may read an item if and only if they are its
//! author or hold a receipt for it. A disconnected viewer reads nothing,
//! including their own work.
//!
//! ## Key Types
//!
//! - [`can_view`] - The access predicate over one item
//! - [`AccessIndex`] - Receipt index for repeated checks over a catalog
//! - [`browse`] - Filtered, searched and sorted catalog listing
//! - [`authored_by`], [`purchased_by`], [`author_revenue`] - Dashboard views

pub mod catalog;
pub mod policy;

pub use catalog::{
    author_revenue, authored_by, browse, item_revenue, purchased_by, BrowseQuery, SortOrder,
    AUTHOR_SHARE_BPS,
};
pub use policy::{can_view, has_access, AccessIndex};
