// ABOUTME: Record extraction for staff directory pages.
// ABOUTME: Groups field lookups, address decoding, and the per-teaser RecordExtractor.

//! Record extraction module.
//!
//! Submodules:
//! - `fields`: named DOM lookups returning `Option`.
//! - `address`: decoding the school address out of a mapping link.
//! - `staff`: the `RecordExtractor` that turns a page into `StaffRecord`s.

pub mod address;
pub mod fields;
pub mod staff;

pub use staff::{PageContext, RecordExtractor, StaffFields};
