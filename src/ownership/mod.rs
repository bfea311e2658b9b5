//! Ownership computation pipeline
//!
//! Raw shareholder records flow through three pure stages:
//! normalize → compute shares → determine parent. Each stage is independently
//! testable; the service facade wires them to the company repository.

pub mod calculator;
pub mod contribution;
pub mod parent;

pub use calculator::{compute_shares, percent_sum, DISPLAY_PERCENT_SCALE, SHARE_PERCENT_SCALE};
pub use contribution::normalize;
pub use parent::{apply_main_parent, determine_parent};
