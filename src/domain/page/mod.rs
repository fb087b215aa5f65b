//! Result Page Invariants:
//!
//! 1. Page numbers are 1-based
//! 2. When the total is known (> 0), the page number never exceeds it
//! 3. An empty page is valid and means zero results

pub mod entity;

pub use entity::{validate_result_page, ResultPage};
