use serde::{Deserialize, Serialize};

use crate::domain::movie::MovieSummary;
use crate::domain::{DomainError, DomainResult};

/// One page of a paginated movie listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub items: Vec<MovieSummary>,
    pub page_number: u32,
    pub total_pages: u32,
}

impl ResultPage {
    /// Build a page, normalizing numbers the provider may send out of range.
    ///
    /// Page 0 becomes page 1, and a page past a known total raises the total.
    pub fn new(items: Vec<MovieSummary>, page_number: u32, total_pages: u32) -> Self {
        let page_number = page_number.max(1);
        let total_pages = if total_pages > 0 && page_number > total_pages {
            page_number
        } else {
            total_pages
        };

        Self {
            items,
            page_number,
            total_pages,
        }
    }

    /// A page with no results
    pub fn empty() -> Self {
        Self::new(Vec::new(), 1, 0)
    }

    pub fn has_more(&self) -> bool {
        self.page_number < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Validates ResultPage invariants
pub fn validate_result_page(page: &ResultPage) -> DomainResult<()> {
    if page.page_number == 0 {
        return Err(DomainError::InvariantViolation(
            "Page numbers start at 1".to_string(),
        ));
    }

    if page.total_pages > 0 && page.page_number > page.total_pages {
        return Err(DomainError::InvariantViolation(format!(
            "Page {} exceeds total of {} pages",
            page.page_number, page.total_pages
        )));
    }

    Ok(())
}
