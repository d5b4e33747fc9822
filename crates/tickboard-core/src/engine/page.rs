//! Pagination over an already filtered and searched sequence.
//!
//! The engine never sorts: the page carries whatever order the
//! instruments were loaded in. An out-of-range page clips to an empty
//! page rather than failing.

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page_number: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page_number: usize, page_size: usize) -> Result<Self, ValidationError> {
        if page_number == 0 {
            return Err(ValidationError::InvalidPageNumber { value: page_number });
        }
        if page_size == 0 {
            return Err(ValidationError::InvalidPageSize);
        }
        Ok(Self {
            page_number,
            page_size,
        })
    }
}

/// One page of results plus the counters the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_items: usize,
    /// `ceil(total_items / page_size)`, never less than 1.
    pub total_pages: usize,
    /// 1-based display range for "Showing X to Y of Z"; `(0, 0)` when the
    /// page is empty.
    pub showing_from: usize,
    pub showing_to: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slice out the requested page, clipped to the sequence bounds.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(request.page_size).max(1);

    let start = (request.page_number - 1).saturating_mul(request.page_size);
    let page_items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(request.page_size)
        .collect();

    let (showing_from, showing_to) = if page_items.is_empty() {
        (0, 0)
    } else {
        (start + 1, start + page_items.len())
    };

    Page {
        items: page_items,
        page_number: request.page_number,
        page_size: request.page_size,
        total_items,
        total_pages,
        showing_from,
        showing_to,
    }
}
