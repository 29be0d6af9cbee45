// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Filter → search → paginate pipeline shared by every list view.
//!
//! A [`ListView`] owns only the user-controlled inputs (active filter, query,
//! page). The visible slice is derived from a full collection on demand with
//! [`ListView::recompute`] and never cached, so a changed collection or a
//! changed input always yields a fresh view.

use crate::model::{FILTER_ALL, ListRecord};

pub const PAGE_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    filter: String,
    query: String,
    page: usize,
    page_size: usize,
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            filter: FILTER_ALL.to_owned(),
            query: String::new(),
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// A view with a non-default page size. Zero is treated as one.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Sets the active filter key and returns to the first page. Keys are
    /// trimmed and lower-cased; an empty key means "all".
    pub fn set_filter(&mut self, key: &str) {
        let normalized = key.trim().to_lowercase();
        self.filter = if normalized.is_empty() {
            FILTER_ALL.to_owned()
        } else {
            normalized
        };
        self.page = 1;
    }

    /// Replaces the search query and returns to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn push_query_char(&mut self, value: char) {
        self.query.push(value);
        self.page = 1;
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.page = 1;
    }

    /// Moves to `requested`, clamped to `[1, total_pages]`, and returns the
    /// page that was applied.
    pub fn set_page(&mut self, requested: usize, total_pages: usize) -> usize {
        self.page = clamp_page(requested, total_pages);
        self.page
    }

    pub fn next_page(&mut self, total_pages: usize) -> usize {
        let current = clamp_page(self.page, total_pages);
        self.set_page(current.saturating_add(1), total_pages)
    }

    pub fn previous_page(&mut self, total_pages: usize) -> usize {
        let current = clamp_page(self.page, total_pages);
        self.set_page(current.saturating_sub(1), total_pages)
    }

    pub fn matches<R: ListRecord>(&self, record: &R) -> bool {
        matches_filter(record.status(), &self.filter) && matches_query(record.name(), &self.query)
    }

    /// Derives the visible slice from the full collection.
    ///
    /// Order is preserved. If the stored page has fallen past the last page
    /// (the collection shrank since the page was chosen) the slice is taken
    /// from the clamped page, and [`VisibleSlice::page`] reports it.
    pub fn recompute<'a, R: ListRecord>(&self, records: &'a [R]) -> VisibleSlice<'a, R> {
        let filtered = records
            .iter()
            .filter(|record| self.matches(*record))
            .collect::<Vec<_>>();
        let filtered_count = filtered.len();
        let total_pages = total_pages(filtered_count, self.page_size);
        let page = clamp_page(self.page, total_pages);

        let offset = (page - 1) * self.page_size;
        let rows = filtered
            .into_iter()
            .skip(offset)
            .take(self.page_size)
            .collect();

        VisibleSlice {
            rows,
            filtered_count,
            total_pages,
            page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleSlice<'a, R> {
    pub rows: Vec<&'a R>,
    pub filtered_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<R> VisibleSlice<'_, R> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Zero-based index of the first visible row within the filtered set.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Clamps into `[1, total_pages]`. With no pages at all the only valid page
/// is 1.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

pub fn matches_filter(status: &str, filter: &str) -> bool {
    filter == FILTER_ALL || status.trim().to_lowercase() == filter
}

pub fn matches_query(name: &str, query: &str) -> bool {
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}
