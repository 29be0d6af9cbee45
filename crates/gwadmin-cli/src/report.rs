// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! One page of a list view rendered for the terminal or as JSON.

use anyhow::{Context, Result};
use gwadmin_app::{
    FILTER_ALL, ListView, ResourceKind, TableProjection, TableRow, VisibleSlice, category_styles,
    pagination_text, status_styles,
};
use gwadmin_db::Store;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub kind: ResourceKind,
    pub status: String,
    pub search: String,
    pub page: usize,
}

impl ListRequest {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            status: FILTER_ALL.to_owned(),
            search: String::new(),
            page: 1,
        }
    }

    fn view_for<R: TableRow>(&self, records: &[R]) -> ListView {
        let mut view = ListView::new();
        view.set_filter(&self.status);
        view.set_query(self.search.clone());
        let total_pages = view.recompute(records).total_pages;
        view.set_page(self.page, total_pages);
        view
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a, R> {
    resource: &'static str,
    filter: &'a str,
    query: &'a str,
    page: usize,
    page_size: usize,
    total_pages: usize,
    filtered_count: usize,
    has_previous: bool,
    has_next: bool,
    rows: Vec<JsonRow<'a, R>>,
}

/// A record plus the badge classes its status and category render with.
#[derive(Debug, Serialize)]
struct JsonRow<'a, R> {
    #[serde(flatten)]
    record: &'a R,
    status_class: String,
    category_class: String,
}

pub fn list_report(store: &Store, request: &ListRequest, format: ReportFormat) -> Result<String> {
    match request.kind {
        ResourceKind::Reservations => render(&store.list_reservations()?, request, format),
        ResourceKind::Tickets => render(&store.list_tickets()?, request, format),
        ResourceKind::Logs => render(&store.list_logs()?, request, format),
    }
}

fn render<R: TableRow + Serialize>(
    records: &[R],
    request: &ListRequest,
    format: ReportFormat,
) -> Result<String> {
    let view = request.view_for(records);
    let slice = view.recompute(records);
    match format {
        ReportFormat::Text => Ok(text_report(&TableProjection::project(&slice), &view)),
        ReportFormat::Json => json_report(&slice, &view),
    }
}

fn json_report<R: TableRow + Serialize>(
    slice: &VisibleSlice<'_, R>,
    view: &ListView,
) -> Result<String> {
    let rows = slice
        .rows
        .iter()
        .map(|record| JsonRow {
            record: *record,
            status_class: status_styles(R::KIND).class_name(record.status()),
            category_class: category_styles(R::KIND).class_name(record.category()),
        })
        .collect();
    let report = JsonReport {
        resource: R::KIND.label(),
        filter: view.filter(),
        query: view.query(),
        page: slice.page,
        page_size: slice.page_size,
        total_pages: slice.total_pages,
        filtered_count: slice.filtered_count,
        has_previous: slice.has_previous(),
        has_next: slice.has_next(),
        rows,
    };
    serde_json::to_string_pretty(&report).context("encode list report as JSON")
}

fn text_report(projection: &TableProjection, view: &ListView) -> String {
    let mut summary = format!(
        "{}: page {} of {}, {} matching, filter {}",
        projection.kind.title(),
        projection.page,
        projection.total_pages,
        projection.filtered_count,
        view.filter(),
    );
    if !view.query().is_empty() {
        summary.push_str(&format!(", search {:?}", view.query()));
    }

    let mut lines = vec![summary, String::new()];
    if let Some(message) = projection.empty_message() {
        lines.push(message.to_owned());
    } else {
        let rows = projection
            .rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .map(|cell| match &cell.detail {
                        Some(detail) => format!("{} ({detail})", cell.text),
                        None => cell.text.clone(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let mut widths = projection
            .headers
            .iter()
            .map(|header| header.chars().count())
            .collect::<Vec<_>>();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let headers = projection
            .headers
            .iter()
            .map(|header| (*header).to_owned())
            .collect::<Vec<_>>();
        lines.push(format_row(&headers, &widths));
        lines.push(
            widths
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<_>>()
                .join("  "),
        );
        lines.extend(rows.iter().map(|row| format_row(row, &widths)));
    }

    lines.push(String::new());
    lines.push(pagination_text(&projection.controls()));
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_owned()
}
