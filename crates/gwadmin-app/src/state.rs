// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::listview::ListView;
use crate::model::{ResourceKind, filter_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Nav,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: InputMode,
    pub active_tab: ResourceKind,
    pub status_line: Option<String>,
    views: [ListView; 3],
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ResourceKind::Reservations)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextTab,
    PrevTab,
    SelectTab(ResourceKind),
    CycleFilter(isize),
    SetFilter(String),
    EnterSearch,
    ExitSearch,
    PushQueryChar(char),
    PopQueryChar,
    SetQuery(String),
    NextPage { total_pages: usize },
    PrevPage { total_pages: usize },
    GoToPage { page: usize, total_pages: usize },
    FirstPage,
    LastPage { total_pages: usize },
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(InputMode),
    TabChanged(ResourceKind),
    FilterChanged {
        kind: ResourceKind,
        filter: String,
    },
    QueryChanged {
        kind: ResourceKind,
        query: String,
    },
    PageChanged {
        kind: ResourceKind,
        page: usize,
    },
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn new(active_tab: ResourceKind) -> Self {
        Self {
            mode: InputMode::Nav,
            active_tab,
            status_line: None,
            views: [ListView::new(), ListView::new(), ListView::new()],
        }
    }

    pub fn view(&self, kind: ResourceKind) -> &ListView {
        &self.views[kind.index()]
    }

    pub fn view_mut(&mut self, kind: ResourceKind) -> &mut ListView {
        &mut self.views[kind.index()]
    }

    pub fn active_view(&self) -> &ListView {
        self.view(self.active_tab)
    }

    /// Index of the active filter within the active resource's tabs.
    /// Filters set to a key with no tab report the "All" tab.
    pub fn active_filter_index(&self) -> usize {
        let current = self.active_view().filter();
        self.active_tab
            .filter_tabs()
            .iter()
            .position(|label| filter_key(label) == current)
            .unwrap_or(0)
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        let kind = self.active_tab;
        match command {
            AppCommand::NextTab => self.rotate_tab(1),
            AppCommand::PrevTab => self.rotate_tab(-1),
            AppCommand::SelectTab(next) => {
                if next == self.active_tab {
                    return Vec::new();
                }
                self.active_tab = next;
                vec![AppEvent::TabChanged(next)]
            }
            AppCommand::CycleFilter(delta) => {
                let tabs = kind.filter_tabs();
                let len = tabs.len() as isize;
                let next = (self.active_filter_index() as isize + delta).rem_euclid(len) as usize;
                self.apply_filter(tabs[next])
            }
            AppCommand::SetFilter(key) => self.apply_filter(&key),
            AppCommand::EnterSearch => {
                self.mode = InputMode::Search;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitSearch => {
                self.mode = InputMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::PushQueryChar(value) => {
                self.view_mut(kind).push_query_char(value);
                self.query_events()
            }
            AppCommand::PopQueryChar => {
                if self.view(kind).query().is_empty() {
                    return Vec::new();
                }
                self.view_mut(kind).pop_query_char();
                self.query_events()
            }
            AppCommand::SetQuery(query) => {
                self.view_mut(kind).set_query(query);
                self.query_events()
            }
            AppCommand::NextPage { total_pages } => {
                let page = self.view_mut(kind).next_page(total_pages);
                self.page_events(page)
            }
            AppCommand::PrevPage { total_pages } => {
                let page = self.view_mut(kind).previous_page(total_pages);
                self.page_events(page)
            }
            AppCommand::GoToPage { page, total_pages } => {
                let page = self.view_mut(kind).set_page(page, total_pages);
                self.page_events(page)
            }
            AppCommand::FirstPage => {
                let page = self.view_mut(kind).set_page(1, 1);
                self.page_events(page)
            }
            AppCommand::LastPage { total_pages } => {
                let page = self.view_mut(kind).set_page(total_pages, total_pages);
                self.page_events(page)
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<AppEvent> {
        let tabs = ResourceKind::ALL;
        let current = self.active_tab.index() as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_tab = tabs[next];
        vec![AppEvent::TabChanged(self.active_tab)]
    }

    fn apply_filter(&mut self, key: &str) -> Vec<AppEvent> {
        let kind = self.active_tab;
        self.view_mut(kind).set_filter(key);
        let filter = self.view(kind).filter().to_owned();
        vec![
            AppEvent::FilterChanged {
                kind,
                filter: filter.clone(),
            },
            AppEvent::PageChanged { kind, page: 1 },
            self.set_status(&format!("filter {filter}")),
        ]
    }

    fn query_events(&self) -> Vec<AppEvent> {
        let kind = self.active_tab;
        vec![
            AppEvent::QueryChanged {
                kind,
                query: self.view(kind).query().to_owned(),
            },
            AppEvent::PageChanged { kind, page: 1 },
        ]
    }

    fn page_events(&self, page: usize) -> Vec<AppEvent> {
        vec![AppEvent::PageChanged {
            kind: self.active_tab,
            page,
        }]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
