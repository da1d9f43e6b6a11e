// Test mock for the projector's one trait boundary.
//
// MockSheetStore (SheetStore) — stateful in-memory spreadsheet with call
// counters and an operation log, so tests can assert both outcomes and
// ordering. Builder pattern: `.with_tab()`, `.failing_append()`,
// `.failing_style()`.

use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use guestlist_common::{AppendedRange, EventSubmission, Tab};

use crate::traits::SheetStore;

/// Convenience constructor for the submissions used across tests.
pub fn submission(name: &str, date: &str, participants: &[&str]) -> EventSubmission {
    EventSubmission {
        event_name: name.to_string(),
        event_date: date.to_string(),
        participants: participants.iter().map(|p| p.to_string()).collect(),
    }
}

#[derive(Default)]
struct SheetState {
    tabs: Vec<Tab>,
    next_sheet_id: i64,
    /// Rows holding content per tab title, header included.
    occupied: std::collections::HashMap<String, u32>,
    /// Data rows appended per tab title.
    rows: std::collections::HashMap<String, Vec<Vec<String>>>,
    create_calls: usize,
    header_calls: usize,
    append_calls: usize,
    styled: Vec<(i64, AppendedRange)>,
    ops: Vec<String>,
}

pub struct MockSheetStore {
    state: Mutex<SheetState>,
    fail_append: bool,
    fail_style: bool,
}

impl MockSheetStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SheetState {
                next_sheet_id: 100,
                ..SheetState::default()
            }),
            fail_append: false,
            fail_style: false,
        }
    }

    /// Pre-seed an existing tab, header already in place (as a previous run
    /// would have left it).
    pub fn with_tab(self, title: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let sheet_id = state.next_sheet_id;
            state.next_sheet_id += 1;
            state.tabs.push(Tab {
                sheet_id,
                title: title.to_string(),
            });
            state.occupied.insert(title.to_string(), 1);
        }
        self
    }

    /// Make every append fail, for exercising the failure reply.
    pub fn failing_append(mut self) -> Self {
        self.fail_append = true;
        self
    }

    /// Make every styling call fail, leaving appended rows behind.
    pub fn failing_style(mut self) -> Self {
        self.fail_style = true;
        self
    }

    // --- assertion helpers ---

    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    pub fn header_calls(&self) -> usize {
        self.state.lock().unwrap().header_calls
    }

    pub fn append_calls(&self) -> usize {
        self.state.lock().unwrap().append_calls
    }

    pub fn tab_titles(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.tabs.iter().map(|t| t.title.clone()).collect()
    }

    pub fn sheet_id_of(&self, title: &str) -> Option<i64> {
        let state = self.state.lock().unwrap();
        state
            .tabs
            .iter()
            .find(|t| t.title == title)
            .map(|t| t.sheet_id)
    }

    pub fn rows_in(&self, title: &str) -> Vec<Vec<String>> {
        let state = self.state.lock().unwrap();
        state.rows.get(title).cloned().unwrap_or_default()
    }

    pub fn styled_targets(&self) -> Vec<(i64, AppendedRange)> {
        self.state.lock().unwrap().styled.clone()
    }

    /// The calls made, in order, e.g. `["create:Hackathon", "header:Hackathon", ...]`.
    pub fn ops(&self) -> Vec<String> {
        self.state.lock().unwrap().ops.clone()
    }
}

#[async_trait]
impl SheetStore for MockSheetStore {
    async fn tabs(&self) -> Result<Vec<Tab>> {
        let mut state = self.state.lock().unwrap();
        state.ops.push("list".to_string());
        Ok(state.tabs.clone())
    }

    async fn create_tab(&self, title: &str) -> Result<Tab> {
        let mut state = self.state.lock().unwrap();
        state.create_calls += 1;
        state.ops.push(format!("create:{title}"));
        let sheet_id = state.next_sheet_id;
        state.next_sheet_id += 1;
        let tab = Tab {
            sheet_id,
            title: title.to_string(),
        };
        state.tabs.push(tab.clone());
        state.occupied.insert(title.to_string(), 0);
        Ok(tab)
    }

    async fn write_header(&self, title: &str, _header: &[&str]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.tabs.iter().any(|t| t.title == title) {
            bail!("MockSheetStore: header write to unknown tab {title}");
        }
        state.header_calls += 1;
        state.ops.push(format!("header:{title}"));
        let occupied = state.occupied.entry(title.to_string()).or_insert(0);
        *occupied = (*occupied).max(1);
        Ok(())
    }

    async fn append_rows(&self, title: &str, rows: Vec<Vec<String>>) -> Result<AppendedRange> {
        if self.fail_append {
            bail!("MockSheetStore: append configured to fail");
        }
        let mut state = self.state.lock().unwrap();
        if !state.tabs.iter().any(|t| t.title == title) {
            bail!("MockSheetStore: append to unknown tab {title}");
        }
        state.append_calls += 1;
        state.ops.push(format!("append:{title}"));
        let occupied = *state.occupied.get(title).unwrap_or(&0);
        let landed = AppendedRange {
            start_row: occupied,
            end_row: occupied + rows.len() as u32,
        };
        state
            .occupied
            .insert(title.to_string(), landed.end_row);
        state
            .rows
            .entry(title.to_string())
            .or_default()
            .extend(rows);
        Ok(landed)
    }

    async fn style_event_tab(&self, sheet_id: i64, block: AppendedRange) -> Result<()> {
        if self.fail_style {
            bail!("MockSheetStore: styling configured to fail");
        }
        let mut state = self.state.lock().unwrap();
        if !state.tabs.iter().any(|t| t.sheet_id == sheet_id) {
            bail!("MockSheetStore: styling references unknown sheet id {sheet_id}");
        }
        state.ops.push(format!("style:{sheet_id}"));
        state.styled.push((sheet_id, block));
        Ok(())
    }
}
