// ============================================================================
// WMS Core - Dashboard State
// File: crates/wms-core/src/state/dashboard.rs
// Description: Serializable dashboard state updated by a pure reducer
// ============================================================================
//! The dashboard controller owns one [`DashboardState`] and replaces it with
//! `reduce(state, action)` for every event. Nothing here performs I/O; the
//! controller issues requests and feeds their outcomes back as actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::request::{RequestToken, RequestTracker};
use super::undo::UndoSlot;
use crate::calculations::aggregator::{self, KindBreakdown, Scope, StatusMap, UtilizationStats};
use crate::domain::{DailySample, GroupId, SectionKey, SectionStatus, WarehouseKind};
use wms_shared::constants::{MAX_SECTIONS_PER_REQUEST, SECTIONS_PER_ROW};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseEntry {
    pub name: String,
    pub kind: WarehouseKind,
    pub last_modified: DateTime<Utc>,
}

/// A deleted warehouse and its sections, kept for undo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovedWarehouse {
    pub letter: GroupId,
    pub entry: WarehouseEntry,
    pub sections: Vec<(SectionKey, SectionStatus)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HistoryView {
    Idle,
    Loading { token: RequestToken },
    Loaded { series: Vec<DailySample> },
    /// The last fetch failed; the chart shows "no data".
    NoData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    WarehouseCreated {
        letter: GroupId,
        name: String,
        kind: WarehouseKind,
        sections: u32,
        at: DateTime<Utc>,
    },
    WarehouseDeleted { letter: GroupId, at: DateTime<Utc> },
    WarehouseSelected(Option<GroupId>),
    UndoRequested { at: DateTime<Utc> },
    UndoExpired { at: DateTime<Utc> },
    SectionToggled { key: SectionKey, at: DateTime<Utc> },
    SectionsAdded { letter: GroupId, count: u32, at: DateTime<Utc> },
    SectionRemoved { key: SectionKey, at: DateTime<Utc> },
    RowRemoved { letter: GroupId, at: DateTime<Utc> },
    HistoryRequested,
    HistoryLoaded { token: RequestToken, series: Vec<DailySample> },
    HistoryFailed { token: RequestToken },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub warehouses: BTreeMap<GroupId, WarehouseEntry>,
    pub sections: StatusMap,
    pub selected: Option<GroupId>,
    pub undo: UndoSlot<RemovedWarehouse>,
    pub history: HistoryView,
    requests: RequestTracker,
}

impl DashboardState {
    pub fn new(undo_window_ms: i64) -> Self {
        Self {
            warehouses: BTreeMap::new(),
            sections: StatusMap::new(),
            selected: None,
            undo: UndoSlot::new(undo_window_ms),
            history: HistoryView::Idle,
            requests: RequestTracker::default(),
        }
    }

    /// Token of the most recent history request.
    pub fn history_token(&self) -> Option<RequestToken> {
        self.requests.current()
    }

    pub fn kinds(&self) -> BTreeMap<GroupId, WarehouseKind> {
        self.warehouses
            .iter()
            .map(|(letter, entry)| (letter.clone(), entry.kind))
            .collect()
    }

    pub fn stats(&self, scope: &Scope) -> UtilizationStats {
        aggregator::for_scope(&self.sections, &self.kinds(), scope)
    }

    pub fn breakdown(&self) -> KindBreakdown {
        aggregator::by_kind(&self.sections, &self.kinds())
    }

    /// Section keys of one warehouse in grid order.
    pub fn sections_of<'a>(&'a self, letter: &'a GroupId) -> impl Iterator<Item = (&'a SectionKey, &'a SectionStatus)> + 'a {
        self.sections.iter().filter(move |(key, _)| key.belongs_to(letter))
    }

    fn next_section_number(&self, letter: &GroupId) -> u32 {
        self.sections_of(letter)
            .map(|(key, _)| key.number)
            .max()
            .unwrap_or(0)
            + 1
    }

    fn add_sections(&mut self, letter: &GroupId, count: u32) {
        let count = count.clamp(1, MAX_SECTIONS_PER_REQUEST);
        let first = self.next_section_number(letter);
        for number in first..first + count {
            self.sections
                .insert(SectionKey::new(letter.clone(), number), SectionStatus::Available);
        }
    }

    fn touch(&mut self, letter: &GroupId, at: DateTime<Utc>) {
        if let Some(entry) = self.warehouses.get_mut(letter) {
            entry.last_modified = at;
        }
    }

    fn remove_warehouse(&mut self, letter: &GroupId) -> Option<RemovedWarehouse> {
        let entry = self.warehouses.remove(letter)?;
        let keys: Vec<SectionKey> = self.sections_of(letter).map(|(key, _)| key.clone()).collect();
        let sections = keys
            .into_iter()
            .filter_map(|key| self.sections.remove(&key).map(|status| (key, status)))
            .collect();
        if self.selected.as_ref() == Some(letter) {
            self.selected = None;
        }
        Some(RemovedWarehouse {
            letter: letter.clone(),
            entry,
            sections,
        })
    }

    fn restore_warehouse(&mut self, removed: RemovedWarehouse) {
        if self.warehouses.keys().any(|existing| existing.overlaps(&removed.letter)) {
            return;
        }
        self.warehouses.insert(removed.letter, removed.entry);
        self.sections.extend(removed.sections);
    }
}

/// Apply one action. Actions that reference unknown warehouses or sections
/// leave the state unchanged.
pub fn reduce(mut state: DashboardState, action: Action) -> DashboardState {
    match action {
        Action::WarehouseCreated { letter, name, kind, sections, at } => {
            if state.warehouses.keys().any(|existing| existing.overlaps(&letter)) {
                return state;
            }
            state.warehouses.insert(
                letter.clone(),
                WarehouseEntry {
                    name,
                    kind,
                    last_modified: at,
                },
            );
            state.add_sections(&letter, sections);
        }
        Action::WarehouseDeleted { letter, at } => {
            if let Some(removed) = state.remove_warehouse(&letter) {
                state.undo.record(removed, at);
            }
        }
        Action::WarehouseSelected(letter) => {
            state.selected = letter.filter(|l| state.warehouses.contains_key(l));
        }
        Action::UndoRequested { at } => {
            if let Ok(removed) = state.undo.take(at) {
                state.restore_warehouse(removed);
            }
        }
        Action::UndoExpired { at } => {
            state.undo.expire(at);
        }
        Action::SectionToggled { key, at } => {
            if let Some(status) = state.sections.get_mut(&key) {
                *status = status.toggled();
                state.touch(&key.group, at);
            }
        }
        Action::SectionsAdded { letter, count, at } => {
            if state.warehouses.contains_key(&letter) {
                state.add_sections(&letter, count);
                state.touch(&letter, at);
            }
        }
        Action::SectionRemoved { key, at } => {
            if state.sections.remove(&key).is_some() {
                state.touch(&key.group, at);
            }
        }
        Action::RowRemoved { letter, at } => {
            let mut keys: Vec<SectionKey> = state.sections_of(&letter).map(|(key, _)| key.clone()).collect();
            if keys.len() >= SECTIONS_PER_ROW {
                for key in keys.split_off(keys.len() - SECTIONS_PER_ROW) {
                    state.sections.remove(&key);
                }
                state.touch(&letter, at);
            }
        }
        Action::HistoryRequested => {
            let token = state.requests.issue();
            state.history = HistoryView::Loading { token };
        }
        Action::HistoryLoaded { token, series } => {
            if state.requests.is_current(token) {
                state.history = HistoryView::Loaded { series };
            }
        }
        Action::HistoryFailed { token } => {
            if state.requests.is_current(token) {
                state.history = HistoryView::NoData;
            }
        }
    }
    state
}
