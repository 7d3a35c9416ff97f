//! Single-slot undo buffer with a fixed expiry window.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingUndo<T> {
    pub item: T,
    pub recorded_at: DateTime<Utc>,
}

/// Why [`UndoSlot::take`] returned nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoMiss {
    Empty,
    Expired,
}

/// Remembers the most recent removal for `window_ms`. Recording a new item
/// replaces the previous one; an expired item is discarded on access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndoSlot<T> {
    window_ms: i64,
    pending: Option<PendingUndo<T>>,
}

impl<T> UndoSlot<T> {
    pub fn new(window_ms: i64) -> Self {
        Self {
            window_ms: window_ms.max(0),
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        Duration::milliseconds(self.window_ms)
    }

    /// Returns the item that was displaced, if any.
    pub fn record(&mut self, item: T, at: DateTime<Utc>) -> Option<T> {
        self.pending
            .replace(PendingUndo { item, recorded_at: at })
            .map(|previous| previous.item)
    }

    pub fn peek(&self, now: DateTime<Utc>) -> Option<&T> {
        self.pending
            .as_ref()
            .filter(|pending| self.is_live(pending, now))
            .map(|pending| &pending.item)
    }

    /// Borrow the pending item without consuming it. An expired item is
    /// dropped and reported as [`UndoMiss::Expired`].
    pub fn current(&mut self, now: DateTime<Utc>) -> Result<&T, UndoMiss> {
        if self.expire(now).is_some() {
            return Err(UndoMiss::Expired);
        }
        self.pending
            .as_ref()
            .map(|pending| &pending.item)
            .ok_or(UndoMiss::Empty)
    }

    pub fn take(&mut self, now: DateTime<Utc>) -> Result<T, UndoMiss> {
        let pending = self.pending.take().ok_or(UndoMiss::Empty)?;
        if self.is_live(&pending, now) {
            Ok(pending.item)
        } else {
            Err(UndoMiss::Expired)
        }
    }

    /// Drop the pending item once its window has passed. Returns the dropped item.
    pub fn expire(&mut self, now: DateTime<Utc>) -> Option<T> {
        let expired = self
            .pending
            .as_ref()
            .is_some_and(|pending| !self.is_live(pending, now));
        if expired {
            self.pending.take().map(|pending| pending.item)
        } else {
            None
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.pending
            .as_ref()
            .map(|pending| pending.recorded_at + self.window())
    }

    fn is_live(&self, pending: &PendingUndo<T>, now: DateTime<Utc>) -> bool {
        now < pending.recorded_at + self.window()
    }
}
