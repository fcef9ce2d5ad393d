//! Combo tracking: per-fighter move buffer with an expiry window.

use bevy::prelude::*;
use serde::Serialize;

use crate::combat::moves::MoveId;
use crate::shared::Countdown;

/// Separator between move names in a combo key.
pub const COMBO_SEPARATOR: &str = " -> ";

/// Canonical combo key: move names joined by `" -> "`.
pub fn combo_key(moves: &[MoveId]) -> String {
    moves.iter().map(|id| id.name()).collect::<Vec<_>>().join(COMBO_SEPARATOR)
}

/// One counted combo (insertion order preserved in history).
#[derive(Debug, Clone, PartialEq, Eq, Reflect, Serialize)]
pub struct ComboRecord {
    pub key: String,
    pub count: u32,
}

/// Result of finalizing a buffer of two or more moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedCombo {
    pub key: String,
    pub length: usize,
    /// Count of this key after the increment
    pub count: u32,
}

/// Буфер ударов + история комбо за раунд
///
/// Инвариант: expiry таймер запущен ⇔ буфер не пуст.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ComboTracker {
    buffer: Vec<MoveId>,
    expiry: Countdown,
    window: f32,
    history: Vec<ComboRecord>,
}

impl Default for ComboTracker {
    fn default() -> Self {
        Self::new(1.5)
    }
}

impl ComboTracker {
    pub fn new(window: f32) -> Self {
        Self {
            buffer: Vec::new(),
            expiry: Countdown::default(),
            window,
            history: Vec::new(),
        }
    }

    /// Appends an accepted move and restarts the expiry window.
    pub fn record(&mut self, move_id: MoveId) {
        self.buffer.push(move_id);
        self.expiry.start(self.window);
    }

    /// Closes the buffer. Only sequences of two or more moves are counted.
    pub fn finalize(&mut self) -> Option<FinalizedCombo> {
        self.expiry.cancel();
        let moves = std::mem::take(&mut self.buffer);
        if moves.len() < 2 {
            return None;
        }

        let key = combo_key(&moves);
        let count = match self.history.iter_mut().find(|record| record.key == key) {
            Some(record) => {
                record.count += 1;
                record.count
            }
            None => {
                self.history.push(ComboRecord { key: key.clone(), count: 1 });
                1
            }
        };

        Some(FinalizedCombo {
            key,
            length: moves.len(),
            count,
        })
    }

    /// Ticks the expiry window; finalizes when it runs out.
    pub fn advance(&mut self, dt: f32) -> Option<FinalizedCombo> {
        if self.buffer.is_empty() {
            return None;
        }
        self.expiry.tick(dt);
        if self.expiry.is_expired() {
            self.finalize()
        } else {
            None
        }
    }

    /// Drops the pending buffer without counting it (death).
    pub fn discard_pending(&mut self) {
        self.buffer.clear();
        self.expiry.cancel();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn pending(&self) -> &[MoveId] {
        &self.buffer
    }

    pub fn history(&self) -> &[ComboRecord] {
        &self.history
    }

    pub fn count(&self, key: &str) -> u32 {
        self.history
            .iter()
            .find(|record| record.key == key)
            .map_or(0, |record| record.count)
    }

    /// Up to `n` combos by count, descending. Ties keep first-seen order.
    pub fn top_n(&self, n: usize) -> Vec<ComboRecord> {
        let mut records = self.history.clone();
        records.sort_by(|a, b| b.count.cmp(&a.count));
        records.truncate(n);
        records
    }

    pub fn total_counted(&self) -> u32 {
        self.history.iter().map(|record| record.count).sum()
    }

    pub(crate) fn debug_check(&self) {
        debug_assert_eq!(
            self.expiry.is_running() || self.expiry.is_expired(),
            !self.buffer.is_empty(),
            "combo expiry must run exactly while the buffer is non-empty"
        );
    }
}
