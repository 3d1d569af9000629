//! Responsive window sizing.
//!
//! A carousel shows a fixed number of items for a given viewport width. The
//! table is re-evaluated on every resize, but `ResponsiveTracker` only reports
//! a change when the computed count actually moves, so a stream of resize
//! events inside one band never touches carousel state.

use serde::Deserialize;

use crate::constants;
use crate::error::SettingsError;

/// One row of the breakpoint table: applies from `min_width` (inclusive) up
/// to the next row's `min_width`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Breakpoint {
    pub min_width: u32,
    pub visible_count: usize,
    /// Per-item pixel width for carousels that size slides by breakpoint.
    #[serde(default)]
    pub item_width: Option<f32>,
}

/// Ascending breakpoint table. Always holds at least one row, every row shows
/// at least one item, and widths are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointTable {
    rows: Vec<Breakpoint>,
}

impl Default for BreakpointTable {
    fn default() -> Self {
        let rows = constants::breakpoints::DEFAULT_TABLE
            .iter()
            .map(|&(min_width, visible_count, item_width)| Breakpoint {
                min_width,
                visible_count,
                item_width: Some(item_width),
            })
            .collect();
        Self { rows }
    }
}

impl BreakpointTable {
    pub fn new(mut rows: Vec<Breakpoint>) -> Result<Self, SettingsError> {
        if rows.is_empty() {
            return Err(SettingsError::Breakpoints(
                "at least one breakpoint is required".into(),
            ));
        }
        rows.sort_by_key(|row| row.min_width);
        for pair in rows.windows(2) {
            if pair[0].min_width == pair[1].min_width {
                return Err(SettingsError::Breakpoints(format!(
                    "duplicate min_width {}",
                    pair[0].min_width
                )));
            }
        }
        if let Some(row) = rows.iter().find(|row| row.visible_count == 0) {
            return Err(SettingsError::Breakpoints(format!(
                "visible_count at min_width {} must be at least 1",
                row.min_width
            )));
        }
        if let Some(row) = rows
            .iter()
            .find(|row| row.item_width.is_some_and(|w| !(w > 0.0)))
        {
            return Err(SettingsError::Breakpoints(format!(
                "item_width at min_width {} must be positive",
                row.min_width
            )));
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Breakpoint] {
        &self.rows
    }

    /// Row that applies at `width`. Widths below the first row (including
    /// negative widths from bogus resize reports) use the first row.
    pub fn row_for(&self, width: f32) -> &Breakpoint {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.rows
            .iter()
            .rev()
            .find(|row| width >= row.min_width as f32)
            .unwrap_or(&self.rows[0])
    }

    pub fn visible_count_for(&self, width: f32) -> usize {
        self.row_for(width).visible_count
    }

    pub fn item_width_for(&self, width: f32) -> Option<f32> {
        self.row_for(width).item_width
    }
}

/// Output of a resize that crossed a breakpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsiveChange {
    pub visible_count: usize,
    pub item_width: Option<f32>,
}

/// Remembers the last computed breakpoint row so resize storms inside one
/// band are filtered out.
#[derive(Debug, Clone)]
pub struct ResponsiveTracker {
    table: BreakpointTable,
    current: Option<Breakpoint>,
}

impl ResponsiveTracker {
    pub fn new(table: BreakpointTable) -> Self {
        Self {
            table,
            current: None,
        }
    }

    pub fn table(&self) -> &BreakpointTable {
        &self.table
    }

    /// Feed a viewport width. Returns `Some` only when the visible count or
    /// item width differs from the previous evaluation.
    pub fn observe(&mut self, width: f32) -> Option<ResponsiveChange> {
        let row = *self.table.row_for(width);
        let changed = match self.current {
            Some(prev) => {
                prev.visible_count != row.visible_count
                    || prev.item_width != row.item_width
            }
            None => true,
        };
        self.current = Some(row);
        changed.then_some(ResponsiveChange {
            visible_count: row.visible_count,
            item_width: row.item_width,
        })
    }

    /// Forget the last row, so the next `observe` reports whatever the
    /// width maps to. Used after the visible count was set by hand.
    pub fn reset(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<ResponsiveChange> {
        self.current.map(|row| ResponsiveChange {
            visible_count: row.visible_count,
            item_width: row.item_width,
        })
    }
}
