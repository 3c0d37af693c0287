//! Visible-window projection
//!
//! The UI list shows every work step, plus the rest step directly after the
//! current work step. Any other rest step appears only while it is current.

use alloc::vec::Vec;

use crate::plan::Step;

/// Where a row sits relative to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RowStatus {
    Done,
    Current,
    Upcoming,
}

/// One visible list row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRow<'a> {
    /// Index into the full step sequence
    pub index: usize,
    pub step: &'a Step,
    pub status: RowStatus,
}

/// Project the rows a UI should list for `cursor`
pub fn visible_window(steps: &[Step], cursor: usize) -> Vec<WindowRow<'_>> {
    let mut rows = Vec::with_capacity(steps.len());

    for (index, step) in steps.iter().enumerate() {
        if !step.is_rest() {
            rows.push(row(steps, index, cursor));

            if index == cursor {
                // Upcoming break, only if it comes before the next work step
                if let Some(next) = steps.get(index + 1).filter(|s| s.is_rest()) {
                    rows.push(WindowRow {
                        index: index + 1,
                        step: next,
                        status: RowStatus::Upcoming,
                    });
                }
            }
        } else if index == cursor {
            rows.push(row(steps, index, cursor));
        }
    }

    rows
}

fn row(steps: &[Step], index: usize, cursor: usize) -> WindowRow<'_> {
    let status = match index.cmp(&cursor) {
        core::cmp::Ordering::Less => RowStatus::Done,
        core::cmp::Ordering::Equal => RowStatus::Current,
        core::cmp::Ordering::Greater => RowStatus::Upcoming,
    };
    WindowRow {
        index,
        step: &steps[index],
        status,
    }
}
