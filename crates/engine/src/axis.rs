use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{AxisKind, GridError};

/// Per-axis geometry table: a default line size plus a sparse map of
/// overrides. Pixel math never walks the full axis; every query is
/// proportional to the number of overrides, which keeps a 100k-row axis
/// as cheap as a 10-row one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Axis {
    kind: AxisKind,
    count: usize,
    default_size: f64,
    overrides: FxHashMap<usize, f64>,
}

impl Axis {
    pub fn rows(count: usize, default_size: f64) -> Self {
        Self::new(AxisKind::Row, count, default_size)
    }

    pub fn columns(count: usize, default_size: f64) -> Self {
        Self::new(AxisKind::Column, count, default_size)
    }

    fn new(kind: AxisKind, count: usize, default_size: f64) -> Self {
        debug_assert!(default_size > 0.0);
        Self {
            kind,
            count,
            default_size,
            overrides: FxHashMap::default(),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn default_size(&self) -> f64 {
        self.default_size
    }

    /// Number of non-default lines. Structural edits keep this in sync;
    /// a line reset to exactly the default drops out of the map.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    fn out_of_bounds(&self, index: usize) -> GridError {
        GridError::IndexOutOfBounds {
            axis: self.kind,
            index,
            count: self.count,
        }
    }

    /// Size of line `index`.
    pub fn size(&self, index: usize) -> Result<f64, GridError> {
        if index >= self.count {
            return Err(self.out_of_bounds(index));
        }
        Ok(self.overrides.get(&index).copied().unwrap_or(self.default_size))
    }

    /// Set the size of line `index`. Setting exactly the default size
    /// removes the override, so resizing back to default leaves no trace.
    pub fn set_size(&mut self, index: usize, size: f64) -> Result<(), GridError> {
        if index >= self.count {
            return Err(self.out_of_bounds(index));
        }
        if !(size > 0.0) {
            return Err(GridError::InvalidSize { size });
        }
        if size == self.default_size {
            self.overrides.remove(&index);
        } else {
            self.overrides.insert(index, size);
        }
        Ok(())
    }

    /// Pixel offset of the leading edge of line `index`. Clamped to the
    /// end of the axis, so `index >= count` yields the full extent. This
    /// keeps one-past-the-end queries (trailing edges, total size) valid.
    pub fn offset(&self, index: usize) -> f64 {
        let index = index.min(self.count);
        let mut offset = index as f64 * self.default_size;
        for (&i, &size) in &self.overrides {
            if i < index {
                offset += size - self.default_size;
            }
        }
        offset
    }

    /// Full axis extent in pixels.
    pub fn total_size(&self) -> f64 {
        self.offset(self.count)
    }

    /// Index of the line containing pixel offset `p`, clamped to the last
    /// line. Walks the sorted overrides so runs of default-sized lines are
    /// skipped with one division.
    pub fn index_at_offset(&self, p: f64) -> usize {
        if self.count == 0 || p <= 0.0 {
            return 0;
        }
        let mut keys: Vec<usize> = self.overrides.keys().copied().collect();
        keys.sort_unstable();

        let mut pos = 0.0;
        let mut next = 0;
        for k in keys {
            let run = (k - next) as f64 * self.default_size;
            if pos + run > p {
                return next + ((p - pos) / self.default_size) as usize;
            }
            pos += run;
            let size = self.overrides[&k];
            if pos + size > p {
                return k;
            }
            pos += size;
            next = k + 1;
        }
        let index = next + ((p - pos) / self.default_size) as usize;
        index.min(self.count - 1)
    }

    /// Insert a new default-sized line so it becomes index `at`.
    /// Overrides at or past `at` shift up by one.
    pub fn insert(&mut self, at: usize) -> Result<(), GridError> {
        if at > self.count {
            return Err(self.out_of_bounds(at));
        }
        let old = std::mem::take(&mut self.overrides);
        self.overrides = old
            .into_iter()
            .map(|(i, s)| (if i >= at { i + 1 } else { i }, s))
            .collect();
        self.count += 1;
        Ok(())
    }

    /// Delete the line at `at`, returning its override (if it had one) so
    /// an undo can restore it. Overrides past `at` shift down by one.
    pub fn delete(&mut self, at: usize) -> Result<Option<f64>, GridError> {
        if at >= self.count {
            return Err(self.out_of_bounds(at));
        }
        let removed = self.overrides.remove(&at);
        let old = std::mem::take(&mut self.overrides);
        self.overrides = old
            .into_iter()
            .map(|(i, s)| (if i > at { i - 1 } else { i }, s))
            .collect();
        self.count -= 1;
        Ok(removed)
    }

    /// Restore an override removed by [`delete`](Self::delete).
    pub(crate) fn restore_override(&mut self, index: usize, size: Option<f64>) {
        if let Some(size) = size {
            self.overrides.insert(index, size);
        }
    }
}

/// Spreadsheet-style column label: A..Z, AA..AZ, BA.. and so on.
pub fn column_label(mut index: usize) -> String {
    let mut label = String::new();
    loop {
        label.insert(0, (b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_default_and_override() {
        let mut axis = Axis::rows(100, 24.0);
        assert_eq!(axis.size(10).unwrap(), 24.0);
        axis.set_size(10, 40.0).unwrap();
        assert_eq!(axis.size(10).unwrap(), 40.0);
        assert_eq!(axis.size(11).unwrap(), 24.0);
    }

    #[test]
    fn test_reset_to_default_drops_override() {
        let mut axis = Axis::columns(50, 80.0);
        axis.set_size(3, 120.0).unwrap();
        assert_eq!(axis.override_count(), 1);
        axis.set_size(3, 80.0).unwrap();
        assert_eq!(axis.override_count(), 0);
        assert_eq!(axis.size(3).unwrap(), 80.0);
    }

    #[test]
    fn test_size_out_of_bounds() {
        let axis = Axis::rows(5, 24.0);
        assert!(matches!(
            axis.size(5),
            Err(GridError::IndexOutOfBounds { index: 5, count: 5, .. })
        ));
    }

    #[test]
    fn test_set_size_rejects_nonpositive() {
        let mut axis = Axis::rows(5, 24.0);
        assert!(matches!(axis.set_size(0, 0.0), Err(GridError::InvalidSize { .. })));
        assert!(matches!(axis.set_size(0, -3.0), Err(GridError::InvalidSize { .. })));
    }

    #[test]
    fn test_offset_accounts_for_overrides() {
        let mut axis = Axis::rows(1000, 24.0);
        axis.set_size(2, 60.0).unwrap();
        assert_eq!(axis.offset(0), 0.0);
        assert_eq!(axis.offset(2), 48.0);
        assert_eq!(axis.offset(3), 108.0);
        assert_eq!(axis.offset(5), 156.0);
        assert_eq!(axis.total_size(), 999.0 * 24.0 + 60.0);
    }

    #[test]
    fn test_offset_past_end_clamps_to_total_size() {
        let mut axis = Axis::rows(10, 24.0);
        axis.set_size(4, 60.0).unwrap();
        assert_eq!(axis.offset(10), axis.total_size());
        assert_eq!(axis.offset(11), axis.total_size());
        assert_eq!(axis.offset(usize::MAX), axis.total_size());
    }

    #[test]
    fn test_axis_serde_round_trip() {
        let mut axis = Axis::columns(50, 80.0);
        axis.set_size(3, 120.0).unwrap();
        let json = serde_json::to_string(&axis).unwrap();
        let back: Axis = serde_json::from_str(&json).unwrap();
        assert_eq!(back.count(), 50);
        assert_eq!(back.size(3).unwrap(), 120.0);
        assert_eq!(back.size(4).unwrap(), 80.0);
        assert_eq!(back.total_size(), axis.total_size());
    }

    #[test]
    fn test_index_at_offset_inverts_offset() {
        let mut axis = Axis::rows(1000, 24.0);
        axis.set_size(2, 60.0).unwrap();
        axis.set_size(700, 10.0).unwrap();
        assert_eq!(axis.index_at_offset(-5.0), 0);
        assert_eq!(axis.index_at_offset(0.0), 0);
        assert_eq!(axis.index_at_offset(47.9), 1);
        assert_eq!(axis.index_at_offset(48.0), 2);
        assert_eq!(axis.index_at_offset(107.9), 2);
        assert_eq!(axis.index_at_offset(108.0), 3);
        for i in [0usize, 1, 2, 3, 500, 699, 700, 701, 999] {
            assert_eq!(axis.index_at_offset(axis.offset(i)), i);
        }
        // past the end clamps to the last line
        assert_eq!(axis.index_at_offset(axis.total_size() + 1000.0), 999);
    }

    #[test]
    fn test_insert_shifts_overrides() {
        let mut axis = Axis::rows(10, 24.0);
        axis.set_size(2, 60.0).unwrap();
        axis.set_size(5, 30.0).unwrap();
        axis.insert(3).unwrap();
        assert_eq!(axis.count(), 11);
        assert_eq!(axis.size(2).unwrap(), 60.0);
        assert_eq!(axis.size(3).unwrap(), 24.0);
        assert_eq!(axis.size(6).unwrap(), 30.0);
    }

    #[test]
    fn test_delete_shifts_and_returns_override() {
        let mut axis = Axis::rows(10, 24.0);
        axis.set_size(2, 60.0).unwrap();
        axis.set_size(5, 30.0).unwrap();
        assert_eq!(axis.delete(2).unwrap(), Some(60.0));
        assert_eq!(axis.count(), 9);
        assert_eq!(axis.size(4).unwrap(), 30.0);
        assert_eq!(axis.delete(0).unwrap(), None);
    }

    #[test]
    fn test_column_labels() {
        assert_eq!(column_label(0), "A");
        assert_eq!(column_label(25), "Z");
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(27), "AB");
        assert_eq!(column_label(51), "AZ");
        assert_eq!(column_label(52), "BA");
        assert_eq!(column_label(701), "ZZ");
        assert_eq!(column_label(702), "AAA");
    }
}
