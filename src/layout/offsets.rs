//! Cumulative offset tables.
//!
//! A table for `n` rows (or columns) holds `n + 1` strictly increasing
//! entries starting at 0: `offsets[i]` is where row `i` starts and
//! `offsets[i + 1] - offsets[i]` is its current size. Sizes are non-uniform
//! once the user resizes, so every coordinate lookup is a binary search.

/// Find the row/column containing `coordinate`.
///
/// Returns the greatest `i` with `offsets[i] <= coordinate < offsets[i + 1]`.
/// Coordinates before the table clamp to `0`, past it to the last index.
pub fn index_for_offset(offsets: &[f64], coordinate: f64) -> usize {
    let count = offsets.len().saturating_sub(1);
    let at_or_before = offsets.partition_point(|&o| o <= coordinate);
    at_or_before
        .saturating_sub(1)
        .min(count.saturating_sub(1))
}

/// One axis worth of cumulative offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetTable {
    offsets: Vec<f64>,
}

impl Default for OffsetTable {
    fn default() -> Self {
        Self { offsets: vec![0.0] }
    }
}

impl OffsetTable {
    /// A table of `count` sections of uniform `size`.
    pub fn uniform(count: usize, size: f64) -> Self {
        let mut table = Self::default();
        table.append(count, size);
        table
    }

    /// Number of rows/columns (one less than the number of entries).
    pub fn count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Raw entries, `count() + 1` long.
    pub fn as_slice(&self) -> &[f64] {
        &self.offsets
    }

    /// Total extent of the content along this axis.
    pub fn total(&self) -> f64 {
        self.offsets.last().copied().unwrap_or(0.0)
    }

    /// Leading edge of section `index` (the total for indices past the end).
    pub fn start(&self, index: usize) -> f64 {
        self.offsets
            .get(index)
            .copied()
            .unwrap_or_else(|| self.total())
    }

    /// Current size of section `index` (0 past the end).
    pub fn size(&self, index: usize) -> f64 {
        match (self.offsets.get(index), self.offsets.get(index + 1)) {
            (Some(start), Some(end)) => end - start,
            _ => 0.0,
        }
    }

    /// See [`index_for_offset`].
    pub fn index_for_offset(&self, coordinate: f64) -> usize {
        index_for_offset(&self.offsets, coordinate)
    }

    /// Append `count` sections of `size`. Existing entries are untouched.
    pub fn append(&mut self, count: usize, size: f64) {
        self.offsets.reserve(count);
        let mut edge = self.total();
        for _ in 0..count {
            edge += size;
            self.offsets.push(edge);
        }
    }

    /// Find the boundary entry within `tolerance` of `coordinate`.
    ///
    /// Entry 0 is the leading edge of the first section and is never a
    /// resize boundary.
    pub fn boundary_near(&self, coordinate: f64, tolerance: f64) -> Option<usize> {
        let candidate = self.offsets.partition_point(|&o| o < coordinate - tolerance);
        let offset = self.offsets.get(candidate)?;
        (candidate > 0 && *offset <= coordinate + tolerance).then_some(candidate)
    }

    /// Find the section whose interior (excluding a `tolerance` band at
    /// each edge) contains `coordinate`.
    pub fn section_at(&self, coordinate: f64, tolerance: f64) -> Option<usize> {
        if self.count() == 0 || coordinate < 0.0 || coordinate >= self.total() {
            return None;
        }
        let index = self.index_for_offset(coordinate);
        let inside = coordinate > self.start(index) + tolerance
            && coordinate < self.start(index + 1) - tolerance;
        inside.then_some(index)
    }

    /// Move `boundary` and every later entry by `delta`, resizing only the
    /// section that ends at `boundary`.
    ///
    /// Returns `false` and leaves the table unchanged if the boundary is
    /// invalid or the section would end up smaller than `min_size`.
    pub fn resize_boundary(&mut self, boundary: usize, delta: f64, min_size: f64) -> bool {
        if boundary == 0 || boundary > self.count() {
            return false;
        }
        if self.size(boundary - 1) + delta < min_size {
            return false;
        }
        if let Some(tail) = self.offsets.get_mut(boundary..) {
            for entry in tail {
                *entry += delta;
            }
        }
        true
    }

    /// Remove section `index`, pulling every later section back by its size.
    ///
    /// Returns the removed size, or `None` if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Option<f64> {
        if index >= self.count() {
            return None;
        }
        let size = self.size(index);
        self.offsets.remove(index + 1);
        if let Some(tail) = self.offsets.get_mut(index + 1..) {
            for entry in tail {
                *entry -= size;
            }
        }
        Some(size)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn uniform_table_layout() {
        let table = OffsetTable::uniform(3, 20.0);
        assert_eq!(table.as_slice(), &[0.0, 20.0, 40.0, 60.0]);
        assert_eq!(table.count(), 3);
        assert_eq!(table.total(), 60.0);
        assert_eq!(table.size(1), 20.0);
        assert_eq!(table.size(3), 0.0);
    }

    #[test]
    fn lookup_clamps_both_ends() {
        let table = OffsetTable::uniform(10, 20.0);
        assert_eq!(table.index_for_offset(-5.0), 0);
        assert_eq!(table.index_for_offset(0.0), 0);
        assert_eq!(table.index_for_offset(19.9), 0);
        assert_eq!(table.index_for_offset(20.0), 1);
        assert_eq!(table.index_for_offset(199.0), 9);
        assert_eq!(table.index_for_offset(200.0), 9);
        assert_eq!(table.index_for_offset(1.0e9), 9);
        assert_eq!(table.index_for_offset(f64::NAN), 0);
    }

    #[test]
    fn lookup_on_non_uniform_sizes() {
        let mut table = OffsetTable::uniform(4, 20.0);
        assert!(table.resize_boundary(2, 30.0, 10.0));
        // sizes: 20, 50, 20, 20
        assert_eq!(table.index_for_offset(25.0), 1);
        assert_eq!(table.index_for_offset(69.0), 1);
        assert_eq!(table.index_for_offset(70.0), 2);
    }

    #[test]
    fn boundary_near_respects_tolerance() {
        let table = OffsetTable::uniform(5, 60.0);
        assert_eq!(table.boundary_near(60.0, 3.0), Some(1));
        assert_eq!(table.boundary_near(57.0, 3.0), Some(1));
        assert_eq!(table.boundary_near(123.0, 3.0), Some(2));
        assert_eq!(table.boundary_near(124.0, 3.0), None);
        assert_eq!(table.boundary_near(30.0, 3.0), None);
        assert_eq!(table.boundary_near(1.0, 3.0), None);
        assert_eq!(table.boundary_near(302.0, 3.0), Some(5));
        assert_eq!(table.boundary_near(400.0, 3.0), None);
    }

    #[test]
    fn section_at_excludes_edges() {
        let table = OffsetTable::uniform(5, 60.0);
        assert_eq!(table.section_at(30.0, 3.0), Some(0));
        assert_eq!(table.section_at(61.0, 3.0), None);
        assert_eq!(table.section_at(90.0, 3.0), Some(1));
        assert_eq!(table.section_at(-1.0, 3.0), None);
        assert_eq!(table.section_at(300.0, 3.0), None);
    }

    #[test]
    fn resize_shifts_downstream_only() {
        let mut table = OffsetTable::uniform(4, 20.0);
        assert!(table.resize_boundary(2, 5.0, 10.0));
        assert_eq!(table.as_slice(), &[0.0, 20.0, 45.0, 65.0, 85.0]);
        assert!(table.resize_boundary(4, -5.0, 10.0));
        assert_eq!(table.as_slice(), &[0.0, 20.0, 45.0, 65.0, 80.0]);
    }

    #[test]
    fn resize_below_floor_is_dropped() {
        let mut table = OffsetTable::uniform(4, 20.0);
        let before = table.clone();
        assert!(!table.resize_boundary(1, -11.0, 10.0));
        assert_eq!(table, before);
        assert!(table.resize_boundary(1, -10.0, 10.0));
        assert_eq!(table.size(0), 10.0);
        assert!(!table.resize_boundary(0, 5.0, 10.0));
        assert!(!table.resize_boundary(5, 5.0, 10.0));
    }

    #[test]
    fn remove_keeps_other_sizes() {
        let mut table = OffsetTable::uniform(4, 20.0);
        table.resize_boundary(2, 10.0, 10.0);
        assert_eq!(table.remove(1), Some(30.0));
        assert_eq!(table.as_slice(), &[0.0, 20.0, 40.0, 60.0]);
        assert_eq!(table.remove(3), None);
    }

    #[test]
    fn append_leaves_prefix_alone() {
        let mut table = OffsetTable::uniform(3, 20.0);
        table.resize_boundary(1, 7.0, 10.0);
        let prefix = table.as_slice().to_vec();
        table.append(500, 20.0);
        assert_eq!(table.as_slice().len(), prefix.len() + 500);
        assert_eq!(&table.as_slice()[..prefix.len()], prefix.as_slice());
    }
}
