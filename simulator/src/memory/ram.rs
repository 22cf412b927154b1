use std::collections::BTreeMap;

/// Consecutive addresses shown per row of a trace snapshot.
pub const CELLS_PER_ROW: i64 = 8;

/// Sparse data memory.
///
/// Addresses are used as computed (`base + offset`), without scaling. Cells
/// are created on first write and absent cells read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ram(BTreeMap<i64, i64>);

impl Ram {
    pub fn read(&self, addr: i64) -> i64 {
        self.0.get(&addr).copied().unwrap_or_default()
    }

    pub fn write(&mut self, addr: i64, value: i64) {
        self.0.insert(addr, value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Populated cells in ascending address order.
    pub fn cells(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.0.iter().map(|(&addr, &value)| (addr, value))
    }

    /// Rows of [`CELLS_PER_ROW`] consecutive addresses that contain at least
    /// one populated cell, keyed by their first address (a multiple of 8).
    pub fn rows(&self) -> Vec<(i64, [i64; CELLS_PER_ROW as usize])> {
        let mut rows: Vec<(i64, [i64; CELLS_PER_ROW as usize])> = Vec::new();
        for (addr, value) in self.cells() {
            let base = addr.div_euclid(CELLS_PER_ROW) * CELLS_PER_ROW;
            let slot = addr.rem_euclid(CELLS_PER_ROW) as usize;
            match rows.last_mut() {
                Some((last, values)) if *last == base => values[slot] = value,
                _ => {
                    let mut values = [0; CELLS_PER_ROW as usize];
                    values[slot] = value;
                    rows.push((base, values));
                }
            }
        }
        rows
    }
}
