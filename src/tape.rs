use tracing::debug;

/// An unbounded byte tape addressed by signed virtual addresses.
///
/// The tape is stored as two independent arenas:
/// - `non_negative`: address `a >= 0` lives at index `a`
/// - `negative`: address `a < 0` lives at index `-a - 1`
///
/// Each arena grows one zeroed cell at a time as addresses are first reached,
/// so its length is always one past the furthest offset touched on that side.
#[derive(Debug, Default, Clone)]
pub struct Tape {
    non_negative: Vec<u8>,
    negative: Vec<u8>,
}

/// Which arena a virtual address maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    NonNegative,
    Negative,
}

/// Translate a virtual address to its arena and offset within it.
#[inline(always)]
fn locate(address: isize) -> (Side, usize) {
    if address < 0 {
        // !a == -a - 1, without overflowing on isize::MIN.
        (Side::Negative, !address as usize)
    } else {
        (Side::NonNegative, address as usize)
    }
}

impl Tape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cell at `address`, growing its side until the cell exists.
    ///
    /// Never fails. Cells already resolved keep their value and position.
    pub fn resolve(&mut self, address: isize) -> &mut u8 {
        let (side, offset) = locate(address);
        let cells = match side {
            Side::NonNegative => &mut self.non_negative,
            Side::Negative => &mut self.negative,
        };
        while offset >= cells.len() {
            cells.push(0);
            debug!(side = ?side, size = cells.len(), "expanded tape");
        }
        &mut cells[offset]
    }

    /// Read the cell at `address` without growing. Unreached cells read as 0.
    pub fn get(&self, address: isize) -> u8 {
        let (side, offset) = locate(address);
        let cells = match side {
            Side::NonNegative => &self.non_negative,
            Side::Negative => &self.negative,
        };
        cells.get(offset).copied().unwrap_or(0)
    }

    /// Current lengths of the `(non_negative, negative)` arenas.
    pub fn extents(&self) -> (usize, usize) {
        (self.non_negative.len(), self.negative.len())
    }
}
