/// One cell of the automaton.
///
/// `alive` is the committed state that neighbours read; `alive_next` holds the
/// state computed for the coming generation until the grid commits it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub alive: bool,
    pub alive_next: bool,
}

impl Cell {
    /// Create a settled cell (both states equal)
    pub const fn new(alive: bool) -> Self {
        Self {
            alive,
            alive_next: alive,
        }
    }

    /// Next state under B3/S23 given the number of live neighbours:
    /// 1. Live cell with 2-3 neighbours survives
    /// 2. Dead cell with exactly 3 neighbours is born
    /// 3. Everything else is (or stays) dead
    pub const fn evolve(self, neighbors: u8) -> bool {
        matches!((self.alive, neighbors), (true, 2 | 3) | (false, 3))
    }

    /// Promote the computed state to the current one
    pub fn commit(&mut self) {
        self.alive = self.alive_next;
    }
}
