/// Durable state of one grid position.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

/// Bit 0 of a persisted cell byte.
pub const ALIVE_BIT: u8 = 0x1;

impl Cell {
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// Decode a persisted byte. Only bit 0 is significant.
    pub const fn from_byte(byte: u8) -> Self {
        if byte & ALIVE_BIT != 0 {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }

    /// Encode for persistence; always 0 or 1.
    pub const fn to_byte(self) -> u8 {
        match self {
            Cell::Alive => ALIVE_BIT,
            Cell::Dead => 0,
        }
    }

    /// Conway's rule (B3/S23):
    /// 1. Live cell with 2-3 neighbors survives
    /// 2. Dead cell with exactly 3 neighbors becomes alive
    /// 3. All other cases result in death
    pub const fn evolve(self, neighbors: u8) -> Self {
        match (self, neighbors) {
            (Cell::Alive, 2 | 3) => Cell::Alive,
            (Cell::Dead, 3) => Cell::Alive,
            _ => Cell::Dead,
        }
    }
}
