use serde::{Deserialize, Serialize};

pub type SeatId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatState {
    Available,
    Selected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seat {
    pub id: SeatId,
    pub row: usize,
    pub col: usize,
    pub selected: bool,
}

impl Seat {
    pub fn new(id: SeatId, row: usize, col: usize, selected: bool) -> Self {
        Self { id, row, col, selected }
    }

    pub fn state(&self) -> SeatState {
        if self.selected {
            SeatState::Selected
        } else {
            SeatState::Available
        }
    }
}
