//! Seams between the [`Room`](crate::room::Room) controller and whatever
//! actually shows the seats: the in-memory [`Document`](crate::dom::Document)
//! or a test double.

use crate::models::SeatId;

/// Style marker carried by a grid cell. `Available` and `Occupied` are
/// mutually exclusive on a seat element; gaps only ever carry `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatMarker {
    Available,
    Occupied,
    Empty,
}

impl SeatMarker {
    pub fn class_name(self) -> &'static str {
        match self {
            SeatMarker::Available => "available",
            SeatMarker::Occupied => "occupied",
            SeatMarker::Empty => "empty",
        }
    }
}

/// Container that receives one sub-container per layout row.
pub trait GridSurface {
    type Row;
    type Cell;

    fn append_row(&mut self) -> Self::Row;

    /// Appends a clickable seat element marked [`SeatMarker::Available`]
    /// that embeds the icon at `icon_src` and carries `seat` as its data.
    fn append_seat(&mut self, row: &Self::Row, seat: SeatId, icon_src: &str) -> Self::Cell;

    /// Appends a non-interactive placeholder marked [`SeatMarker::Empty`].
    fn append_gap(&mut self, row: &Self::Row);

    /// Replaces the seat's marker.
    fn set_marker(&mut self, cell: &Self::Cell, marker: SeatMarker);
}

/// Anything that can show the running `"<n>/<m>"` text.
pub trait CounterDisplay {
    fn set_text(&mut self, text: &str);
}

impl CounterDisplay for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}
