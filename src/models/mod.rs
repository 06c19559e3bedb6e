pub mod layout;
pub mod seat;
pub mod selection;

pub use layout::{Layout, LayoutError};
pub use seat::{Seat, SeatId, SeatState};
pub use selection::SelectionSet;
