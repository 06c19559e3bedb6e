use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::models::{Layout, Seat, SeatId, SelectionSet};
use crate::persistence::{CookieStore, SelectionCookie};
use crate::surface::{CounterDisplay, GridSurface, SeatMarker};

pub const DEFAULT_ICON_SRC: &str = "/static/icons/armchair.svg";

/// What to do with restored ids that match no seat of the current layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleIds {
    #[default]
    Prune,
    /// Leave them in the selection: they count and get persisted again,
    /// but no seat is ever shown as selected for them.
    Keep,
}

#[derive(Debug, Clone)]
pub struct RoomOptions {
    pub cookie: SelectionCookie,
    pub icon_src: String,
    pub stale_ids: StaleIds,
}

impl Default for RoomOptions {
    fn default() -> Self {
        Self {
            cookie: SelectionCookie::default(),
            icon_src: DEFAULT_ICON_SRC.to_string(),
            stale_ids: StaleIds::default(),
        }
    }
}

struct SeatSlot<C> {
    seat: Seat,
    cell: C,
}

/// Serializable snapshot of a room.
#[derive(Debug, Clone, Serialize)]
pub struct RoomView {
    pub counter: String,
    pub selected: SelectionSet,
    pub total: usize,
    pub seats: Vec<Seat>,
}

/// Seat grid controller.
///
/// Owns the seats (by id), the selection and the cookie store. Building a
/// room restores the persisted selection, renders the layout into `surface`
/// and writes the counter and the cookie once.
pub struct Room<S: GridSurface, D, C> {
    surface: S,
    display: D,
    cookies: C,
    options: RoomOptions,
    seats: BTreeMap<SeatId, SeatSlot<S::Cell>>,
    selection: SelectionSet,
}

impl<S, D, C> Room<S, D, C>
where
    S: GridSurface,
    D: CounterDisplay,
    C: CookieStore,
{
    pub fn new(layout: &Layout, surface: S, display: D, cookies: C, options: RoomOptions) -> Self {
        let selection = Self::restore(&options.cookie, &cookies);

        let mut room = Self {
            surface,
            display,
            cookies,
            options,
            seats: BTreeMap::new(),
            selection,
        };
        room.generate(layout);
        room
    }

    // Ошибка разбора не выходит за пределы восстановления
    fn restore(cookie: &SelectionCookie, cookies: &C) -> SelectionSet {
        match cookie.restore(cookies) {
            Ok(selection) => {
                debug!("Restored {} selected seats from cookie", selection.len());
                selection
            }
            Err(e) => {
                debug!("Starting with empty selection: {}", e);
                SelectionSet::new()
            }
        }
    }

    fn generate(&mut self, layout: &Layout) {
        let mut next_id: SeatId = 0;

        for (row_index, cells) in layout.rows().iter().enumerate() {
            // Строка создается даже без мест, чтобы сохранить структуру зала
            let row = self.surface.append_row();

            for (col_index, &is_seat) in cells.iter().enumerate() {
                if !is_seat {
                    self.surface.append_gap(&row);
                    continue;
                }

                let id = next_id;
                next_id += 1;

                let cell = self.surface.append_seat(&row, id, &self.options.icon_src);
                let seat = Seat::new(id, row_index, col_index, false);
                self.seats.insert(id, SeatSlot { seat, cell });

                if self.selection.contains(id) {
                    self.mark_selected(id);
                }
            }
        }

        if self.options.stale_ids == StaleIds::Prune {
            let seats = &self.seats;
            let dropped = self.selection.retain(|id| seats.contains_key(&id));
            if !dropped.is_empty() {
                warn!("Dropped {} restored seat ids missing from layout: {:?}", dropped.len(), dropped);
            }
        }

        self.refresh();
    }

    // Выбор без записи в selection и cookie, используется при восстановлении
    fn mark_selected(&mut self, id: SeatId) {
        if let Some(slot) = self.seats.get_mut(&id) {
            slot.seat.selected = true;
            self.surface.set_marker(&slot.cell, SeatMarker::Occupied);
        }
    }

    /// Click on an element carrying `target` as its seat data. Gaps and
    /// other elements carry none and are ignored. Returns whether a seat
    /// changed state.
    pub fn handle_click(&mut self, target: Option<SeatId>) -> bool {
        let Some(id) = target else {
            return false;
        };
        let Some(slot) = self.seats.get(&id) else {
            debug!("Click on unknown seat {}", id);
            return false;
        };

        if slot.seat.selected {
            self.unselect(id)
        } else {
            self.select(id)
        }
    }

    /// AVAILABLE -> SELECTED. No-op for unknown or already selected seats.
    pub fn select(&mut self, id: SeatId) -> bool {
        let Some(slot) = self.seats.get_mut(&id) else {
            return false;
        };
        if slot.seat.selected {
            return false;
        }

        slot.seat.selected = true;
        self.surface.set_marker(&slot.cell, SeatMarker::Occupied);
        self.selection.insert(id);
        debug!("Seat {} selected", id);

        self.refresh();
        true
    }

    /// SELECTED -> AVAILABLE. No-op for unknown or available seats.
    pub fn unselect(&mut self, id: SeatId) -> bool {
        let Some(slot) = self.seats.get_mut(&id) else {
            return false;
        };
        if !slot.seat.selected {
            return false;
        }

        slot.seat.selected = false;
        self.surface.set_marker(&slot.cell, SeatMarker::Available);
        self.selection.remove(id);
        debug!("Seat {} released", id);

        self.refresh();
        true
    }

    /// Rewrites the counter text and the selection cookie.
    pub fn refresh(&mut self) {
        let text = self.counter_text();
        self.display.set_text(&text);
        self.options.cookie.persist(&self.selection, &mut self.cookies);
    }

    pub fn counter_text(&self) -> String {
        format!("{}/{}", self.selection.len(), self.seats.len())
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn total_seats(&self) -> usize {
        self.seats.len()
    }

    pub fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.seats.get(&id).map(|slot| &slot.seat)
    }

    /// Seats in id order.
    pub fn seats(&self) -> impl Iterator<Item = &Seat> + '_ {
        self.seats.values().map(|slot| &slot.seat)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn cookies(&self) -> &C {
        &self.cookies
    }

    pub fn view(&self) -> RoomView {
        RoomView {
            counter: self.counter_text(),
            selected: self.selection.clone(),
            total: self.total_seats(),
            seats: self.seats().cloned().collect(),
        }
    }

    pub fn into_parts(self) -> (S, D, C) {
        (self.surface, self.display, self.cookies)
    }
}
