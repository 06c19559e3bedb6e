use serde::{Deserialize, Deserializer, Serialize};

use super::seat::SeatId;

/// Ordered list of selected seat ids, in the order they were selected.
/// Never contains the same id twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionSet {
    ids: Vec<SeatId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id`; returns `false` if it was already present.
    pub fn insert(&mut self, id: SeatId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: SeatId) -> bool {
        match self.ids.iter().position(|&selected| selected == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: SeatId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SeatId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[SeatId] {
        &self.ids
    }

    /// Drops every id for which `keep` returns false, returning the dropped ids.
    pub fn retain(&mut self, mut keep: impl FnMut(SeatId) -> bool) -> Vec<SeatId> {
        let mut dropped = Vec::new();
        self.ids.retain(|&id| {
            let kept = keep(id);
            if !kept {
                dropped.push(id);
            }
            kept
        });
        dropped
    }
}

// Дубликаты схлопываются, остается первое вхождение
impl FromIterator<SeatId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = SeatId>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl<'de> Deserialize<'de> for SelectionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ids = Vec::<SeatId>::deserialize(deserializer)?;
        Ok(ids.into_iter().collect())
    }
}
