use crate::domain::CategoryId;

/// A reservation taken during the current checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub category_id: CategoryId,
    pub quantity: u32,
}

/// Undo log of reservations, in acquisition order.
///
/// Entries are only pushed after the ledger confirmed the reserve and are
/// moved out when undone, so each one is released at most once.
#[derive(Debug, Default)]
pub struct ReservationLog {
    entries: Vec<Reservation>,
}

impl ReservationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, category_id: impl Into<CategoryId>, quantity: u32) {
        self.entries.push(Reservation {
            category_id: category_id.into(),
            quantity,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empties the log, newest reservation first.
    pub fn drain_newest_first(&mut self) -> impl Iterator<Item = Reservation> + '_ {
        self.entries.drain(..).rev()
    }

    /// Forgets every entry once the reservations are committed.
    pub fn commit(&mut self) -> usize {
        let committed = self.entries.len();
        self.entries.clear();
        committed
    }
}
