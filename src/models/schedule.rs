//! Timetable grid model.
//!
//! The grid holds one optional [`Placement`] per (day, interval, room)
//! slot. Slots and placements refer to the problem's days, intervals,
//! rooms, professors and activities by position, so two grids built for
//! the same problem compare and hash identically regardless of how they
//! were reached.
//!
//! Writes go through a two-phase protocol: a search first builds a
//! [`Proposal`] (a plain value), and only the state that is selected
//! applies it with [`Grid::commit`].

use serde::{Deserialize, Serialize};

use super::Interval;

/// A (day, interval, room) position in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    /// Day index.
    pub day: usize,
    /// Interval index.
    pub interval: usize,
    /// Room index.
    pub room: usize,
}

impl Slot {
    /// Creates a slot.
    pub fn new(day: usize, interval: usize, room: usize) -> Self {
        Self {
            day,
            interval,
            room,
        }
    }
}

/// A committed (professor, activity) pair occupying a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Professor index.
    pub professor: usize,
    /// Activity index.
    pub activity: usize,
}

/// A tentative assignment not yet written into any grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Proposal {
    /// Target slot.
    pub slot: Slot,
    /// What goes there.
    pub placement: Placement,
}

impl Proposal {
    /// Creates a proposal.
    pub fn new(slot: Slot, professor: usize, activity: usize) -> Self {
        Self {
            slot,
            placement: Placement {
                professor,
                activity,
            },
        }
    }
}

/// The assignment grid: day → interval → room → optional placement.
///
/// Deserialization rejects a cell list whose length does not match the
/// declared shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    days: usize,
    intervals: usize,
    rooms: usize,
    cells: Vec<Option<Placement>>,
}

#[derive(Deserialize)]
struct GridData {
    days: usize,
    intervals: usize,
    rooms: usize,
    cells: Vec<Option<Placement>>,
}

impl TryFrom<GridData> for Grid {
    type Error = String;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        let expected = data
            .days
            .checked_mul(data.intervals)
            .and_then(|n| n.checked_mul(data.rooms));
        if expected != Some(data.cells.len()) {
            return Err(format!(
                "grid of shape {}×{}×{} cannot hold {} cells",
                data.days,
                data.intervals,
                data.rooms,
                data.cells.len()
            ));
        }
        Ok(Self {
            days: data.days,
            intervals: data.intervals,
            rooms: data.rooms,
            cells: data.cells,
        })
    }
}

impl Grid {
    /// Creates an empty grid of the given shape.
    pub fn empty(days: usize, intervals: usize, rooms: usize) -> Self {
        Self {
            days,
            intervals,
            rooms,
            cells: vec![None; days * intervals * rooms],
        }
    }

    /// Number of days.
    pub fn days(&self) -> usize {
        self.days
    }

    /// Number of intervals per day.
    pub fn intervals(&self) -> usize {
        self.intervals
    }

    /// Number of rooms.
    pub fn rooms(&self) -> usize {
        self.rooms
    }

    /// Total number of slots.
    pub fn slot_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn index(&self, slot: Slot) -> usize {
        (slot.day * self.intervals + slot.interval) * self.rooms + slot.room
    }

    /// Placement at `slot`, if any. Out-of-shape slots read as empty.
    pub fn get(&self, slot: Slot) -> Option<Placement> {
        if slot.day >= self.days || slot.interval >= self.intervals || slot.room >= self.rooms {
            return None;
        }
        self.cells.get(self.index(slot)).copied().flatten()
    }

    /// Writes a proposal into its slot, returning whatever was there.
    ///
    /// # Panics
    /// Panics if the proposal's slot lies outside the grid.
    pub fn commit(&mut self, proposal: &Proposal) -> Option<Placement> {
        let idx = self.index(proposal.slot);
        self.cells[idx].replace(proposal.placement)
    }

    /// All slots in (day, interval, room) order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..self.days).flat_map(move |day| {
            (0..self.intervals)
                .flat_map(move |interval| (0..self.rooms).map(move |room| Slot::new(day, interval, room)))
        })
    }

    /// Slots with no placement, in (day, interval, room) order.
    pub fn empty_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.slots().filter(|&s| self.get(s).is_none())
    }

    /// Occupied slots with their placements, in (day, interval, room) order.
    pub fn placements(&self) -> impl Iterator<Item = (Slot, Placement)> + '_ {
        self.slots().filter_map(|s| self.get(s).map(|p| (s, p)))
    }

    /// Placements sharing a (day, interval), across all rooms.
    pub fn placements_at(&self, day: usize, interval: usize) -> impl Iterator<Item = Placement> + '_ {
        (0..self.rooms).filter_map(move |room| self.get(Slot::new(day, interval, room)))
    }

    /// Number of occupied slots.
    pub fn assignment_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// A committed class session resolved to names, for output writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledClass<'a> {
    /// Day name.
    pub day: &'a str,
    /// Teaching interval.
    pub interval: Interval,
    /// Room identifier.
    pub room: &'a str,
    /// Professor identifier.
    pub professor: &'a str,
    /// Activity identifier.
    pub activity: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid() {
        let grid = Grid::empty(2, 3, 4);
        assert_eq!(grid.slot_count(), 24);
        assert_eq!(grid.assignment_count(), 0);
        assert_eq!(grid.empty_slots().count(), 24);
        assert_eq!(grid.placements().count(), 0);
    }

    #[test]
    fn test_commit() {
        let mut grid = Grid::empty(1, 2, 2);
        let p = Proposal::new(Slot::new(0, 1, 1), 3, 5);

        assert_eq!(grid.commit(&p), None);
        assert_eq!(grid.get(Slot::new(0, 1, 1)), Some(p.placement));
        assert_eq!(grid.assignment_count(), 1);
        assert_eq!(grid.empty_slots().count(), 3);

        let placed: Vec<_> = grid.placements().collect();
        assert_eq!(placed, vec![(Slot::new(0, 1, 1), p.placement)]);
    }

    #[test]
    fn test_slot_order() {
        let grid = Grid::empty(2, 2, 2);
        let slots: Vec<_> = grid.slots().collect();
        let mut sorted = slots.clone();
        sorted.sort();
        assert_eq!(slots, sorted);
        assert_eq!(slots[0], Slot::new(0, 0, 0));
        assert_eq!(slots[7], Slot::new(1, 1, 1));
    }

    #[test]
    fn test_placements_at() {
        let mut grid = Grid::empty(1, 2, 3);
        grid.commit(&Proposal::new(Slot::new(0, 0, 0), 1, 1));
        grid.commit(&Proposal::new(Slot::new(0, 0, 2), 2, 2));
        grid.commit(&Proposal::new(Slot::new(0, 1, 1), 3, 3));

        let at: Vec<_> = grid.placements_at(0, 0).map(|p| p.professor).collect();
        assert_eq!(at, vec![1, 2]);
    }

    #[test]
    fn test_out_of_shape_reads_empty() {
        let grid = Grid::empty(1, 1, 1);
        assert_eq!(grid.get(Slot::new(1, 0, 0)), None);
        assert_eq!(grid.get(Slot::new(0, 0, 5)), None);
    }

    #[test]
    fn test_deserialize_checks_cell_count() {
        let short = r#"{"days":1,"intervals":1,"rooms":1,"cells":[]}"#;
        assert!(serde_json::from_str::<Grid>(short).is_err());

        let mut grid = Grid::empty(1, 2, 1);
        grid.commit(&Proposal::new(Slot::new(0, 1, 0), 0, 0));
        let back: Grid = serde_json::from_str(&serde_json::to_string(&grid).unwrap()).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_structural_equality() {
        // Same placements committed in different orders
        let a_first = Proposal::new(Slot::new(0, 0, 0), 0, 0);
        let b_first = Proposal::new(Slot::new(0, 1, 0), 0, 0);

        let mut g1 = Grid::empty(1, 2, 1);
        g1.commit(&a_first);
        g1.commit(&b_first);

        let mut g2 = Grid::empty(1, 2, 1);
        g2.commit(&b_first);
        g2.commit(&a_first);

        assert_eq!(g1, g2);
        let mut set = std::collections::HashSet::new();
        set.insert(g1);
        assert!(set.contains(&g2));
    }
}
