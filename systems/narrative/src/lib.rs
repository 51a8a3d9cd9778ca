#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure narrative system that fires scripted slots along the solution path.
//!
//! An ordered script is spread evenly across the spawn-to-exit path when the
//! system is constructed. Each tick the system watches the agent's current
//! cell and fires at most one still-pending slot, reporting fired slot
//! indices for the presentation shell to display. Trigger flags only ever
//! flip from pending to fired; re-entering a cell never re-fires a slot.

use beacon_maze_core::{CellCoord, Event, SlotText};

/// A scripted message bound to one cell of the solution path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NarrativeSlot {
    text: SlotText,
    path_index: usize,
    triggered: bool,
}

impl NarrativeSlot {
    /// Text carried by the slot.
    #[must_use]
    pub fn text(&self) -> &SlotText {
        &self.text
    }

    /// Index into the solution path the slot is bound to.
    #[must_use]
    pub const fn path_index(&self) -> usize {
        self.path_index
    }

    /// Reports whether the slot already fired.
    #[must_use]
    pub const fn triggered(&self) -> bool {
        self.triggered
    }
}

/// Pure system that maps path progress onto narrative slot firings.
#[derive(Clone, Debug)]
pub struct Narrative {
    slots: Vec<NarrativeSlot>,
}

impl Narrative {
    /// Binds an ordered script onto a solution path of `path_length` cells.
    ///
    /// Slot `i` of `N` lands on path index `round(i * (path_length - 1) /
    /// (N - 1))`, clamped into the path; a single-slot script binds to the
    /// spawn. Scripts longer than the path double up on indices, which is
    /// fine: the per-tick scan fires the doubled slots on consecutive
    /// visits.
    #[must_use]
    pub fn from_script(script: Vec<SlotText>, path_length: usize) -> Self {
        let last_index = path_length.saturating_sub(1);
        let slot_count = script.len();
        let slots = script
            .into_iter()
            .enumerate()
            .map(|(ordinal, text)| {
                let path_index = if slot_count <= 1 {
                    0
                } else {
                    let spread =
                        (ordinal * last_index) as f64 / (slot_count - 1) as f64;
                    (spread.round() as usize).min(last_index)
                };
                NarrativeSlot {
                    text,
                    path_index,
                    triggered: false,
                }
            })
            .collect();
        Self { slots }
    }

    /// Slots in script order, with their bindings and trigger flags.
    #[must_use]
    pub fn slots(&self) -> &[NarrativeSlot] {
        &self.slots
    }

    /// Consumes movement events and reports fired slot indices.
    ///
    /// For every tick's `AgentMoved`, the first pending slot (in ascending
    /// script order) whose bound path cell matches the agent's cell is
    /// marked fired and scanning stops, so at most one slot fires per tick.
    /// Slots carrying [`SlotText::Silence`] are consumed without being
    /// reported. Firing is monotonic: a fired slot never resets.
    pub fn handle(&mut self, events: &[Event], path: &[CellCoord], out_fired: &mut Vec<usize>) {
        for event in events {
            let Event::AgentMoved { cell, .. } = event else {
                continue;
            };
            self.fire_first_match(*cell, path, out_fired);
        }
    }

    fn fire_first_match(
        &mut self,
        agent_cell: CellCoord,
        path: &[CellCoord],
        out_fired: &mut Vec<usize>,
    ) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.triggered {
                continue;
            }
            if path.get(slot.path_index) != Some(&agent_cell) {
                continue;
            }

            slot.triggered = true;
            if !matches!(slot.text, SlotText::Silence) {
                out_fired.push(index);
            }
            return;
        }
    }
}
