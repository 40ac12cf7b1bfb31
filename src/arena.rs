//! Selection state for the Battle Arena: two comparison slots and a type filter.
//!
//! Slots hold positions into the roster, so the same `Pokemon` values are
//! shared read-only between the grid and the arena.

use crate::models::Pokemon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
        }
    }

    /// 1-based number shown to the user.
    pub fn number(self) -> usize {
        self.index() + 1
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Slot::First => "Select First Pokémon",
            Slot::Second => "Select Second Pokémon",
        }
    }
}

/// Result of selecting a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Filled(Slot),
    Replaced { previous: usize },
    Cleared(Slot),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arena {
    slots: [Option<usize>; 2],
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<usize> {
        self.slots[slot.index()]
    }

    /// Which slot holds `card`, preferring the first.
    pub fn slot_of(&self, card: usize) -> Option<Slot> {
        if self.slots[0] == Some(card) {
            Some(Slot::First)
        } else if self.slots[1] == Some(card) {
            Some(Slot::Second)
        } else {
            None
        }
    }

    /// Handle a click on `card`.
    ///
    /// A selected card is removed from its slot. Otherwise the first empty
    /// slot is filled, and with both full the second slot is replaced.
    pub fn toggle(&mut self, card: usize) -> SelectionChange {
        if let Some(slot) = self.slot_of(card) {
            self.clear(slot);
            return SelectionChange::Cleared(slot);
        }
        match self.slots {
            [None, _] => {
                self.slots[0] = Some(card);
                SelectionChange::Filled(Slot::First)
            }
            [Some(_), None] => {
                self.slots[1] = Some(card);
                SelectionChange::Filled(Slot::Second)
            }
            [Some(_), Some(previous)] => {
                self.slots[1] = Some(card);
                SelectionChange::Replaced { previous }
            }
        }
    }

    pub fn clear(&mut self, slot: Slot) {
        self.slots[slot.index()] = None;
    }

    pub fn clear_all(&mut self) {
        self.slots = [None, None];
    }

    /// Battle analysis is only available with both slots filled.
    pub fn can_compare(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn pair<'a>(&self, roster: &'a [Pokemon]) -> Option<(&'a Pokemon, &'a Pokemon)> {
        match self.slots {
            [Some(a), Some(b)] => Some((roster.get(a)?, roster.get(b)?)),
            _ => None,
        }
    }
}

/// Optional single-type restriction on the visible grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilter {
    active: Option<String>,
}

impl TypeFilter {
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn set(&mut self, ty: Option<&str>) {
        self.active = ty.map(str::to_lowercase);
    }

    /// Pick `ty`, or drop back to all types when it is already active.
    pub fn toggle(&mut self, ty: &str) {
        if self.is_active(ty) {
            self.active = None;
        } else {
            self.set(Some(ty));
        }
    }

    pub fn is_active(&self, ty: &str) -> bool {
        self.active
            .as_deref()
            .map_or(false, |a| a.eq_ignore_ascii_case(ty))
    }

    pub fn matches(&self, pokemon: &Pokemon) -> bool {
        match &self.active {
            None => true,
            Some(ty) => pokemon.has_type(ty),
        }
    }

    /// Roster positions that pass the filter, in roster order.
    pub fn visible(&self, roster: &[Pokemon]) -> Vec<usize> {
        roster
            .iter()
            .enumerate()
            .filter_map(|(i, p)| if self.matches(p) { Some(i) } else { None })
            .collect()
    }

    /// Step through `options` (with "all" before the first entry).
    pub fn cycle(&mut self, options: &[String], forward: bool) {
        if options.is_empty() {
            self.active = None;
            return;
        }
        let current = self
            .active
            .as_deref()
            .and_then(|a| options.iter().position(|o| o.eq_ignore_ascii_case(a)));
        // position 0 is "all", options are shifted by one
        let len = options.len() + 1;
        let pos = current.map_or(0, |i| i + 1);
        let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
        self.active = if next == 0 {
            None
        } else {
            Some(options[next - 1].clone())
        };
    }
}

/// Distinct types in order of first appearance.
pub fn type_options(roster: &[Pokemon]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for ty in roster.iter().flat_map(|p| p.types.iter()) {
        let ty = ty.to_lowercase();
        if !out.contains(&ty) {
            out.push(ty);
        }
    }
    out
}
