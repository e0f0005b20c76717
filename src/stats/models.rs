use serde::{Deserialize, Serialize};

use crate::scoring::Attribute;

/// Cumulative totals for the player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Row id, `None` until the record has been inserted
    pub id: Option<i64>,
    pub wins: u32,
    pub losses: u32,
    pub energy: u32,
    pub infantry: u32,
    pub knowledge: u32,
}

impl PlayerStats {
    pub fn new(wins: u32, losses: u32, energy: u32, infantry: u32, knowledge: u32) -> Self {
        Self {
            id: None,
            wins,
            losses,
            energy,
            infantry,
            knowledge,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Current total of one accumulator
    pub fn attribute(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Energy => self.energy,
            Attribute::Infantry => self.infantry,
            Attribute::Knowledge => self.knowledge,
        }
    }

    /// Returns a copy with `points` added to `attribute`
    pub fn credited(&self, attribute: Attribute, points: u32) -> Self {
        let mut next = self.clone();
        let slot = match attribute {
            Attribute::Energy => &mut next.energy,
            Attribute::Infantry => &mut next.infantry,
            Attribute::Knowledge => &mut next.knowledge,
        };
        *slot = slot.saturating_add(points);
        next
    }

    /// Returns a copy with one more win or loss
    pub fn with_game_result(&self, won: bool) -> Self {
        let mut next = self.clone();
        if won {
            next.wins = next.wins.saturating_add(1);
        } else {
            next.losses = next.losses.saturating_add(1);
        }
        next
    }
}
