use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use super::{
    picker::{AttributePicker, RandomAttributePicker},
    table::ScanCharacterTable,
    Attribute, ScoreError,
};
use crate::stats::PlayerStats;

/// Points earned by one scan and the attribute they go to.
///
/// `attribute` is `None` only for an empty scan, which earns nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanScore {
    pub points: u32,
    pub attribute: Option<Attribute>,
}

impl ScanScore {
    pub fn points_text(&self) -> String {
        self.points.to_string()
    }

    pub fn is_credit(&self) -> bool {
        self.attribute.is_some()
    }

    /// Returns `stats` with the points added to the chosen attribute
    pub fn apply_to(&self, stats: &PlayerStats) -> PlayerStats {
        match self.attribute {
            Some(attribute) => stats.credited(attribute, self.points),
            None => stats.clone(),
        }
    }
}

pub struct ScoreCalculator {
    table: &'static ScanCharacterTable,
    picker: Arc<dyn AttributePicker>,
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreCalculator {
    pub fn new() -> Self {
        Self::with_picker(Arc::new(RandomAttributePicker::new()))
    }

    pub fn with_picker(picker: Arc<dyn AttributePicker>) -> Self {
        Self {
            table: ScanCharacterTable::global(),
            picker,
        }
    }

    /// Sums the table value of every character of `scan_text`.
    pub fn sum_points(&self, scan_text: &str) -> Result<u32, ScoreError> {
        scan_text
            .chars()
            .enumerate()
            .try_fold(0u32, |total, (position, character)| {
                self.table
                    .value_of(character)
                    .map(|value| total.saturating_add(value))
                    .ok_or(ScoreError::InvalidCharacter {
                        character,
                        position,
                    })
            })
    }

    #[instrument(skip(self), fields(picker = self.picker.picker_name()))]
    pub fn compute_points(&self, scan_text: &str) -> Result<ScanScore, ScoreError> {
        let points = self.sum_points(scan_text)?;

        if scan_text.is_empty() {
            debug!("Empty scan, nothing to credit");
            return Ok(ScanScore {
                points,
                attribute: None,
            });
        }

        let attribute = self.picker.pick();
        debug!(points, %attribute, "Scan scored");

        Ok(ScanScore {
            points,
            attribute: Some(attribute),
        })
    }
}
