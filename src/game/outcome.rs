use serde::Serialize;
use strum::IntoEnumIterator;

use crate::scoring::{Attribute, ScanScore};
use crate::stats::PlayerStats;

/// What the barcode scanner hands back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResult {
    Scanned {
        text: String,
        /// Symbology reported by the scanner; not used for scoring
        format: Option<String>,
    },
    Cancelled,
}

impl ScanResult {
    pub fn scanned(text: impl Into<String>) -> Self {
        ScanResult::Scanned {
            text: text.into(),
            format: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ScanOutcome {
    Credited {
        score: ScanScore,
        stats: PlayerStats,
    },
    NothingCredited {
        stats: PlayerStats,
    },
    Cancelled,
}

impl ScanOutcome {
    /// Text shown to the player after a scan
    pub fn message(&self) -> String {
        match self {
            ScanOutcome::Credited { score, stats } => {
                let attribute = score
                    .attribute
                    .map(|a| a.to_string())
                    .unwrap_or_default();
                format!(
                    "Excellent! This scan increased your {} by {}!\n\n{}",
                    attribute,
                    score.points_text(),
                    stats_summary(stats)
                )
            }
            ScanOutcome::NothingCredited { stats } => format!(
                "That scan was empty, so none of your stats increased.\n\n{}",
                stats_summary(stats)
            ),
            ScanOutcome::Cancelled => "Scan cancelled.".to_string(),
        }
    }

    pub fn stats(&self) -> Option<&PlayerStats> {
        match self {
            ScanOutcome::Credited { stats, .. } | ScanOutcome::NothingCredited { stats } => {
                Some(stats)
            }
            ScanOutcome::Cancelled => None,
        }
    }
}

fn stats_summary(stats: &PlayerStats) -> String {
    Attribute::iter().fold(
        String::from("Your current stats are:"),
        |mut summary, attribute| {
            summary.push_str(&format!("\n{}: {}", attribute, stats.attribute(attribute)));
            summary
        },
    )
}
