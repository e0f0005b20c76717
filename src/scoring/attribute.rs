use std::fmt;
use strum_macros::EnumIter;

/// The three accumulators a scan can credit
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, EnumIter,
)]
pub enum Attribute {
    Energy,
    Infantry,
    Knowledge,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Attribute::Energy, Attribute::Infantry, Attribute::Knowledge];
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Attribute::Energy => "Energy",
                Attribute::Infantry => "Infantry",
                Attribute::Knowledge => "Knowledge",
            }
        )
    }
}
