pub mod attribute;
pub mod calculator;
pub mod picker;
pub mod table;

mod errors;

pub use attribute::Attribute;
pub use calculator::{ScanScore, ScoreCalculator};
pub use errors::ScoreError;
pub use picker::{AttributePicker, FixedAttributePicker, RandomAttributePicker};
pub use table::ScanCharacterTable;
