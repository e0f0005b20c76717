pub mod outcome;
pub mod session;

pub use outcome::{ScanOutcome, ScanResult};
pub use session::GameSession;
