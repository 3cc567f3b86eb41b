pub mod card;
pub mod outcome;
pub mod processing;
pub mod promo;
pub mod ranking;
pub mod report;
pub mod show;

pub use card::AutoBooking;
pub use outcome::{AppliedMatch, OutcomeApplier};
pub use processing::{ProcessingService, ShowOptions};
pub use show::{ShowRunner, ShowSummary};
