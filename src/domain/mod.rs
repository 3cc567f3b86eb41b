pub mod descriptor;
pub mod event;
pub mod models;

pub use descriptor::DescriptorParser;
pub use event::{DescriptorForm, MatchEvent, MatchType};
pub use models::*;
