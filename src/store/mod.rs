mod descriptors;
mod document;

pub use descriptors::{load_descriptors, parse_descriptor_lines};
pub use document::UniverseStore;
