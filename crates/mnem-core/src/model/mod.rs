mod layer;
mod metadata;
mod record;

pub use layer::Layer;
pub use metadata::Metadata;
pub use record::{now_seconds, Record};
