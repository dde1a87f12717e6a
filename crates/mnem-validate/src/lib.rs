//! Shape, size, and range enforcement on every external input, plus request
//! shaping into the typed structs the rest of the workspace consumes (spec
//! §4.7). Never touches storage or the clock beyond what callers pass in.

mod bounds;
mod fields;
mod metadata;
mod requests;

pub use fields::{
    validate_content, validate_context, validate_limit, validate_query, validate_range_order,
    validate_timestamp, validate_unit_range,
};
pub use metadata::validate_metadata;
pub use requests::{
    validate_query_layer, validate_recall, validate_remember, validate_save_to_layer,
    QueryLayerRequest, RecallRequest, RememberRequest, SaveToLayerRequest,
};
