//! Output renderers for district lists and detection feeds.

mod csv;
pub mod envelope;
mod json;
mod table;
mod types;
mod writer;

pub use csv::CsvWriter;
pub use envelope::{ErrorPayload, EventType, JsonEnvelope, ResultType};
pub use json::{JsonWriter, write_envelope};
pub use table::TableWriter;
pub use types::{DistrictRow, FeedRow, Row};
pub use writer::{OutputWriter, write_rows};
