//! Value objects - immutable types that represent domain concepts

mod actor;
mod polarity;
mod record_id;

pub use actor::{Actor, Attribution};
pub use polarity::Polarity;
pub use record_id::{RecordId, RecordIdParseError};
