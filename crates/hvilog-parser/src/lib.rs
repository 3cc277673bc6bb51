pub mod decode;
pub mod errors;
pub mod model;

pub use decode::{decode_record, parse_classing_log, FIELD_DELIMITER, MIN_FIELDS};
pub use errors::ParseError;
pub use model::{ClassingRecord, DecodeFailure, DecodePolicy, ParseReport};

#[cfg(test)]
mod tests;
