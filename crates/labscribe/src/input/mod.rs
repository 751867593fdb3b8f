//! Raw test inputs and parsing into candidate tests.

mod parser;
mod record;

pub use parser::{Parser, ParserConfig};
pub(crate) use parser::parse_leading_number;
pub use record::{RawTestInput, RecordValue, StructuredRecord};
