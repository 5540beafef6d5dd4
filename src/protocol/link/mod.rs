//! DNP3 data-link framing: the fragment generator and its verifying reader.
pub mod builder;
pub mod reader;
