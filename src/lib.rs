//! Converts OpenStreetMap API v0.6 XML (single elements or whole dumps) into
//! RDF Turtle.

pub mod api;
pub mod config;
pub mod data;
pub mod errors;
pub mod etl;
pub mod rdf;
pub mod transform;

pub use crate::errors::{Error, Result};
pub use crate::etl::dump_to_ttl::{convert_dump, DumpSummary};
pub use crate::transform::Converter;
