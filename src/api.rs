//! Boundary for single-resource requests (`/node/{id}` and friends).
//!
//! Fetching from the upstream OSM API is left to an [`OsmApiClient`]
//! implementation; this module only maps paths and converts successful
//! XML responses to Turtle.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::data::osm::{ElementKind, OsmId};
use crate::errors::{Error, Result};
use crate::transform::Converter;

pub const TURTLE_CONTENT_TYPE: &str = "text/turtle";
pub const EXAMPLE_PATHS: [&str; 3] = ["/node/1", "/way/100", "/relation/10000"];

static RESOURCE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(node|way|relation)/(\d+)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    pub kind: ElementKind,
    pub id: OsmId,
}

impl FromStr for ResourcePath {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self> {
        let not_found = || {
            Error::NotFound(format!("{path:?}, try one of {}", EXAMPLE_PATHS.join(", ")))
        };
        let captures = RESOURCE_PATH.captures(path).ok_or_else(not_found)?;
        Ok(ResourcePath {
            kind: captures[1].parse()?,
            id: captures[2].parse().map_err(|_| not_found())?,
        })
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "/{}/{}", self.kind, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

/// Upstream OSM API v0.6. Caching and retries are the implementor's concern.
pub trait OsmApiClient {
    fn fetch(&self, path: &ResourcePath) -> Result<ApiResponse>;
}

/// Converts a `200` response body to Turtle; any other status passes
/// through untouched.
pub fn convert_response(response: ApiResponse, converter: &Converter) -> Result<ApiResponse> {
    if response.status != 200 {
        return Ok(response);
    }
    Ok(ApiResponse {
        status: response.status,
        content_type: TURTLE_CONTENT_TYPE.to_string(),
        body: converter.convert_single_xml(&response.body)?,
    })
}

pub fn convert_resource(
    client: &impl OsmApiClient,
    path: &str,
    converter: &Converter,
) -> Result<ApiResponse> {
    let path: ResourcePath = path.parse()?;
    convert_response(client.fetch(&path)?, converter)
}
