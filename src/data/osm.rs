use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::errors::{Error, Result};
use crate::rdf::vocab;

pub type OsmId = i64;

/// One `k`/`v` pair. Keys are not unique within an element.
pub type Tag = (String, String);

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl ElementKind {
    pub const ALL: [ElementKind; 3] = [ElementKind::Node, ElementKind::Way, ElementKind::Relation];

    /// Maps an XML element name to a primitive kind. Container and child
    /// elements (`osm`, `bounds`, `tag`, ...) map to `None`.
    pub fn from_tag_name(name: &[u8]) -> Option<Self> {
        match name {
            b"node" => Some(ElementKind::Node),
            b"way" => Some(ElementKind::Way),
            b"relation" => Some(ElementKind::Relation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Node => "node",
            ElementKind::Way => "way",
            ElementKind::Relation => "relation",
        }
    }

    pub fn iri_prefix(&self) -> &'static str {
        match self {
            ElementKind::Node => vocab::NODE_PREFIX,
            ElementKind::Way => vocab::WAY_PREFIX,
            ElementKind::Relation => vocab::RELATION_PREFIX,
        }
    }

    /// Short literal used for `osmm:type`.
    pub fn type_literal(&self) -> &'static str {
        match self {
            ElementKind::Node => "n",
            ElementKind::Way => "w",
            ElementKind::Relation => "r",
        }
    }
}

impl FromStr for ElementKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        ElementKind::from_tag_name(value.as_bytes())
            .ok_or_else(|| Error::Parse(format!("unknown element kind {value:?}")))
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub kind: ElementKind,
    pub id: OsmId,
    pub role: Option<String>,
}

/// A node, way or relation as read from OSM XML.
///
/// Which of `tags`, `node_refs` and `members` are populated depends on the
/// kind, but nothing here enforces it: empty lists simply render nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub id: Option<OsmId>,
    pub changeset: Option<i64>,
    pub version: Option<String>,
    pub timestamp: Option<String>,
    pub user: Option<String>,
    pub userid: Option<i64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub tags: Vec<Tag>,
    pub node_refs: Vec<OsmId>,
    pub members: Vec<Member>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Element {
            kind,
            id: None,
            changeset: None,
            version: None,
            timestamp: None,
            user: None,
            userid: None,
            lat: None,
            lon: None,
            tags: Vec::new(),
            node_refs: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Turtle subject, e.g. `osmnode:123`.
    pub fn subject(&self) -> Result<String> {
        match self.id {
            Some(id) => Ok(format!("{}{}", self.kind.iri_prefix(), id)),
            None => Err(Error::Render(format!("{} without an id has no subject", self.kind))),
        }
    }
}
