pub mod osm;

pub use self::osm::{Element, ElementKind, Member, OsmId, Tag};
