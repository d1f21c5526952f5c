// See https://wiki.openstreetmap.org/wiki/Sophox#How_OSM_data_is_stored

/// Preamble of every document, in output order.
pub const PREFIXES: [&str; 9] = [
    "PREFIX geo: <http://www.opengis.net/ont/geosparql#>",
    "PREFIX osmnode: <https://www.openstreetmap.org/node/>",
    "PREFIX osmrel: <https://www.openstreetmap.org/relation/>",
    "PREFIX osmway: <https://www.openstreetmap.org/way/>",
    "PREFIX osmm: <https://example.org/todo-meta/>",
    "PREFIX osmt: <https://wiki.openstreetmap.org/wiki/Key:>",
    "PREFIX osmx: <https://example.org/todo-xref/>",
    "PREFIX wikidata: <http://www.wikidata.org/entity/>",
    "PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>",
];

pub const NODE_PREFIX: &str = "osmnode:";
pub const WAY_PREFIX: &str = "osmway:";
pub const RELATION_PREFIX: &str = "osmrel:";
pub const TAG_PREFIX: &str = "osmt:";
pub const XREF_PREFIX: &str = "osmx:";
pub const WIKIDATA_PREFIX: &str = "wikidata:";

pub const INDENT: &str = "    ";
