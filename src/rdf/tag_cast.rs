use super::vocab::{INDENT, WIKIDATA_PREFIX, XREF_PREFIX};

/// Tag keys whose values are also emitted as IRIs.
const CASTABLE_KEYS: [&str; 1] = ["wikidata"];

/// `Q` followed by digits, the only form safe to use as a `wikidata:` local name.
fn is_entity_id(value: &str) -> bool {
    value
        .strip_prefix('Q')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Adds a typed companion line for tags with well-known values, e.g.
/// `wikidata=Q42` also yields `osmx:wikidata wikidata:Q42 ;`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagValueCaster;

impl TagValueCaster {
    pub fn new() -> Self {
        TagValueCaster
    }

    pub fn can_cast(&self, encoded_key: &str) -> bool {
        CASTABLE_KEYS.contains(&encoded_key)
    }

    /// Returns `None` for values that are not a single entity id, such as
    /// multi-valued `Q1;Q2`. The plain literal line still carries them.
    pub fn cast(&self, encoded_key: &str, raw_value: &str) -> Option<String> {
        is_entity_id(raw_value)
            .then(|| format!("{INDENT}{XREF_PREFIX}{encoded_key} {WIKIDATA_PREFIX}{raw_value} ;"))
    }
}
