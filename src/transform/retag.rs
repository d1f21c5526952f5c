//! Rule driven rewriting of element tags.
//!
//! Rules come from tab separated text, one per line:
//!
//! ```text
//! +	<way>	*	is_in=BRA
//! -	<node>|<way>|<relation>	*	created_by=*
//! ```
//!
//! Fields are the operation (`+` add, `-` remove), the element kinds the rule
//! applies to (`*` for all), an attribute filter (parsed, not yet used for
//! matching) and `key=value`.

use log::debug;

use crate::data::osm::{ElementKind, Tag};
use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
}

impl Operation {
    pub fn key_match(&self) -> KeyMatch {
        match self {
            Operation::Add => KeyMatch::Exact,
            Operation::Remove => KeyMatch::Contains,
        }
    }
}

/// How a rule key is compared against a tag key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMatch {
    Exact,
    /// The tag key contains the rule key anywhere.
    Contains,
}

impl KeyMatch {
    pub fn matches(&self, rule_key: &str, tag_key: &str) -> bool {
        match self {
            KeyMatch::Exact => tag_key == rule_key,
            KeyMatch::Contains => tag_key.contains(rule_key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetagRule {
    pub operation: Operation,
    /// `None` applies the rule to every kind.
    pub element_kinds: Option<Vec<ElementKind>>,
    pub attribute_filter: Option<String>,
    pub key: String,
    pub value: String,
}

impl RetagRule {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let fields: Vec<&str> = line.split('\t').collect();
        let [operation, kinds, attributes, key_value] = fields[..] else {
            return Err(format!("expected 4 tab separated fields, found {}", fields.len()));
        };

        let operation = match operation {
            "+" => Operation::Add,
            "-" => Operation::Remove,
            other => return Err(format!("unknown operation {other:?}, expected + or -")),
        };

        let kind_names = kinds.replace(['<', '>'], "");
        let kind_names: Vec<&str> = kind_names.split('|').collect();
        let element_kinds = if kind_names[0].starts_with('*') {
            None
        } else {
            let kinds = kind_names
                .iter()
                .map(|name| {
                    ElementKind::from_tag_name(name.as_bytes())
                        .ok_or_else(|| format!("unknown element kind {name:?}"))
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Some(kinds)
        };

        let attribute_filter = match attributes {
            "" => return Err("attribute filter is empty, use * to match any".to_string()),
            filter if filter.starts_with('*') => None,
            filter => Some(filter.to_string()),
        };

        let parts: Vec<&str> = key_value.split('=').collect();
        let [key, value] = parts[..] else {
            return Err(format!("expected exactly one key=value pair, found {key_value:?}"));
        };

        Ok(RetagRule {
            operation,
            element_kinds,
            attribute_filter,
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    pub fn applies_to(&self, kind: ElementKind) -> bool {
        self.element_kinds
            .as_ref()
            .map_or(true, |kinds| kinds.contains(&kind))
    }

    /// Rewrites the whole tag list once. The flag reports whether any tag
    /// matched the rule key.
    pub fn apply(&self, tags: Vec<Tag>) -> (Vec<Tag>, bool) {
        let key_match = self.operation.key_match();
        let mut satisfied = false;
        let mut rewritten = Vec::with_capacity(tags.len());

        for (key, value) in tags {
            match self.operation {
                Operation::Remove if key_match.matches(&self.key, &key) => {
                    satisfied = true;
                }
                Operation::Add if !satisfied && key_match.matches(&self.key, &key) => {
                    satisfied = true;
                    rewritten.push((key, self.value.clone()));
                }
                _ => rewritten.push((key, value)),
            }
        }
        (rewritten, satisfied)
    }

    fn to_tag(&self) -> Tag {
        (self.key.clone(), self.value.clone())
    }
}

/// Ordered, immutable rule set applied to every element of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Retagger {
    rules: Vec<RetagRule>,
}

impl Retagger {
    pub fn new(rules: Vec<RetagRule>) -> Self {
        Retagger { rules }
    }

    /// Parses a whole rule file. Any bad line rejects the file.
    pub fn parse(rules_tsv: &str) -> Result<Self> {
        let rules = rules_tsv
            .lines()
            .enumerate()
            .map(|(index, line)| {
                RetagRule::parse(line).map_err(|message| Error::RuleConfig {
                    line: index + 1,
                    message,
                    rules: rules_tsv.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(rules = rules.len(); "Loaded retag rules");
        Ok(Retagger::new(rules))
    }

    pub fn rules(&self) -> &[RetagRule] {
        &self.rules
    }

    /// Applies every rule in order, each one rescanning the list left by the
    /// previous rules. `add` rules that never matched are appended at the end.
    pub fn retag(&self, kind: ElementKind, tags: Vec<Tag>) -> Vec<Tag> {
        let (mut tags, unsatisfied) = self
            .rules
            .iter()
            .filter(|rule| rule.applies_to(kind))
            .fold((tags, Vec::new()), |(tags, mut unsatisfied), rule| {
                let (tags, satisfied) = rule.apply(tags);
                if !satisfied {
                    unsatisfied.push(rule);
                }
                (tags, unsatisfied)
            });

        tags.extend(
            unsatisfied
                .into_iter()
                .filter(|rule| rule.operation == Operation::Add)
                .map(RetagRule::to_tag),
        );
        tags
    }
}
