use std::borrow::Cow;

use crate::data::osm::Element;
use crate::errors::Result;

use super::tag_cast::TagValueCaster;
use super::tag_key::{encode_role, encode_tag_key};
use super::vocab::{INDENT, NODE_PREFIX, TAG_PREFIX};

/// Escapes the characters that would terminate or corrupt a `"..."` literal.
pub fn escape_literal(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '"', '\n', '\r', '\t']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Shortest round-trip decimal with at least one fractional digit and a
/// signed two digit exponent, e.g. `1.0`, `51.5073509`, `1e-07`.
pub fn format_coordinate(value: f64) -> String {
    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

/// Renders one element as a Turtle block, one line per entry, ending with
/// the `.` terminator.
///
/// The WKT point keeps the `lat lon` argument order of the existing
/// datasets even though WKT itself expects `lon lat`.
pub fn render_element(element: &Element, caster: Option<&TagValueCaster>) -> Result<Vec<String>> {
    let mut lines = vec![element.subject()?];

    if let Some(changeset) = element.changeset {
        lines.push(format!("{INDENT}osmm:changeset {changeset} ;"));
    }
    if let (Some(lat), Some(lon)) = (element.lat, element.lon) {
        lines.push(format!(
            "{INDENT}osmm:loc \"Point({} {})\"^^geo:wktLiteral ;",
            format_coordinate(lat),
            format_coordinate(lon),
        ));
    }
    if let Some(timestamp) = &element.timestamp {
        let timestamp = escape_literal(timestamp);
        lines.push(format!("{INDENT}osmm:timestamp \"{timestamp}\"^^xsd:dateTime ;"));
    }
    lines.push(format!("{INDENT}osmm:type \"{}\" ;", element.kind.type_literal()));
    if let Some(user) = &element.user {
        lines.push(format!("{INDENT}osmm:user \"{}\" ;", escape_literal(user)));
    }
    if let Some(userid) = element.userid {
        lines.push(format!("{INDENT}osmm:userid {userid} ;"));
    }
    if let Some(version) = &element.version {
        lines.push(format!("{INDENT}osmm:version {version} ;"));
    }

    for (key, value) in &element.tags {
        let encoded_key = encode_tag_key(key);
        lines.push(format!("{INDENT}{TAG_PREFIX}{encoded_key} \"{}\" ;", escape_literal(value)));
        if let Some(line) = caster
            .filter(|caster| caster.can_cast(&encoded_key))
            .and_then(|caster| caster.cast(&encoded_key, value))
        {
            lines.push(line);
        }
    }

    if !element.node_refs.is_empty() {
        let nodes: Vec<String> = element
            .node_refs
            .iter()
            .map(|node_ref| format!("{NODE_PREFIX}{node_ref}"))
            .collect();
        lines.push(format!("{INDENT}osmx:hasnodes ({}) ;", nodes.join(" ")));
    }

    if !element.members.is_empty() {
        let members: Vec<String> = element
            .members
            .iter()
            .map(|member| {
                format!(
                    "[osmx:hasrole{} {}{}]",
                    encode_role(member.role.as_deref().unwrap_or_default()),
                    member.kind.iri_prefix(),
                    member.id,
                )
            })
            .collect();
        lines.push(format!("{INDENT}osmx:hasmembers ({}) ;", members.join(" ")));
    }

    lines.push(".".to_string());
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::osm::{ElementKind, Member};
    use crate::errors::Error;

    fn element(kind: ElementKind, id: i64) -> Element {
        let mut element = Element::new(kind);
        element.id = Some(id);
        element
    }

    #[test]
    fn bare_element_renders_subject_type_and_terminator() {
        let lines = render_element(&element(ElementKind::Way, 3), None).unwrap();
        assert_eq!(lines, vec!["osmway:3", "    osmm:type \"w\" ;", "."]);
    }

    #[test]
    fn metadata_lines_follow_fixed_order() {
        let mut node = element(ElementKind::Node, 1);
        node.version = Some("4".to_string());
        node.userid = Some(99);
        node.user = Some("mapper".to_string());
        node.timestamp = Some("2022-11-25T19:22:00Z".to_string());
        node.lat = Some(51.5073509);
        node.lon = Some(-0.1277583);
        node.changeset = Some(1234);

        let lines = render_element(&node, None).unwrap();
        assert_eq!(
            lines,
            vec![
                "osmnode:1",
                "    osmm:changeset 1234 ;",
                "    osmm:loc \"Point(51.5073509 -0.1277583)\"^^geo:wktLiteral ;",
                "    osmm:timestamp \"2022-11-25T19:22:00Z\"^^xsd:dateTime ;",
                "    osmm:type \"n\" ;",
                "    osmm:user \"mapper\" ;",
                "    osmm:userid 99 ;",
                "    osmm:version 4 ;",
                ".",
            ]
        );
    }

    #[test]
    fn location_needs_both_coordinates() {
        let mut node = element(ElementKind::Node, 1);
        node.lat = Some(1.0);
        let lines = render_element(&node, None).unwrap();
        assert!(lines.iter().all(|line| !line.contains("osmm:loc")));
    }

    #[test]
    fn zero_coordinates_still_render() {
        let mut node = element(ElementKind::Node, 1);
        node.lat = Some(0.0);
        node.lon = Some(0.0);
        let lines = render_element(&node, None).unwrap();
        assert_eq!(lines[1], "    osmm:loc \"Point(0.0 0.0)\"^^geo:wktLiteral ;");
    }

    #[test]
    fn tags_keep_input_order_and_get_cast_lines() {
        let mut node = element(ElementKind::Node, 5);
        node.tags = vec![
            ("wikidata".to_string(), "Q42".to_string()),
            ("name en".to_string(), "Say \"hi\"".to_string()),
            ("amenity".to_string(), "cafe".to_string()),
        ];
        let lines = render_element(&node, Some(&TagValueCaster::new())).unwrap();
        assert_eq!(
            &lines[2..],
            &[
                "    osmt:wikidata \"Q42\" ;",
                "    osmx:wikidata wikidata:Q42 ;",
                "    osmt:name%20en \"Say \\\"hi\\\"\" ;",
                "    osmt:amenity \"cafe\" ;",
                ".",
            ]
        );
    }

    #[test]
    fn cast_lines_need_a_caster() {
        let mut node = element(ElementKind::Node, 5);
        node.tags = vec![("wikidata".to_string(), "Q42".to_string())];
        let lines = render_element(&node, None).unwrap();
        assert!(lines.iter().all(|line| !line.starts_with("    osmx:")));
    }

    #[test]
    fn multi_valued_wikidata_keeps_only_the_literal() {
        let mut node = element(ElementKind::Node, 5);
        node.tags = vec![("wikidata".to_string(), "Q1;Q2".to_string())];
        let lines = render_element(&node, Some(&TagValueCaster::new())).unwrap();
        assert_eq!(&lines[2..], &["    osmt:wikidata \"Q1;Q2\" ;", "."]);
    }

    #[test]
    fn way_nodes_render_as_list() {
        let mut way = element(ElementKind::Way, 10);
        way.node_refs = vec![1, 2, 3];
        let lines = render_element(&way, None).unwrap();
        assert_eq!(lines[2], "    osmx:hasnodes (osmnode:1 osmnode:2 osmnode:3) ;");
    }

    #[test]
    fn members_render_as_role_blank_nodes() {
        let mut relation = element(ElementKind::Relation, 20);
        relation.members = vec![
            Member { kind: ElementKind::Way, id: 5, role: Some("outer".to_string()) },
            Member { kind: ElementKind::Node, id: 6, role: None },
        ];
        let lines = render_element(&relation, None).unwrap();
        assert_eq!(
            lines[2],
            "    osmx:hasmembers ([osmx:hasroleouter osmway:5] [osmx:hasrole osmnode:6]) ;"
        );
    }

    #[test]
    fn missing_id_fails() {
        let result = render_element(&Element::new(ElementKind::Node), None);
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn coordinates_use_two_digit_exponents() {
        assert_eq!(format_coordinate(1.0), "1.0");
        assert_eq!(format_coordinate(-0.1277583), "-0.1277583");
        assert_eq!(format_coordinate(0.0000001), "1e-07");
    }

    #[test]
    fn plain_literals_are_borrowed() {
        assert!(matches!(escape_literal("cafe"), Cow::Borrowed(_)));
        assert_eq!(escape_literal("a\\b\n"), "a\\\\b\\n");
    }
}
