pub mod filter;
pub mod retag;

use log::debug;

use crate::data::osm::Element;
use crate::errors::{Error, Result};
use crate::etl::parse_osm::parse_single;
use crate::rdf::{render_element, TagValueCaster, TurtleWriter};

pub use self::filter::ElementFilter;
pub use self::retag::{KeyMatch, Operation, RetagRule, Retagger};

/// Per-run pipeline for one element: retag, filter, render.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    retagger: Retagger,
    filter: ElementFilter,
    caster: Option<TagValueCaster>,
    source_comment: bool,
}

impl Converter {
    pub fn new(retagger: Retagger, filter: ElementFilter, caster: Option<TagValueCaster>) -> Self {
        Converter {
            retagger,
            filter,
            caster,
            source_comment: false,
        }
    }

    /// Echo the source XML as comments after single-element documents.
    pub fn with_source_comment(mut self, source_comment: bool) -> Self {
        self.source_comment = source_comment;
        self
    }

    /// Renders `element`, or returns `None` when its kind is filtered out.
    pub fn convert(&self, element: Element) -> Result<Option<Vec<String>>> {
        let tags = self.retagger.retag(element.kind, element.tags);
        let element = Element { tags, ..element };
        if !self.filter.can_emit(element.kind) {
            debug!(kind = element.kind.as_str(); "Skipping filtered element");
            return Ok(None);
        }
        render_element(&element, self.caster.as_ref()).map(Some)
    }

    /// Converts a single-resource response (`<osm><node .../></osm>`) into a
    /// complete Turtle document.
    pub fn convert_single_xml(&self, xml: &str) -> Result<String> {
        let element = parse_single(xml)?
            .ok_or_else(|| Error::Parse("document contains no node, way or relation".to_string()))?;

        let mut writer = TurtleWriter::new(Vec::new());
        writer.write_prefixes()?;
        if let Some(lines) = self.convert(element)? {
            writer.write_block(&lines)?;
        }
        if self.source_comment {
            writer.write_comment(xml)?;
        }
        let bytes = writer.into_inner()?;
        String::from_utf8(bytes).map_err(|err| Error::Render(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::osm::ElementKind;

    fn cafe() -> Element {
        let mut node = Element::new(ElementKind::Node);
        node.id = Some(1);
        node.tags = vec![
            ("amenity".to_string(), "cafe".to_string()),
            ("created_by".to_string(), "JOSM".to_string()),
        ];
        node
    }

    #[test]
    fn retags_before_rendering() {
        let converter = Converter::new(
            Retagger::parse("-\t*\t*\tcreated_by=").unwrap(),
            ElementFilter::new(),
            None,
        );
        let lines = converter.convert(cafe()).unwrap().unwrap();
        assert!(lines.contains(&"    osmt:amenity \"cafe\" ;".to_string()));
        assert!(lines.iter().all(|line| !line.contains("created_by")));
    }

    #[test]
    fn filtered_kinds_produce_nothing() {
        let converter = Converter::new(
            Retagger::default(),
            ElementFilter::new().with_denied([ElementKind::Node]),
            None,
        );
        assert_eq!(converter.convert(cafe()).unwrap(), None);
    }

    #[test]
    fn single_document_without_elements_fails() {
        let result = Converter::default().convert_single_xml("<osm version=\"0.6\"></osm>");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn source_comment_is_appended() {
        let xml = "<osm>\n<node id=\"3\"/>\n</osm>";
        let text = Converter::default()
            .with_source_comment(true)
            .convert_single_xml(xml)
            .unwrap();
        assert!(text.ends_with("# <osm>\n# <node id=\"3\"/>\n# </osm>\n"));
    }
}
