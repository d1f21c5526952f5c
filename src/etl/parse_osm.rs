use std::fmt::Display;
use std::io::BufRead;
use std::str::FromStr;

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::data::osm::{Element, ElementKind, Member, OsmId, Tag};
use crate::errors::{Error, Result};

fn parse_number<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|err| Error::Parse(format!("invalid {name} {value:?}: {err}")))
}

fn attribute(el: &BytesStart, name: &str) -> Result<Option<String>> {
    match el.try_get_attribute(name)? {
        Some(attribute) => Ok(Some(attribute.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn required_attribute(el: &BytesStart, name: &str) -> Result<String> {
    attribute(el, name)?.ok_or_else(|| {
        Error::Parse(format!(
            "<{}> is missing attribute {name:?}",
            String::from_utf8_lossy(el.name().as_ref())
        ))
    })
}

fn parse_primitive(kind: ElementKind, el: &BytesStart) -> Result<Element> {
    let mut element = Element::new(kind);

    for attribute_res in el.attributes() {
        let attribute = attribute_res?;
        let value = attribute.unescape_value()?;
        match attribute.key.as_ref() {
            b"id" => element.id = Some(parse_number("id", &value)?),
            b"changeset" => element.changeset = Some(parse_number("changeset", &value)?),
            b"uid" => element.userid = Some(parse_number("uid", &value)?),
            b"lat" => element.lat = Some(parse_number("lat", &value)?),
            b"lon" => element.lon = Some(parse_number("lon", &value)?),
            b"version" => element.version = Some(value.into_owned()),
            b"timestamp" => element.timestamp = Some(value.into_owned()),
            b"user" => element.user = Some(value.into_owned()),
            b"visible" => (),
            other => {
                let name = String::from_utf8_lossy(other);
                debug!(kind = kind.as_str(), attribute = &*name; "Ignoring unexpected attribute");
            }
        }
    }

    Ok(element)
}

fn parse_tag(el: &BytesStart) -> Result<Tag> {
    Ok((required_attribute(el, "k")?, required_attribute(el, "v")?))
}

fn parse_node_ref(el: &BytesStart) -> Result<OsmId> {
    parse_number("ref", &required_attribute(el, "ref")?)
}

fn parse_member(el: &BytesStart) -> Result<Member> {
    Ok(Member {
        kind: required_attribute(el, "type")?.parse()?,
        id: parse_number("ref", &required_attribute(el, "ref")?)?,
        role: attribute(el, "role")?,
    })
}

/// Collects the children of the primitive currently open in the document.
/// The pending element is moved out whole when its end tag is seen, so
/// nothing of it outlives the boundary.
#[derive(Default)]
struct ElementAssembler {
    current: Option<Element>,
}

impl ElementAssembler {
    fn open(&mut self, el: &BytesStart, empty: bool) -> Result<Option<Element>> {
        if let Some(kind) = ElementKind::from_tag_name(el.name().as_ref()) {
            if let Some(current) = &self.current {
                return Err(Error::Parse(format!("<{kind}> nested inside <{}>", current.kind)));
            }
            let element = parse_primitive(kind, el)?;
            if empty {
                return Ok(Some(element));
            }
            self.current = Some(element);
            return Ok(None);
        }

        // `osm`, `bounds` and anything else outside a primitive.
        let Some(current) = self.current.as_mut() else {
            return Ok(None);
        };
        match el.name().as_ref() {
            b"tag" | b"tagi" => current.tags.push(parse_tag(el)?),
            b"nd" => current.node_refs.push(parse_node_ref(el)?),
            b"member" => current.members.push(parse_member(el)?),
            other => {
                let name = String::from_utf8_lossy(other);
                debug!(child = &*name; "Ignoring unexpected child element");
            }
        }
        Ok(None)
    }

    fn close(&mut self, name: &[u8]) -> Option<Element> {
        let kind = ElementKind::from_tag_name(name)?;
        match &self.current {
            Some(current) if current.kind == kind => self.current.take(),
            _ => None,
        }
    }
}

/// Lazily yields every node, way and relation of an OSM XML document.
///
/// Only the element being assembled is held in memory; the event buffer is
/// cleared after each XML event. The stream ends after the first error.
pub struct ElementStream<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    assembler: ElementAssembler,
    finished: bool,
}

impl<'a> ElementStream<&'a [u8]> {
    pub fn from_xml(xml: &'a str) -> Self {
        ElementStream::new(xml.as_bytes())
    }
}

impl<R: BufRead> ElementStream<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.trim_text(true);
        ElementStream {
            reader,
            buf: Vec::new(),
            assembler: ElementAssembler::default(),
            finished: false,
        }
    }

    fn next_element(&mut self) -> Result<Option<Element>> {
        loop {
            let element = match self.reader.read_event_into(&mut self.buf)? {
                Event::Eof => {
                    if let Some(current) = &self.assembler.current {
                        let message = format!("document ended inside <{}>", current.kind);
                        return Err(Error::Parse(message));
                    }
                    return Ok(None);
                }
                Event::Start(e) => self.assembler.open(&e, false)?,
                Event::Empty(e) => self.assembler.open(&e, true)?,
                Event::End(e) => self.assembler.close(e.name().as_ref()),
                _ => None,
            };
            // if we don't keep a borrow elsewhere, we can clear the buffer to keep memory usage low
            self.buf.clear();
            if element.is_some() {
                return Ok(element);
            }
        }
    }
}

impl<R: BufRead> Iterator for ElementStream<R> {
    type Item = Result<Element>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_element() {
            Ok(Some(element)) => Some(Ok(element)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

/// Returns the first primitive of a single-resource API response.
pub fn parse_single(xml: &str) -> Result<Option<Element>> {
    ElementStream::from_xml(xml).next().transpose()
}
