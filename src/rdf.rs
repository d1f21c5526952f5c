//! Turtle output: the fixed vocabulary, key/value encoding and the
//! serializers for single elements and whole documents.

pub mod document;
pub mod element;
pub mod tag_cast;
pub mod tag_key;
pub mod vocab;

pub use self::document::TurtleWriter;
pub use self::element::render_element;
pub use self::tag_cast::TagValueCaster;
pub use self::tag_key::encode_tag_key;
