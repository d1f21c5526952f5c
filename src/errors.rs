use std::{fmt, io, num::{ParseFloatError, ParseIntError}, str::Utf8Error};
use quick_xml::events::attributes::AttrError;

#[derive(Debug)]
pub enum Error {
    Io(String),
    /// Malformed XML or a field that does not parse into its OSM type.
    Parse(String),
    /// A retagging rule line could not be parsed. `line` is 1-based and
    /// `rules` holds the full configuration text it came from.
    RuleConfig {
        line: usize,
        message: String,
        rules: String,
    },
    Render(String),
    Config(String),
    NotFound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(message) => write!(formatter, "io error: {message}"),
            Error::Parse(message) => write!(formatter, "parse error: {message}"),
            Error::RuleConfig { line, message, rules } => write!(
                formatter,
                "invalid retag rule on line {line}: {message}\n\
                 --- start of rules ---\n{rules}\n--- end of rules ---"
            ),
            Error::Render(message) => write!(formatter, "render error: {message}"),
            Error::Config(message) => write!(formatter, "config error: {message}"),
            Error::NotFound(message) => write!(formatter, "not found: {message}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::Io(value.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(value: quick_xml::Error) -> Self {
        Error::Parse(value.to_string())
    }
}

impl From<ParseFloatError> for Error {
    fn from(value: ParseFloatError) -> Self {
        Error::Parse(value.to_string())
    }
}

impl From<ParseIntError> for Error {
    fn from(value: ParseIntError) -> Self {
        Error::Parse(value.to_string())
    }
}

impl From<AttrError> for Error {
    fn from(value: AttrError) -> Self {
        Error::Parse(value.to_string())
    }
}

impl From<Utf8Error> for Error {
    fn from(value: Utf8Error) -> Self {
        Error::Parse(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Config(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_parse_failures_become_parse_errors() {
        let err: Error = "12a".parse::<i64>().unwrap_err().into();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn rule_config_error_shows_line_and_rules() {
        let err = Error::RuleConfig {
            line: 2,
            message: "expected 4 tab separated fields, found 1".to_string(),
            rules: "+\t*\t*\ta=b\nbroken".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("line 2"));
        assert!(text.contains("broken"));
    }
}
