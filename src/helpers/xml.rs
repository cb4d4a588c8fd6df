//! XML parsing utilities for the SpreadsheetML parts of an xlsx package.
//! Provides an XML reader wrapper and helper traits for attribute and text processing.

use crate::error::ConsolidatorError;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::BytesRef;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::borrow::Cow;
use std::io::BufRead;
use std::str::FromStr;
use thiserror::Error;

/// Errors specific to XML parsing operations
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("Parse entity '{0}' failed")]
    ParseEntityError(String),

    #[error("Parse attribute value '{0}' failed")]
    ParseAttributeValueError(String),
}

/// XML reader wrapper configured for worksheet parsing
pub(crate) struct XmlReader<R: BufRead> {
    reader: Reader<R>,
    buffer: Vec<u8>,
}

impl<R: BufRead> XmlReader<R> {
    pub(crate) fn new(buf_reader: R) -> XmlReader<R> {
        let mut reader = Reader::from_reader(buf_reader);
        let config = reader.config_mut();
        config.check_comments = false;
        config.check_end_names = false;
        // `<c r="A1"/>` is reported as Start + End so cell handling has one path
        config.expand_empty_elements = true;
        config.trim_text(false);

        let buffer = Vec::with_capacity(1024);
        XmlReader { reader, buffer }
    }

    /// Reads the next XML event, `None` at end of document
    pub(crate) fn next(&'_ mut self) -> Result<Option<Event<'_>>, ConsolidatorError> {
        self.buffer.clear();
        match self.reader.read_event_into(&mut self.buffer) {
            Ok(Event::Eof) => Ok(None),
            Ok(event) => Ok(Some(event)),
            Err(error) => Err(ConsolidatorError::XmlError(error)),
        }
    }
}

/// Helper trait for XML attributes providing convenient value extraction and parsing
pub(crate) trait XmlAttributeHelper<'a> {
    /// Gets the unescaped attribute value as a string
    fn get_value(&self) -> Result<Cow<'a, str>, ConsolidatorError>;

    /// Parses the attribute value to the specified type
    fn parse_value<T: FromStr>(&self) -> Result<T, ConsolidatorError>;
}

impl<'a> XmlAttributeHelper<'a> for Attribute<'a> {
    fn get_value(&self) -> Result<Cow<'a, str>, ConsolidatorError> {
        Ok(self.unescape_value()?)
    }

    fn parse_value<T: FromStr>(&self) -> Result<T, ConsolidatorError> {
        self.get_value()?
            .parse()
            .map_err(|_| match std::str::from_utf8(&self.value) {
                Ok(value) => ConsolidatorError::XmlHelperError(XmlError::ParseAttributeValueError(value.to_string())),
                Err(error) => ConsolidatorError::StringEncodingError(error),
            })
    }
}

/// Helper trait for XML nodes providing attribute access methods
pub(crate) trait XmlNodeHelper<'a> {
    /// Gets an attribute value by name
    fn get_attribute_value(&'a self, name: &str) -> Result<Option<Cow<'a, str>>, ConsolidatorError>;

    /// Parses an attribute value to the specified type
    fn parse_attribute_value<T: FromStr>(&self, name: &str) -> Result<Option<T>, ConsolidatorError>;
}

impl<'a> XmlNodeHelper<'a> for BytesStart<'a> {
    fn get_attribute_value(&'a self, name: &str) -> Result<Option<Cow<'a, str>>, ConsolidatorError> {
        self.try_get_attribute(name)?
            .map(|attribute| attribute.get_value())
            .transpose()
    }

    fn parse_attribute_value<T: FromStr>(&self, name: &str) -> Result<Option<T>, ConsolidatorError> {
        self.try_get_attribute(name)?
            .map(|attribute| attribute.parse_value())
            .transpose()
    }
}

/// Helper trait for building text content from XML events
pub(crate) trait XmlTextContextHelper {
    /// Appends text content from a BytesRef event (entities and character references)
    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), ConsolidatorError>;
}

impl XmlTextContextHelper for String {
    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), ConsolidatorError> {
        let raw = bytes.xml_content()?;
        if let Some(number) = raw.strip_prefix('#') {
            let code = if let Some(hex) = number.strip_prefix('x') {
                u32::from_str_radix(hex, 16)?
            } else {
                number.parse::<u32>()?
            };
            if let Some(character) = std::char::from_u32(code) {
                self.push(character);
            }
        } else if let Some(entity) = resolve_xml_entity(&raw) {
            self.push_str(entity);
        } else {
            Err(XmlError::ParseEntityError(raw.to_string()))?;
        }

        Ok(())
    }
}

#[macro_export]
macro_rules! match_xml_events {
    ($reader:expr => { $($arms:tt)* }) => {
        while let Some(result) = $reader.next()? {
            match result {
                Event::Eof => break,
                $($arms)*
                _ => (),
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_xml_events;
    use quick_xml::name::QName;

    fn count_cells(xml: &str) -> Result<(usize, usize), ConsolidatorError> {
        let mut reader = XmlReader::new(xml.as_bytes());
        let mut starts = 0usize;
        let mut ends = 0usize;
        match_xml_events!(reader => {
            Event::Start(event) if event.name() == QName(b"c") => starts += 1,
            Event::End(event) if event.name() == QName(b"c") => ends += 1,
        });
        Ok((starts, ends))
    }

    fn style_and_name(xml: &str) -> Result<(Option<usize>, Option<String>), ConsolidatorError> {
        let mut reader = XmlReader::new(xml.as_bytes());
        let mut style = None;
        let mut name = None;
        match_xml_events!(reader => {
            Event::Start(event) => {
                style = event.parse_attribute_value::<usize>("s")?;
                name = event.get_attribute_value("n")?.map(|value| value.to_string());
            }
        });
        Ok((style, name))
    }

    fn text_of(xml: &str) -> Result<String, ConsolidatorError> {
        let mut reader = XmlReader::new(xml.as_bytes());
        let mut text = String::new();
        match_xml_events!(reader => {
            Event::Text(event) => text.push_str(&event.xml_content()?),
            Event::GeneralRef(event) => text.push_bytes_ref(&event)?,
        });
        Ok(text)
    }

    #[test]
    fn empty_elements_are_expanded() {
        assert_eq!(count_cells(r#"<row><c r="B2"/></row>"#).unwrap(), (1, 1));
    }

    #[test]
    fn attribute_values_are_unescaped_and_parsed() {
        let (style, name) = style_and_name(r#"<c r="A1" s="3" n="Tom &amp; Jerry"/>"#).unwrap();
        assert_eq!(style, Some(3));
        assert_eq!(name.as_deref(), Some("Tom & Jerry"));
    }

    #[test]
    fn bad_attribute_value_is_reported() {
        let error = style_and_name(r#"<c s="x"/>"#).unwrap_err();
        assert_eq!(error.to_string(), "Parse attribute value 'x' failed");
    }

    #[test]
    fn references_are_resolved() {
        assert_eq!(text_of("<t>a&amp;b&#65;&#x42;</t>").unwrap(), "a&bAB");
    }
}
