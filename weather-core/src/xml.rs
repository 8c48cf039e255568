//! Attribute access on top of `quick_xml` start tags.

use std::str::FromStr;

use quick_xml::{
    Reader,
    events::{BytesCData, BytesStart, BytesText},
};

use crate::error::ParseError;

pub(crate) fn reader(data: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(data);
    reader.config_mut().trim_text(true);
    reader
}

pub(crate) fn text(text: &BytesText<'_>) -> Result<String, ParseError> {
    Ok(text.unescape()?.into_owned())
}

/// CDATA content is taken verbatim; the input is already UTF-8.
pub(crate) fn cdata(cdata: &BytesCData<'_>) -> String {
    String::from_utf8_lossy(cdata).trim().to_string()
}

/// Stack of elements opened but not yet closed.
///
/// The reader reports `Eof` even with elements still open, so a document cut
/// off mid-transfer is only caught here.
#[derive(Debug, Default)]
pub(crate) struct Nesting {
    open: Vec<String>,
}

impl Nesting {
    pub(crate) fn enter(&mut self, name: &[u8]) {
        self.open.push(String::from_utf8_lossy(name).into_owned());
    }

    pub(crate) fn leave(&mut self) {
        self.open.pop();
    }

    /// Fails with the innermost element still open at end of input.
    pub(crate) fn finish(self) -> Result<(), ParseError> {
        match self.open.last() {
            Some(name) => Err(ParseError::Unclosed(name.clone())),
            None => Ok(()),
        }
    }
}

/// A start (or empty) element whose attributes are read by name.
pub(crate) struct Tag<'a> {
    start: &'a BytesStart<'a>,
}

impl<'a> Tag<'a> {
    pub(crate) fn new(start: &'a BytesStart<'a>) -> Self {
        Self { start }
    }

    pub(crate) fn name(&self) -> String {
        String::from_utf8_lossy(self.start.name().as_ref()).into_owned()
    }

    pub(crate) fn attr(&self, attr: &'static str) -> Result<Option<String>, ParseError> {
        match self.start.try_get_attribute(attr)? {
            Some(value) => Ok(Some(value.unescape_value()?.into_owned())),
            None => Ok(None),
        }
    }

    pub(crate) fn required(&self, attr: &'static str) -> Result<String, ParseError> {
        self.attr(attr)?.ok_or_else(|| ParseError::MissingAttribute {
            tag: self.name(),
            attr,
        })
    }

    /// Required attribute converted with `FromStr`.
    pub(crate) fn parse<T: FromStr>(&self, attr: &'static str) -> Result<T, ParseError> {
        let value = self.required(attr)?;
        value
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidValue {
                tag: self.name(),
                attr,
                value,
            })
    }
}
