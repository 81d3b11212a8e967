use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::{OcrXmlError, xml_error};

/// Text of an ALTO file: the `CONTENT` of every `String` element.
pub fn extract_text_from_alto(path: &Path) -> Result<String, OcrXmlError> {
    let file = File::open(path)?;
    read_alto(BufReader::new(file))
}

/// Same as [`extract_text_from_alto`] for an in-memory document.
pub fn alto_text(xml: &str) -> Result<String, OcrXmlError> {
    read_alto(xml.as_bytes())
}

/// Element names are compared without their namespace prefix, so any ALTO
/// version (v2, v3, v4, or none declared) is accepted.
fn read_alto<R: BufRead>(reader: R) -> Result<String, OcrXmlError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(false);

    let mut buf = Vec::with_capacity(4096);
    let mut words: Vec<String> = Vec::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"String" {
                    words.push(content_attr(e).map_err(|err| xml_error(err, xml.buffer_position()))?);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(e, xml.buffer_position())),
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!(words = words.len(), "extracted alto text");
    Ok(words.join(" "))
}

/// `CONTENT` attribute value, or an empty word when it is missing.
fn content_attr(e: &BytesStart<'_>) -> Result<String, quick_xml::Error> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == b"CONTENT" {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Ok(String::new())
}
