use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::{OcrXmlError, xml_error};

const WORD_CLASS: &str = "ocrx_word";

/// Text of an HOCR file: the content of every `ocrx_word` element.
pub fn extract_text_from_hocr(path: &Path) -> Result<String, OcrXmlError> {
    let file = File::open(path)?;
    read_hocr(BufReader::new(file))
}

/// Same as [`extract_text_from_hocr`] for an in-memory document.
pub fn hocr_text(xml: &str) -> Result<String, OcrXmlError> {
    read_hocr(xml.as_bytes())
}

/// Text nested inside a word (e.g. `<strong>` from font detection) is part
/// of that word. Empty words are dropped.
fn read_hocr<R: BufRead>(reader: R) -> Result<String, OcrXmlError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(false);

    let mut buf = Vec::with_capacity(4096);
    let mut words: Vec<String> = Vec::new();
    let mut word = String::new();
    // Element depth inside the current word; 0 when outside any word.
    let mut depth = 0usize;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if depth > 0 {
                    depth += 1;
                } else if is_word(e).map_err(|err| xml_error(err, xml.buffer_position()))? {
                    depth = 1;
                    word.clear();
                }
            }
            Ok(Event::Text(ref e)) => {
                if depth > 0 {
                    let text = e
                        .unescape()
                        .map_err(|err| xml_error(err, xml.buffer_position()))?;
                    word.push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if depth > 0 {
                    word.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::End(_)) => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        let text = word.trim();
                        if !text.is_empty() {
                            words.push(text.to_string());
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(e, xml.buffer_position())),
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!(words = words.len(), "extracted hocr text");
    Ok(words.join(" "))
}

fn is_word(e: &BytesStart<'_>) -> Result<bool, quick_xml::Error> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"class" {
            let value = attr.unescape_value()?;
            return Ok(value.split_whitespace().any(|class| class == WORD_CLASS));
        }
    }
    Ok(false)
}
