//! Wire codec between [`ParamSet`] and the gateway's flat XML documents
//!
//! Documents have a single `<xml>` root and one child element per field:
//!
//! ```text
//! <xml><appid><![CDATA[wx2421b1c4370ec43b]]></appid><mch_id><![CDATA[10000100]]></mch_id></xml>
//! ```

use crate::domain::ParamSet;
use crate::shared::error::DecodeError;
use bytes::Bytes;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Root element of every request and response body.
pub const ROOT_ELEMENT: &str = "xml";

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";
// Closes the current section after "]]" and reopens one starting with ">".
const CDATA_SPLIT: &str = "]]]]><![CDATA[>";

/// Whether `key` can be written as a child element name.
///
/// Letters, digits, `_`, `-` and `.`, starting with a letter or `_`. Namespace
/// prefixes are not allowed since the gateway never uses them.
pub fn is_element_name(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Serialize `params` in key order, every value wrapped in CDATA.
///
/// Keys are written verbatim and must satisfy [`is_element_name`].
pub fn encode(params: &ParamSet) -> Bytes {
    let capacity = params
        .iter()
        .map(|(k, v)| 2 * k.len() + v.len() + 17)
        .sum::<usize>()
        + 11;
    let mut out = String::with_capacity(capacity);

    out.push('<');
    out.push_str(ROOT_ELEMENT);
    out.push('>');
    for (key, value) in params.iter() {
        out.push('<');
        out.push_str(key);
        out.push('>');
        out.push_str(CDATA_OPEN);
        out.push_str(&value.replace(CDATA_CLOSE, CDATA_SPLIT));
        out.push_str(CDATA_CLOSE);
        out.push_str("</");
        out.push_str(key);
        out.push('>');
    }
    out.push_str("</");
    out.push_str(ROOT_ELEMENT);
    out.push('>');

    Bytes::from(out)
}

/// Parse a flat XML document into a [`ParamSet`].
///
/// Character data is collected per element and trimmed; elements whose
/// trimmed text is empty are treated as absent. A repeated element overwrites
/// the earlier value.
pub fn decode(body: &[u8]) -> Result<ParamSet, DecodeError> {
    let mut reader = Reader::from_reader(body);
    let mut params = ParamSet::new();
    let mut pending: Option<String> = None;
    let mut text = String::new();

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|e| DecodeError::new(reader.error_position() as u64, e.to_string()))?;

        match event {
            Event::Start(start) => {
                let local = start.local_name();
                let name = utf8(local.as_ref(), position)?;
                pending = Some(name.to_owned());
                text.clear();
            }
            Event::Text(chars) => {
                let unescaped = chars
                    .unescape()
                    .map_err(|e| DecodeError::new(position, e.to_string()))?;
                text.push_str(&unescaped);
            }
            Event::CData(cdata) => {
                text.push_str(utf8(&cdata, position)?);
            }
            Event::End(end) => {
                if let Some(key) = pending.take() {
                    let value = text.trim();
                    if key.as_bytes() == end.local_name().as_ref() && !value.is_empty() {
                        params.insert(key, value);
                    }
                }
                text.clear();
            }
            Event::Empty(_) => {
                pending = None;
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(params)
}

fn utf8(bytes: &[u8], position: u64) -> Result<&str, DecodeError> {
    std::str::from_utf8(bytes).map_err(|e| DecodeError::new(position, e.to_string()))
}
