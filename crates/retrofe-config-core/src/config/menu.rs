//! Per-collection submenu list stored as `Menu.xml`.
//!
//! ```xml
//! <menu>
//!   <item collection="Arcade"/>
//!   <item collection="Consoles"/>
//! </menu>
//! ```

use crate::error::ConfigError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::path::Path;
use tracing::debug;

const ROOT_TAG: &str = "menu";
const ITEM_TAG: &[u8] = b"item";
const COLLECTION_ATTR: &str = "collection";

/// Reads the ordered collection names from a menu file.
///
/// A missing file is an empty menu, not an error.
pub fn read_menu(path: &Path) -> Result<Vec<String>, ConfigError> {
  if !path.is_file() {
    debug!(path = %path.display(), "no menu file");
    return Ok(vec![]);
  }
  let content = fs::read_to_string(path)?;
  parse_menu(&content)
}

/// Collects the `collection` attribute of every `item` element, in document order.
pub fn parse_menu(xml: &str) -> Result<Vec<String>, ConfigError> {
  let mut reader = Reader::from_str(xml);
  reader.trim_text(true);

  let mut items = Vec::new();
  let mut buf = Vec::new();

  loop {
    match reader.read_event_into(&mut buf) {
      Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) if e.name().as_ref() == ITEM_TAG => {
        if let Some(name) = collection_attr(e)? {
          items.push(name);
        }
      }
      Ok(Event::Eof) => break,
      Err(e) => {
        return Err(ConfigError::Xml(format!(
          "at byte {}: {}",
          reader.buffer_position(),
          e
        )));
      }
      _ => {}
    }
    buf.clear();
  }

  Ok(items)
}

fn collection_attr(e: &BytesStart) -> Result<Option<String>, ConfigError> {
  let attr = e
    .try_get_attribute(COLLECTION_ATTR)
    .map_err(|e| ConfigError::Xml(e.to_string()))?;
  match attr {
    Some(attr) => {
      let value = attr
        .unescape_value()
        .map_err(|e| ConfigError::Xml(e.to_string()))?;
      Ok(Some(value.into_owned()))
    }
    None => Ok(None),
  }
}

pub fn render_menu(items: &[String]) -> Result<String, ConfigError> {
  let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
  let xml_err = |e: quick_xml::Error| ConfigError::Xml(e.to_string());

  writer
    .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
    .map_err(xml_err)?;
  writer
    .write_event(Event::Start(BytesStart::new(ROOT_TAG)))
    .map_err(xml_err)?;
  for item in items {
    let mut elem = BytesStart::new("item");
    elem.push_attribute((COLLECTION_ATTR, item.as_str()));
    writer.write_event(Event::Empty(elem)).map_err(xml_err)?;
  }
  writer
    .write_event(Event::End(BytesEnd::new(ROOT_TAG)))
    .map_err(xml_err)?;

  String::from_utf8(writer.into_inner()).map_err(|e| ConfigError::Xml(e.to_string()))
}

pub fn write_menu(path: &Path, items: &[String]) -> Result<(), ConfigError> {
  let xml = render_menu(items)?;
  debug!(path = %path.display(), items = items.len(), "writing menu file");
  fs::write(path, xml)?;
  Ok(())
}
