use super::LINE_ENDING;
use crate::error::ConfigError;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Converts a setting into the text form written to disk.
pub trait OptionValue {
  fn to_option_string(&self) -> String;
}

impl OptionValue for str {
  fn to_option_string(&self) -> String {
    self.to_string()
  }
}

impl OptionValue for String {
  fn to_option_string(&self) -> String {
    self.clone()
  }
}

impl OptionValue for bool {
  fn to_option_string(&self) -> String {
    if *self { "yes".to_string() } else { "no".to_string() }
  }
}

impl OptionValue for u32 {
  fn to_option_string(&self) -> String {
    self.to_string()
  }
}

/// Write-only builder for files that are regenerated from scratch.
///
/// Options are written as `key = value` in insertion order. Adding a key a
/// second time replaces the earlier value without moving it.
#[derive(Debug, Clone, Default)]
pub struct OptionWriter {
  options: Vec<(String, String)>,
}

impl OptionWriter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add<V: OptionValue + ?Sized>(&mut self, key: &str, value: &V) -> &mut Self {
    let value = value.to_option_string();
    match self.options.iter_mut().find(|(k, _)| k == key) {
      Some(entry) => entry.1 = value,
      None => self.options.push((key.to_string(), value)),
    }
    self
  }

  pub fn len(&self) -> usize {
    self.options.len()
  }

  pub fn is_empty(&self) -> bool {
    self.options.is_empty()
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self
      .options
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
  }

  pub fn render(&self) -> String {
    let mut out = String::new();
    for (key, value) in &self.options {
      out.push_str(key);
      out.push_str(" = ");
      out.push_str(value);
      out.push_str(LINE_ENDING);
    }
    out
  }

  pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
    debug!(path = %path.display(), options = self.options.len(), "regenerating conf file");
    fs::write(path, self.render())?;
    Ok(())
  }
}
