use super::LINE_ENDING;
use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A flat `key=value` settings file.
///
/// Pairs keep the order they were read (or first set) in. Lookups never fail:
/// a missing key reads as the empty string, which is what every loader in
/// this crate relies on for optional settings.
#[derive(Debug, Clone)]
pub struct ConfFile {
  path: PathBuf,
  entries: Vec<(String, Option<String>)>,
}

impl ConfFile {
  pub fn open(path: &Path) -> Result<Self, ConfigError> {
    if !path.is_file() {
      return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    debug!(path = %path.display(), "reading conf file");
    let content = fs::read_to_string(path)?;
    Self::parse(path, &content)
  }

  /// Parses `content` as if it had been read from `path`.
  pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
    let mut entries: Vec<(String, Option<String>)> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
      let Some((key, value)) = parse_line(raw) else {
        if !raw.trim().is_empty() {
          debug!(path = %path.display(), line = idx + 1, "skipping line without assignment");
        }
        continue;
      };
      if entries.iter().any(|(k, _)| k == key) {
        return Err(ConfigError::DuplicateKey {
          key: key.to_string(),
          path: path.to_path_buf(),
        });
      }
      entries.push((key.to_string(), Some(value.to_string())));
    }

    Ok(Self {
      path: path.to_path_buf(),
      entries,
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn get(&self, key: &str) -> &str {
    self
      .entries
      .iter()
      .find(|(k, _)| k == key)
      .and_then(|(_, v)| v.as_deref())
      .unwrap_or("")
  }

  pub fn contains(&self, key: &str) -> bool {
    self.entries.iter().any(|(k, _)| k == key)
  }

  /// Adds or replaces `key`. A `None` value is written back as a bare key.
  pub fn set(&mut self, key: &str, value: Option<String>) {
    match self.entries.iter_mut().find(|(k, _)| k == key) {
      Some(entry) => entry.1 = value,
      None => self.entries.push((key.to_string(), value)),
    }
  }

  pub fn delete(&mut self, key: &str) {
    self.entries.retain(|(k, _)| k != key);
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(k, _)| k.as_str())
  }

  pub fn render(&self) -> String {
    let mut out = String::new();
    for (key, value) in &self.entries {
      out.push_str(key);
      if let Some(value) = value {
        out.push('=');
        out.push_str(value);
      }
      out.push_str(LINE_ENDING);
    }
    out.push_str(LINE_ENDING);
    out
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    self.save_as(&self.path)
  }

  pub fn save_as(&self, path: &Path) -> Result<(), ConfigError> {
    debug!(path = %path.display(), keys = self.entries.len(), "writing conf file");
    fs::write(path, self.render())?;
    Ok(())
  }
}

/// Splits one raw line into a trimmed key and value.
///
/// A `#` past the first column starts a trailing comment. Lines without `=`
/// yield `None`.
fn parse_line(raw: &str) -> Option<(&str, &str)> {
  let mut line = raw.trim();
  if line.is_empty() {
    return None;
  }
  if let Some(idx) = line.find('#') {
    if idx > 0 {
      line = &line[..idx];
    }
  }
  let (key, value) = line.split_once('=')?;
  Some((key.trim(), value.trim()))
}
