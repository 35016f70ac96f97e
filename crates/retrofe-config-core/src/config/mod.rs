use crate::error::ConfigError;
use tracing::warn;

pub mod conf_file;
pub mod menu;
pub mod option_writer;
pub mod paths;

pub use conf_file::ConfFile;
pub use option_writer::OptionWriter;
pub use paths::RetroFePaths;

#[cfg(windows)]
pub(crate) const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub(crate) const LINE_ENDING: &str = "\n";

/// Tolerant boolean coercion shared by every flag in the settings files.
///
/// `stretch` counts as true because the `horizontal`/`vertical` keys hold
/// either that token or a pixel count.
pub fn to_bool(val: &str) -> bool {
  matches!(val.trim().to_lowercase().as_str(), "yes" | "true" | "stretch")
}

/// Parses a value that must be numeric.
pub fn parse_u32(key: &str, val: &str) -> Result<u32, ConfigError> {
  val.trim().parse::<u32>().map_err(|_| ConfigError::Format {
    key: key.to_string(),
    value: val.to_string(),
  })
}

/// Parses an optional number; empty or garbage reads as 0.
pub fn read_u32_or_zero(conf: &ConfFile, key: &str) -> u32 {
  let raw = conf.get(key);
  if raw.trim().is_empty() {
    return 0;
  }
  parse_u32(key, raw).unwrap_or_else(|_| {
    warn!(key, value = raw, path = %conf.path().display(), "not a number, using 0");
    0
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::Path;

  #[test]
  fn test_to_bool_truthy() {
    assert!(to_bool("YES"));
    assert!(to_bool(" true "));
    assert!(to_bool("stretch"));
    assert!(to_bool("Stretch"));
  }

  #[test]
  fn test_to_bool_falsy() {
    assert!(!to_bool("no"));
    assert!(!to_bool(""));
    assert!(!to_bool("1"));
    assert!(!to_bool("on"));
    assert!(!to_bool("1920"));
  }

  #[test]
  fn test_parse_u32() {
    assert_eq!(parse_u32("horizontal", " 1024 ").unwrap(), 1024);
    assert!(matches!(
      parse_u32("horizontal", "wide"),
      Err(ConfigError::Format { .. })
    ));
    assert!(parse_u32("vertical", "").is_err());
    assert!(parse_u32("vertical", "-1").is_err());
  }

  #[test]
  fn test_read_u32_or_zero() {
    let conf = ConfFile::parse(Path::new("Settings.conf"), "videoLoop=3\nattractModeTime=soon\n").unwrap();
    assert_eq!(read_u32_or_zero(&conf, "videoLoop"), 3);
    assert_eq!(read_u32_or_zero(&conf, "attractModeTime"), 0);
    assert_eq!(read_u32_or_zero(&conf, "missing"), 0);
  }
}
