use crate::paths::{ConfigError, MedialibPaths};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use toml_edit::{DocumentMut, Item, Table};
use tracing::{debug, info};

/// A typed `[section]` of `medialib.toml`.
///
/// Sections are checked with [`ConfigSection::validate`] on every load and
/// before every save, so an invalid value never reaches the caller or the file.
pub trait ConfigSection: Serialize + DeserializeOwned + Default {
  const NAME: &'static str;

  fn validate(&self) -> Result<(), ConfigError> {
    Ok(())
  }
}

pub trait ConfigBackend {
  /// Reads the section, falling back to `S::default()` when the file or the section is absent.
  fn load<S: ConfigSection>(&self) -> Result<S, ConfigError>;

  fn save<S: ConfigSection>(&self, section: &S) -> Result<(), ConfigError>;

  /// Loads the section and writes it back, so the file lists every option.
  fn load_or_init<S: ConfigSection>(&self) -> Result<S, ConfigError> {
    let section = self.load::<S>()?;
    self.save(&section)?;
    Ok(section)
  }
}

/// [`ConfigBackend`] over the `medialib.toml` file of a [`MedialibPaths`].
pub struct TomlConfigBackend {
  paths: MedialibPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: MedialibPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &MedialibPaths {
    &self.paths
  }

  fn read(&self) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(self.paths.config_file()) {
      Ok(content) => Ok(Some(content)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }
}

impl ConfigBackend for TomlConfigBackend {
  fn load<S: ConfigSection>(&self) -> Result<S, ConfigError> {
    let Some(content) = self.read()? else {
      debug!(section = S::NAME, "no config file, using defaults");
      return Ok(S::default());
    };

    let table: toml::Table = toml::from_str(&content)?;
    let section: S = match table.get(S::NAME) {
      Some(value) => value
        .clone()
        .try_into()
        .map_err(|e| ConfigError::Invalid { section: S::NAME, reason: e.to_string() })?,
      None => {
        debug!(section = S::NAME, "section missing, using defaults");
        S::default()
      }
    };

    section.validate()?;
    Ok(section)
  }

  fn save<S: ConfigSection>(&self, section: &S) -> Result<(), ConfigError> {
    section.validate()?;

    let mut doc = match self.read()? {
      Some(content) => content.parse::<DocumentMut>().map_err(|e| ConfigError::Other(format!("parse config: {e}")))?,
      None => DocumentMut::new(),
    };

    let fresh = toml_edit::ser::to_document(section)
      .map_err(|e| ConfigError::Invalid { section: S::NAME, reason: e.to_string() })?
      .as_table()
      .clone();
    merge_section(&mut doc, S::NAME, fresh);

    let path = self.paths.config_file();
    persist(&path, &doc.to_string())?;
    info!(?path, section = S::NAME, "config section saved");
    Ok(())
  }
}

/// Overwrites the keys of `[name]` in place. Comments around the section and
/// on untouched keys survive; keys the section no longer has are dropped.
fn merge_section(doc: &mut DocumentMut, name: &str, fresh: Table) {
  match doc.get_mut(name).and_then(Item::as_table_mut) {
    Some(existing) => {
      let stale: Vec<String> =
        existing.iter().map(|(key, _)| key.to_string()).filter(|key| !fresh.contains_key(key)).collect();
      for key in stale {
        existing.remove(&key);
      }
      for (key, item) in fresh.iter() {
        existing[key] = item.clone();
      }
    }
    None => {
      doc.insert(name, Item::Table(fresh));
    }
  }
}

/// Writes through a temp file in the same directory, so readers see either
/// the old file or the new one.
fn persist(path: &Path, contents: &str) -> Result<(), ConfigError> {
  let dir = path.parent().ok_or_else(|| ConfigError::Other(format!("config path has no parent: {path:?}")))?;

  let mut tmp = NamedTempFile::new_in(dir)?;
  tmp.write_all(contents.as_bytes())?;
  tmp.as_file().sync_all()?;
  tmp.persist(path).map_err(|e| ConfigError::Io(e.error))?;
  Ok(())
}
