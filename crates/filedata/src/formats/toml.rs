//! Hierarchical config format backed by TOML

use filedata_fs::{NormalizedPath, io};

use crate::data::FileData;
use crate::error::{Error, Result};
use crate::format::{FileFormat, TextRoundTrip};
use crate::key_path::{Key, KeyPath, get_at_path, get_at_path_mut, remove_at_path, set_at_path};
use crate::value::{Shape, Structured, Table, Value, normalize, normalize_table};

/// TOML config files (`.toml`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Toml;

/// A config tree persisted as TOML.
pub type TomlData = FileData<Toml>;

impl FileFormat for Toml {
    const NAME: &'static str = "toml";
    const EXT: &'static str = ".toml";

    type Data = Table;
    type Options = ();

    fn default_data() -> Self::Data {
        Table::new()
    }

    fn load_raw(path: &NormalizedPath, _options: &()) -> Result<Self::Data> {
        let content = io::read_text(path)?;
        let table: toml::Table = toml::from_str(&content)?;
        normalize_table(&table)
    }

    fn save_raw(data: &Self::Data, path: &NormalizedPath, _options: &()) -> Result<()> {
        let mut content = toml::to_string_pretty(data)?;
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        io::write_text(path, &content)?;
        Ok(())
    }

    fn normalize(data: Self::Data) -> Result<Self::Data> {
        normalize_table(&data)
    }
}

impl TextRoundTrip for Toml {}

impl FileData<Toml> {
    /// Build a config tree from any structured mapping.
    pub fn from_value(value: &(impl Structured + ?Sized)) -> Result<Self> {
        Ok(Self::from_normalized(normalize_table(&value)?))
    }

    /// A copy of the value at `path`. The empty path yields the whole tree.
    pub fn get(&self, path: impl Into<KeyPath>) -> Result<Value> {
        let path = path.into();
        if path.is_empty() {
            return Ok(Value::Table(self.data()));
        }
        get_at_path(self.data_ref(), &path).cloned()
    }

    /// Like [`get`](Self::get), but yields `default` when the path is
    /// missing. Other errors are still reported.
    pub fn get_or(&self, path: impl Into<KeyPath>, default: impl Into<Value>) -> Result<Value> {
        match self.get(path) {
            Err(Error::KeyNotFound { .. }) => Ok(default.into()),
            other => other,
        }
    }

    pub fn contains(&self, path: impl Into<KeyPath>) -> bool {
        self.get(path).is_ok()
    }

    /// Normalize `value` and store it at `path`.
    pub fn set(&mut self, path: impl Into<KeyPath>, value: &(impl Structured + ?Sized)) -> Result<()> {
        let path = path.into();
        let value = normalize(&value)?;
        tracing::trace!(%path, "Setting config value");
        set_at_path(self.data_mut(), &path, value)
    }

    /// Remove the value at `path`, returning it.
    pub fn delete(&mut self, path: impl Into<KeyPath>) -> Result<Value> {
        let path = path.into();
        tracing::trace!(%path, "Deleting config value");
        remove_at_path(self.data_mut(), &path)
    }

    /// Normalize `value` and push it onto the array at `path`.
    pub fn append(&mut self, path: impl Into<KeyPath>, value: &(impl Structured + ?Sized)) -> Result<()> {
        let path = path.into();
        let value = normalize(&value)?;
        match get_at_path_mut(self.data_mut(), &path)? {
            Value::Array(items) => {
                items.push(value);
                Ok(())
            }
            other => Err(Error::NotAList {
                found: other.type_name().to_string(),
                path,
            }),
        }
    }

    /// Key-value pairs of the table at `path`, in key order.
    pub fn items(&self, path: impl Into<KeyPath>) -> Result<Vec<(String, Value)>> {
        match self.get(path)? {
            Value::Table(table) => Ok(table.into_iter().collect()),
            other => Err(Error::NotATable {
                found: other.type_name().to_string(),
            }),
        }
    }

    /// Every leaf value with the key path reaching it, depth first.
    ///
    /// Each call walks a fresh snapshot, so later mutation does not affect
    /// an iterator already handed out.
    pub fn entries(&self) -> Entries {
        let stack = self
            .data()
            .into_iter()
            .rev()
            .map(|(key, value)| (KeyPath::root().key(key), value))
            .collect();
        Entries { stack }
    }

    /// The disjoint union of two trees.
    ///
    /// Fails with [`Error::KeyConflict`] when a key path holds a value in
    /// both trees.
    pub fn merge(&self, other: &Self) -> Result<Self> {
        let mut merged = self.data();
        merge_tables(&mut merged, other.data_ref(), &KeyPath::root())?;
        tracing::debug!(
            left = self.data_ref().len(),
            right = other.data_ref().len(),
            "Merged config trees"
        );
        Ok(Self::from_normalized(merged))
    }
}

fn merge_tables(target: &mut Table, other: &Table, at: &KeyPath) -> Result<()> {
    for (key, incoming) in other {
        let path = at.child(Key::Name(key.clone()));
        match target.get_mut(key) {
            None => {
                target.insert(key.clone(), incoming.clone());
            }
            Some(existing) => merge_values(existing, incoming, &path)?,
        }
    }
    Ok(())
}

fn merge_values(existing: &mut Value, incoming: &Value, at: &KeyPath) -> Result<()> {
    match (existing, incoming) {
        (Value::Table(left), Value::Table(right)) => merge_tables(left, right, at),
        (Value::Array(left), Value::Array(right)) if left.is_empty() || right.is_empty() => {
            left.extend(right.iter().cloned());
            Ok(())
        }
        (Value::Array(_), Value::Array(_)) => Err(Error::KeyConflict {
            path: at.child(Key::Index(0)),
        }),
        _ => Err(Error::KeyConflict { path: at.clone() }),
    }
}

/// Depth-first iterator over the leaves of a config tree.
#[derive(Debug, Clone)]
pub struct Entries {
    stack: Vec<(KeyPath, Value)>,
}

impl Iterator for Entries {
    type Item = (KeyPath, Value);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, value)) = self.stack.pop() {
            match value {
                Value::Table(table) => {
                    let children = table
                        .into_iter()
                        .rev()
                        .map(|(key, child)| (path.child(Key::Name(key)), child));
                    self.stack.extend(children);
                }
                Value::Array(items) => {
                    let children = items
                        .into_iter()
                        .enumerate()
                        .rev()
                        .map(|(index, child)| (path.child(Key::Index(index)), child));
                    self.stack.extend(children);
                }
                leaf => return Some((path, leaf)),
            }
        }
        None
    }
}

impl Structured for FileData<Toml> {
    fn shape(&self) -> Shape<'_> {
        self.data_ref().shape()
    }
}
