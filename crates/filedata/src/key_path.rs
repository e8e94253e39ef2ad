//! Key paths and traversal of config trees
//!
//! A [`KeyPath`] addresses a nested location in a [`Table`]: names select
//! table entries, indices select array elements.
//!
//! # Path Syntax
//!
//! - Dot-separated keys: `server.database.host`
//! - Array indexing: `servers[0].host`
//!
//! Keys that contain `.` or `[` are built with [`KeyPath::key`] instead.
//!
//! ```
//! use filedata::key_path::{Key, KeyPath};
//!
//! let path = KeyPath::from("servers[0].host");
//! assert_eq!(path, KeyPath::root().key("servers").index(0).key("host"));
//! assert_eq!(path.to_string(), "servers[0].host");
//! assert_eq!(path.last(), Some(&Key::Name("host".to_string())));
//! ```

use std::fmt;

use crate::error::{Error, Result};
use crate::value::{Table, Value};

/// A segment of a key path - either a table key or an array index
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A key in a table (e.g., "database" in "server.database")
    Name(String),
    /// An index in an array (e.g., 0 in `servers[0]`)
    Index(usize),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{name}"),
            Key::Index(index) => write!(f, "[{index}]"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

/// An ordered sequence of keys from the root of a config tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath {
    keys: Vec<Key>,
}

impl KeyPath {
    /// The empty path, addressing the root table.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse dotted/indexed syntax: `a.b[0].c`.
    ///
    /// Bracketed text that is not a number is kept as a name key.
    pub fn parse(path: &str) -> Self {
        let mut keys = Vec::new();
        let mut current_key = String::new();
        let mut chars = path.chars();

        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    if !current_key.is_empty() {
                        keys.push(Key::Name(std::mem::take(&mut current_key)));
                    }
                }
                '[' => {
                    if !current_key.is_empty() {
                        keys.push(Key::Name(std::mem::take(&mut current_key)));
                    }
                    let mut index_str = String::new();
                    for ch in chars.by_ref() {
                        if ch == ']' {
                            break;
                        }
                        index_str.push(ch);
                    }
                    match index_str.parse::<usize>() {
                        Ok(index) => keys.push(Key::Index(index)),
                        Err(_) => keys.push(Key::Name(index_str)),
                    }
                }
                _ => current_key.push(ch),
            }
        }

        if !current_key.is_empty() {
            keys.push(Key::Name(current_key));
        }

        Self { keys }
    }

    /// Append a name key.
    pub fn key(mut self, name: impl Into<String>) -> Self {
        self.keys.push(Key::Name(name.into()));
        self
    }

    /// Append an index key.
    pub fn index(mut self, index: usize) -> Self {
        self.keys.push(Key::Index(index));
        self
    }

    /// A new path with `key` appended.
    pub fn child(&self, key: Key) -> Self {
        let mut keys = self.keys.clone();
        keys.push(key);
        Self { keys }
    }

    /// The first `len` keys of this path.
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            keys: self.keys[..len.min(self.keys.len())].to_vec(),
        }
    }

    /// The path without its last key; `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, parents) = self.keys.split_last()?;
        Some(Self {
            keys: parents.to_vec(),
        })
    }

    pub fn last(&self) -> Option<&Key> {
        self.keys.last()
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Key> {
        self.keys.iter()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 && matches!(key, Key::Name(_)) {
                write!(f, ".")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for KeyPath {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

impl From<&KeyPath> for KeyPath {
    fn from(path: &KeyPath) -> Self {
        path.clone()
    }
}

impl From<Key> for KeyPath {
    fn from(key: Key) -> Self {
        Self { keys: vec![key] }
    }
}

impl From<Vec<Key>> for KeyPath {
    fn from(keys: Vec<Key>) -> Self {
        Self { keys }
    }
}

impl FromIterator<Key> for KeyPath {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a KeyPath {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

/// Get the value at `path`. The empty path is rejected: the root is a
/// table, not a value.
pub fn get_at_path<'a>(root: &'a Table, path: &KeyPath) -> Result<&'a Value> {
    let (first, rest) = path.keys().split_first().ok_or(Error::EmptyKeyPath)?;
    let mut current = table_entry(root, first, &KeyPath::root())?;
    for (depth, key) in rest.iter().enumerate() {
        current = child(current, key, &path.prefix(depth + 1))?;
    }
    Ok(current)
}

/// Mutable counterpart of [`get_at_path`].
pub fn get_at_path_mut<'a>(root: &'a mut Table, path: &KeyPath) -> Result<&'a mut Value> {
    let (first, rest) = path.keys().split_first().ok_or(Error::EmptyKeyPath)?;
    let mut current = table_entry_mut(root, first, &KeyPath::root())?;
    for (depth, key) in rest.iter().enumerate() {
        current = child_mut(current, key, &path.prefix(depth + 1))?;
    }
    Ok(current)
}

/// Assign `value` at `path`. The parent must exist; array slots must
/// already exist.
pub fn set_at_path(root: &mut Table, path: &KeyPath, value: Value) -> Result<()> {
    let (parent, last) = parent_of(root, path)?;
    match (parent, last) {
        (Parent::Table(table), Key::Name(name)) => {
            table.insert(name.clone(), value);
            Ok(())
        }
        (Parent::Array(items), Key::Index(index)) => {
            let len = items.len();
            let slot = items
                .get_mut(*index)
                .ok_or(Error::IndexOutOfRange { index: *index, len })?;
            *slot = value;
            Ok(())
        }
        (parent, key) => Err(key_type_error(path, key, parent.describe())),
    }
}

/// Remove and return the value at `path`.
pub fn remove_at_path(root: &mut Table, path: &KeyPath) -> Result<Value> {
    let (parent, last) = parent_of(root, path)?;
    match (parent, last) {
        (Parent::Table(table), Key::Name(name)) => {
            table.remove(name).ok_or_else(|| Error::KeyNotFound { path: path.clone() })
        }
        (Parent::Array(items), Key::Index(index)) => {
            if *index < items.len() {
                Ok(items.remove(*index))
            } else {
                Err(Error::IndexOutOfRange {
                    index: *index,
                    len: items.len(),
                })
            }
        }
        (parent, key) => Err(key_type_error(path, key, parent.describe())),
    }
}

/// The container that holds the last key of a path.
enum Parent<'a> {
    Table(&'a mut Table),
    Array(&'a mut Vec<Value>),
}

impl Parent<'_> {
    fn describe(&self) -> &'static str {
        match self {
            Parent::Table(_) => "a table",
            Parent::Array(_) => "an array",
        }
    }
}

fn parent_of<'a, 'p>(root: &'a mut Table, path: &'p KeyPath) -> Result<(Parent<'a>, &'p Key)> {
    let (last, parents) = path.keys().split_last().ok_or(Error::EmptyKeyPath)?;
    if parents.is_empty() {
        return Ok((Parent::Table(root), last));
    }
    let parent_path = path.prefix(parents.len());
    match get_at_path_mut(root, &parent_path)? {
        Value::Table(table) => Ok((Parent::Table(table), last)),
        Value::Array(items) => Ok((Parent::Array(items), last)),
        other => Err(Error::NotAContainer {
            path: parent_path,
            found: other.type_name().to_string(),
        }),
    }
}

fn key_type_error(path: &KeyPath, key: &Key, container: &'static str) -> Error {
    Error::KeyType {
        path: path.parent().unwrap_or_default(),
        key: key.to_string(),
        container,
    }
}

fn table_entry<'a>(table: &'a Table, key: &Key, at: &KeyPath) -> Result<&'a Value> {
    match key {
        Key::Name(name) => table.get(name).ok_or_else(|| Error::KeyNotFound {
            path: at.child(key.clone()),
        }),
        Key::Index(_) => Err(Error::KeyType {
            path: at.clone(),
            key: key.to_string(),
            container: "a table",
        }),
    }
}

fn table_entry_mut<'a>(table: &'a mut Table, key: &Key, at: &KeyPath) -> Result<&'a mut Value> {
    match key {
        Key::Name(name) => table.get_mut(name).ok_or_else(|| Error::KeyNotFound {
            path: at.child(key.clone()),
        }),
        Key::Index(_) => Err(Error::KeyType {
            path: at.clone(),
            key: key.to_string(),
            container: "a table",
        }),
    }
}

fn child<'a>(value: &'a Value, key: &Key, at: &KeyPath) -> Result<&'a Value> {
    match (value, key) {
        (Value::Table(table), _) => table_entry(table, key, at),
        (Value::Array(items), Key::Index(index)) => {
            items.get(*index).ok_or_else(|| Error::KeyNotFound {
                path: at.child(key.clone()),
            })
        }
        (Value::Array(_), Key::Name(_)) => Err(Error::KeyType {
            path: at.clone(),
            key: key.to_string(),
            container: "an array",
        }),
        (other, _) => Err(Error::NotAContainer {
            path: at.clone(),
            found: other.type_name().to_string(),
        }),
    }
}

fn child_mut<'a>(value: &'a mut Value, key: &Key, at: &KeyPath) -> Result<&'a mut Value> {
    match (value, key) {
        (Value::Table(table), _) => table_entry_mut(table, key, at),
        (Value::Array(items), Key::Index(index)) => {
            items.get_mut(*index).ok_or_else(|| Error::KeyNotFound {
                path: at.child(key.clone()),
            })
        }
        (Value::Array(_), Key::Name(_)) => Err(Error::KeyType {
            path: at.clone(),
            key: key.to_string(),
            container: "an array",
        }),
        (other, _) => Err(Error::NotAContainer {
            path: at.clone(),
            found: other.type_name().to_string(),
        }),
    }
}
