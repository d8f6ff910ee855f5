//! Configuration sections and dotted-path lookup
//!
//! A [`Section`] owns one [`FastHash`] of named [`Value`]s. Nested sections are
//! themselves values, so a parsed configuration is a tree rooted at a single
//! section with strictly tree-shaped ownership.
//!
//! # Path resolution
//!
//! [`Section::resolve`] splits a dotted path at the first `.`, looks the left
//! segment up in the current table and recurses into the named subsection
//! with the rest of the path. A missing segment and an intermediate segment
//! that is not a section both resolve to `None`.
//!
//! The typed getters (`get_bool`, `get_int`, ...) additionally require the
//! resolved value to be of the requested kind and return `None` otherwise, so
//! "wrong type" and "not present" look the same through them. Use
//! [`Section::get_value`] to tell the two apart.

use super::hash::{CleanupStats, Collision, Destructor, Entry, FastHash, TableOptions};
use super::value::Value;
use crate::constants::SECTION_TABLE_CAPACITY;

#[derive(Debug)]
pub struct Section {
    table: FastHash<Value>,
}

fn release_value(value: Value) {
    tracing::trace!(kind = %value.kind(), "released option");
}

impl Section {
    pub fn new() -> Self {
        Section {
            table: FastHash::with_buckets(
                SECTION_TABLE_CAPACITY,
                TableOptions::default(),
                Some(release_value as Destructor<Value>),
            ),
        }
    }

    /// Add `value` under `name`. A later insert under the same name shadows
    /// the earlier one.
    pub fn insert(&mut self, name: &str, value: Value) -> Result<usize, Collision<Value>> {
        self.table.insert(name.as_bytes(), value)
    }

    /// Look up a single name in this section, without path splitting
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.table.lookup(name.as_bytes()).map(Entry::data)
    }

    /// Resolve a dotted path such as `"server.tls.port"`
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        match path.split_once('.') {
            None => self.get(path),
            Some((head, rest)) => match self.get(head)? {
                Value::Section(child) => child.resolve(rest),
                _ => None,
            },
        }
    }

    /// The value at `path`, whatever its kind
    pub fn get_value(&self, path: &str) -> Option<&Value> {
        self.resolve(path)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.resolve(path).and_then(Value::as_bool)
    }

    pub fn get_int(&self, path: &str) -> Option<i64> {
        self.resolve(path).and_then(Value::as_int)
    }

    pub fn get_float(&self, path: &str) -> Option<f64> {
        self.resolve(path).and_then(Value::as_float)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.resolve(path).and_then(Value::as_str)
    }

    pub fn get_section(&self, path: &str) -> Option<&Section> {
        self.resolve(path).and_then(Value::as_section)
    }

    /// Visible options, one per name (the most recent insert), in table order
    pub fn options(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.table
            .iter()
            .filter(|entry| {
                self.table
                    .lookup(entry.key())
                    .is_some_and(|found| std::ptr::eq(found, *entry))
            })
            .filter_map(|entry| {
                std::str::from_utf8(entry.key())
                    .ok()
                    .map(|name| (name, entry.data()))
            })
    }

    /// Visible options ordered by name
    pub fn sorted_options(&self) -> Vec<(&str, &Value)> {
        let mut options: Vec<_> = self.options().collect();
        options.sort_by(|a, b| a.0.cmp(b.0));
        options
    }

    pub fn len(&self) -> usize {
        self.options().count()
    }

    pub fn is_empty(&self) -> bool {
        self.options().next().is_none()
    }

    /// Tear the section down, releasing every option and every subsection
    pub fn destroy(self) -> CleanupStats {
        self.table.cleanup()
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural equality: same visible names with equal values
impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .options()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}
