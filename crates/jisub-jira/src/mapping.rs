//! `key:value key:value` argument parsing
//!
//! Used for both the sub-task breakdown (`"QA:2 BE:3 FE:4"`) and field
//! updates (`"storypoints:4 dealsize:2,3,4"`). There is no escaping: values
//! cannot contain a space or a `:`. Commas are ordinary characters.

use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Ordered string mapping. Inserting an existing key replaces its value in
/// place, so the last occurrence wins while the first position is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: Vec<(String, String)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a space separated list of `key:value` tokens.
    ///
    /// An empty input gives an empty mapping, which callers treat as
    /// "nothing requested". Any other empty token, such as the one between
    /// two consecutive spaces, is a format error.
    pub fn parse(input: &str) -> Result<Self> {
        let mut mapping = Self::new();
        if input.is_empty() {
            return Ok(mapping);
        }

        for token in input.split(' ') {
            let token: String = token.chars().filter(|c| !c.is_whitespace()).collect();

            let Some((key, value)) = token
                .split_once(':')
                .filter(|(key, value)| !key.is_empty() && !value.contains(':'))
            else {
                return Err(Error::Format {
                    token: token.clone(),
                });
            };

            mapping.insert(key, value);
        }

        Ok(mapping)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl FromStr for Mapping {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}:{}", key, value)?;
        }
        Ok(())
    }
}

/// Serializes as a JSON object, keys in insertion order.
impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}
