use crate::error::{MockError, MockResult};
use crate::types::{Container, ContainerKind, Stored};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use tracing::{info, trace};

/// The emulated keyspace: one flat key -> container table.
///
/// A key's container kind is fixed once created. Reads against absent keys
/// see an empty container and never create the key.
#[derive(Debug, Default)]
pub struct Namespace {
    data: HashMap<String, Container>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the container under `key` for writing, creating an empty one if absent.
    pub fn get_or_create<T: Stored>(&mut self, key: &str) -> MockResult<&mut T> {
        let container = self.data.entry(key.to_string()).or_insert_with(|| {
            trace!(key, kind = %T::KIND, "creating container");
            T::default().into_container()
        });
        let actual = container.kind();
        T::from_container_mut(container).ok_or_else(|| mismatch::<T>(key, actual))
    }

    /// Fetch the container under `key` for reading; an absent key reads as empty.
    pub fn get_or_empty<T: Stored>(&self, key: &str) -> MockResult<Cow<'_, T>> {
        match self.data.get(key) {
            None => Ok(Cow::Owned(T::default())),
            Some(container) => T::from_container(container)
                .map(Cow::Borrowed)
                .ok_or_else(|| mismatch::<T>(key, container.kind())),
        }
    }

    #[cfg(test)]
    pub(crate) fn kind_of(&self, key: &str) -> Option<ContainerKind> {
        self.data.get(key).map(Container::kind)
    }

    #[cfg(test)]
    pub(crate) fn exists(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Drop every key.
    pub fn reset(&mut self) {
        info!(keys = self.data.len(), "resetting namespace");
        self.data.clear();
    }
}

fn mismatch<T: Stored>(key: &str, actual: ContainerKind) -> MockError {
    MockError::TypeMismatch {
        key: key.to_string(),
        expected: T::KIND,
        actual,
    }
}

/// Debug rendering, one key per line in key order.
impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.data.keys().collect();
        keys.sort();
        for key in keys {
            match &self.data[key] {
                Container::SortedSet(z) => {
                    let items: Vec<String> = z
                        .iter_original()
                        .map(|(member, score)| format!("{member}={score}"))
                        .collect();
                    writeln!(f, "{key} (zset): {{{}}}", items.join(", "))?;
                }
                Container::Set(s) => {
                    let mut members: Vec<&String> = s.iter().collect();
                    members.sort();
                    let items: Vec<&str> = members.into_iter().map(String::as_str).collect();
                    writeln!(f, "{key} (set): {{{}}}", items.join(", "))?;
                }
            }
        }
        Ok(())
    }
}
