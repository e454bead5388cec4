//! Interned string identifiers
//!
//! `IdString` turns texture and node names into small `Copy` handles that
//! compare and hash as integers. The original text is kept in a process-wide
//! interner so it can be recovered for resource names and log messages.

use std::fmt;
use std::sync::{OnceLock, RwLock};
use rustc_hash::FxHashMap;

/// Separator placed between the two halves of a concatenated identifier
pub const CONCAT_SEPARATOR: char = '#';

/// Process-wide string table
struct Interner {
    ids: FxHashMap<String, u32>,
    names: Vec<String>,
}

impl Interner {
    fn new() -> Self {
        Self {
            ids: FxHashMap::default(),
            names: Vec::new(),
        }
    }
}

static INTERNER: OnceLock<RwLock<Interner>> = OnceLock::new();

fn interner() -> &'static RwLock<Interner> {
    INTERNER.get_or_init(|| RwLock::new(Interner::new()))
}

/// Interned string identifier
///
/// Two `IdString`s are equal if and only if they were created from the same
/// text. Creation takes a lock; comparison and hashing do not.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdString(u32);

impl IdString {
    /// Intern `name` and return its identifier
    pub fn new(name: &str) -> Self {
        {
            let table = interner().read().unwrap_or_else(|e| e.into_inner());
            if let Some(&id) = table.ids.get(name) {
                return IdString(id);
            }
        }

        let mut table = interner().write().unwrap_or_else(|e| e.into_inner());
        // Another thread may have interned it between the two locks
        if let Some(&id) = table.ids.get(name) {
            return IdString(id);
        }
        let id = table.names.len() as u32;
        table.names.push(name.to_string());
        table.ids.insert(name.to_string(), id);
        IdString(id)
    }

    /// Combine with another identifier (or an integer)
    ///
    /// The resulting text is `"<self>#<other>"`. The separator keeps
    /// `("rt1", 12)` and `("rt11", 2)` apart.
    pub fn concat(&self, other: impl Into<IdString>) -> IdString {
        let other = other.into();
        IdString::new(&format!("{}{}{}", self.friendly_text(), CONCAT_SEPARATOR, other.friendly_text()))
    }

    /// Original text this identifier was created from
    pub fn friendly_text(&self) -> String {
        let table = interner().read().unwrap_or_else(|e| e.into_inner());
        table.names.get(self.0 as usize).cloned().unwrap_or_default()
    }

    /// Raw interned value
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Returns true if `text` has been interned
#[cfg(test)]
pub(crate) fn is_interned(text: &str) -> bool {
    interner().read().unwrap_or_else(|e| e.into_inner()).ids.contains_key(text)
}

impl From<&str> for IdString {
    fn from(name: &str) -> Self {
        IdString::new(name)
    }
}

impl From<&String> for IdString {
    fn from(name: &String) -> Self {
        IdString::new(name)
    }
}

impl From<u32> for IdString {
    fn from(value: u32) -> Self {
        IdString::new(&value.to_string())
    }
}

impl From<usize> for IdString {
    fn from(value: usize) -> Self {
        IdString::new(&value.to_string())
    }
}

impl fmt::Display for IdString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.friendly_text())
    }
}

impl fmt::Debug for IdString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdString({:?})", self.friendly_text())
    }
}

#[cfg(test)]
#[path = "id_string_tests.rs"]
mod tests;
