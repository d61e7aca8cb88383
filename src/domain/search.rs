//! Search terms and the string predicates used to derive directory views.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::client::Client;

/// The two independent search terms typed by the user.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchTerms {
    /// Case-insensitive substring matched against the client name.
    #[serde(default)]
    pub name: String,
    /// Substring matched against the client phone as stored.
    #[serde(default)]
    pub phone: String,
}

impl SearchTerms {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }

    /// Both predicates must hold. Empty terms match every record.
    pub fn matches(&self, client: &Client) -> bool {
        name_contains(client.name.as_str(), &self.name)
            && client.phone.as_str().contains(self.phone.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.phone.is_empty()
    }
}

/// Case-insensitive substring test.
pub fn name_contains(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

/// Case-insensitive prefix test.
pub fn name_starts_with(name: &str, term: &str) -> bool {
    name.to_lowercase().starts_with(&term.to_lowercase())
}

/// Maps accented Latin letters to their base letter for primary comparison.
fn base_letter(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

fn primary_key(value: &str) -> impl Iterator<Item = char> + '_ {
    value.chars().flat_map(char::to_lowercase).map(base_letter)
}

/// Locale-aware comparison of display names.
///
/// Letters compare by base letter ignoring case and accents first. Ties fall
/// back to unaccented before accented, then lowercase before uppercase.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| {
            let accents = |s: &str| {
                s.chars()
                    .flat_map(char::to_lowercase)
                    .map(|c| base_letter(c) != c)
                    .collect::<Vec<_>>()
            };
            accents(a).cmp(&accents(b))
        })
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
}
