//! Country display-name lookup.
//!
//! Resolved names are memoized per country code. The key space is bounded
//! (ISO 3166-1 alpha-2), so the cache never needs eviction; `clear` exists
//! for callers that want to drop it explicitly.

use std::collections::HashMap;
use std::sync::RwLock;

/// English display names for common ISO 3166-1 alpha-2 codes. Codes not
/// listed here fall back to the code itself.
const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("AE", "United Arab Emirates"),
    ("AR", "Argentina"),
    ("AT", "Austria"),
    ("AU", "Australia"),
    ("BD", "Bangladesh"),
    ("BE", "Belgium"),
    ("BG", "Bulgaria"),
    ("BR", "Brazil"),
    ("CA", "Canada"),
    ("CH", "Switzerland"),
    ("CL", "Chile"),
    ("CN", "China"),
    ("CO", "Colombia"),
    ("CZ", "Czechia"),
    ("DE", "Germany"),
    ("DK", "Denmark"),
    ("EG", "Egypt"),
    ("ES", "Spain"),
    ("FI", "Finland"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("GR", "Greece"),
    ("HK", "Hong Kong"),
    ("HR", "Croatia"),
    ("HU", "Hungary"),
    ("ID", "Indonesia"),
    ("IE", "Ireland"),
    ("IL", "Israel"),
    ("IN", "India"),
    ("IT", "Italy"),
    ("JP", "Japan"),
    ("KE", "Kenya"),
    ("KR", "South Korea"),
    ("MX", "Mexico"),
    ("MY", "Malaysia"),
    ("NG", "Nigeria"),
    ("NL", "Netherlands"),
    ("NO", "Norway"),
    ("NZ", "New Zealand"),
    ("PE", "Peru"),
    ("PH", "Philippines"),
    ("PK", "Pakistan"),
    ("PL", "Poland"),
    ("PT", "Portugal"),
    ("RO", "Romania"),
    ("RS", "Serbia"),
    ("SA", "Saudi Arabia"),
    ("SE", "Sweden"),
    ("SG", "Singapore"),
    ("SK", "Slovakia"),
    ("TH", "Thailand"),
    ("TR", "Turkey"),
    ("TW", "Taiwan"),
    ("UA", "Ukraine"),
    ("US", "United States"),
    ("UY", "Uruguay"),
    ("VN", "Vietnam"),
    ("ZA", "South Africa"),
];

/// Memoizing country-name catalog.
#[derive(Debug, Default)]
pub struct CountryCatalog {
    cache: RwLock<HashMap<String, String>>,
}

impl CountryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display name for a country code, falling back to the code itself
    /// for anything unknown.
    pub fn name(&self, code: &str) -> String {
        let key = code.to_ascii_uppercase();

        if let Ok(cache) = self.cache.read() {
            if let Some(name) = cache.get(&key) {
                return name.clone();
            }
        }

        let name = COUNTRY_NAMES
            .iter()
            .find(|(c, _)| *c == key)
            .map(|(_, n)| (*n).to_string())
            .unwrap_or_else(|| key.clone());

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key, name.clone());
        }

        name
    }

    /// Drop all memoized entries.
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    /// Number of memoized entries.
    pub fn cached(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }
}
