//! Hotel listing records
//!
//! A record is the unit of output: one extracted hotel listing. Records are
//! immutable once constructed and carry their identity in their fields, so
//! two records are the same listing exactly when every populated field
//! matches.

/// A single extracted hotel listing
///
/// Identity is structural: `PartialEq`/`Hash` cover all fields, which makes
/// the record itself the deduplication key. A record with the same name but
/// a different city (or rating) is a different listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    /// Hotel display name, never empty
    pub name: String,
    /// City the listing belongs to, when known
    pub city: Option<String>,
    /// Rating text as shown on the page, when present
    pub rating: Option<String>,
}

impl Record {
    /// Create a record from raw extracted text
    ///
    /// All fields are trimmed. Returns `None` when the name is empty after
    /// trimming; empty optional fields collapse to `None`.
    ///
    /// # Arguments
    ///
    /// * `name` - Raw hotel name text
    /// * `city` - Raw city text, if any was extracted
    /// * `rating` - Raw rating text, if any was extracted
    pub fn new(
        name: impl AsRef<str>,
        city: Option<&str>,
        rating: Option<&str>,
    ) -> Option<Self> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            city: city.map(str::trim).filter(|c| !c.is_empty()).map(String::from),
            rating: rating.map(str::trim).filter(|r| !r.is_empty()).map(String::from),
        })
    }

    /// Create a record carrying only a name
    pub fn named(name: impl AsRef<str>) -> Option<Self> {
        Self::new(name, None, None)
    }
}
