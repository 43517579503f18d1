use std::fmt;

use serde::Serialize;

/// Card field a predicate searches.
///
/// Produced from a field specifier with [`classify_field`]. Anything that is not
/// a known alias becomes [`SearchField::Unknown`]; consumers treat that as a
/// broad search rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Archetype,
    Artist,
    Format,
    Flavor,
    /// Implicit field of unqualified terms. No alias maps here.
    Name,
    Rules,
    Type,
    Unknown,
}

impl SearchField {
    /// Alias table, in the order the `fields` command lists it.
    pub const ALIASES: &'static [(&'static str, SearchField)] = &[
        ("a", SearchField::Archetype),
        ("archetype", SearchField::Archetype),
        ("c", SearchField::Archetype),
        ("class", SearchField::Archetype),
        ("artist", SearchField::Artist),
        ("ft", SearchField::Flavor),
        ("flavor", SearchField::Flavor),
        ("f", SearchField::Format),
        ("format", SearchField::Format),
        ("r", SearchField::Rules),
        ("rules", SearchField::Rules),
        ("o", SearchField::Rules),
        ("t", SearchField::Type),
        ("type", SearchField::Type),
    ];

    /// Shortest specifier that classifies back to this field.
    pub fn alias(self) -> &'static str {
        match self {
            SearchField::Archetype => "a",
            SearchField::Artist => "artist",
            SearchField::Format => "f",
            SearchField::Flavor => "ft",
            SearchField::Name => "name",
            SearchField::Rules => "r",
            SearchField::Type => "t",
            SearchField::Unknown => "?",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchField::Archetype => "archetype",
            SearchField::Artist => "artist",
            SearchField::Format => "format",
            SearchField::Flavor => "flavor",
            SearchField::Name => "name",
            SearchField::Rules => "rules",
            SearchField::Type => "type",
            SearchField::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

impl From<&str> for SearchField {
    fn from(text: &str) -> Self {
        classify_field(text)
    }
}

/// Case-insensitive alias lookup. Never fails.
pub fn classify_field(text: &str) -> SearchField {
    let text = text.trim();
    SearchField::ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(text))
        .map(|(_, field)| *field)
        .unwrap_or(SearchField::Unknown)
}
