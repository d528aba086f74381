//! Keyword classification of benefit-list items.
//!
//! Job offers describe their logistics (location, contract, hours, ...) as
//! short phrases in an unordered list, written in either Polish or English.
//! Each phrase is assigned to exactly one category by scanning an ordered
//! rule table; the first rule with a matching keyword wins.

/// Category a benefit-list item is filed under. Items no rule matches are
/// kept verbatim as [`Category::AdditionalInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    WorkLocation,
    Validity,
    ContractType,
    EmploymentType,
    Position,
    WorkArrangement,
    Start,
    RecruitmentMethod,
    AdditionalInfo,
}

/// Rules in precedence order. Keywords are lowercase and carry both site
/// locales. Location keywords include the larger Polish cities in both
/// spellings, since offers often state the city bare.
const KEYWORD_RULES: &[(Category, &[&str])] = &[
    (
        Category::WorkLocation,
        &[
            "siedziba firmy",
            "company location",
            "miejsce pracy",
            "work location",
            "warszawa",
            "warsaw",
            "kraków",
            "cracow",
            "wrocław",
            "wroclaw",
            "poznań",
            "poznan",
            "gdańsk",
            "gdansk",
            "łódź",
            "lodz",
            "katowice",
            "szczecin",
        ],
    ),
    (Category::Validity, &["ważna jeszcze", "valid for"]),
    (Category::ContractType, &["b2b", "kontrakt", "umowa"]),
    (Category::EmploymentType, &["pełny etat", "full-time"]),
    (Category::Position, &["specjalista", "specialist"]),
    (
        Category::WorkArrangement,
        &["praca hybrydowa", "hybrid", "praca zdalna", "home office"],
    ),
    (Category::Start, &["od zaraz", "immediate"]),
    (Category::RecruitmentMethod, &["rekrutacja", "recruitment"]),
];

/// Assigns a benefit-list item to its category.
///
/// Matching is case-insensitive substring search; the scan is total, so every
/// item lands in exactly one category.
pub fn classify(item: &str) -> Category {
    let lowered = item.to_lowercase();
    for (category, keywords) in KEYWORD_RULES {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return *category;
        }
    }
    Category::AdditionalInfo
}
