//! Static equipment catalog.
//!
//! Maps each equipment category to its fixed list of suggested
//! questions. The catalog is defined at compile time and never mutated.

/// Number of suggested questions per category.
pub const QUESTIONS_PER_CATEGORY: usize = 3;

static CATALOG: &[(&str, [&str; QUESTIONS_PER_CATEGORY])] = &[
    (
        "Helmet",
        [
            "How do I inspect my helmet for damage?",
            "What is the proper way to clean my helmet?",
            "How often should I replace my helmet?",
        ],
    ),
    (
        "Turnout Gear",
        [
            "What are the best practices for maintaining my turnout gear?",
            "How do I properly clean and store turnout gear?",
            "When should I inspect my turnout gear for wear and tear?",
        ],
    ),
    (
        "Boots",
        [
            "How do I clean and maintain my fire-resistant boots?",
            "What should I do if my boots get damaged?",
            "How can I ensure my boots fit properly?",
        ],
    ),
    (
        "Gloves",
        [
            "How do I inspect my gloves for damage?",
            "What is the best way to clean my fire-resistant gloves?",
            "When should I replace my gloves?",
        ],
    ),
    (
        "Hood",
        [
            "How do I care for my flash hood?",
            "What materials are best for flash hoods?",
            "How can I check if my flash hood is still effective?",
        ],
    ),
    (
        "SCBA",
        [
            "How often should I inspect my SCBA?",
            "What are the maintenance steps for my SCBA?",
            "How do I properly clean my SCBA?",
        ],
    ),
    (
        "Firefighter Mask",
        [
            "How do I clean and maintain my firefighter mask?",
            "What should I do if my mask gets damaged?",
            "How do I properly store my firefighter mask?",
        ],
    ),
];

/// Category names in catalog definition order.
pub fn categories() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|(name, _)| *name)
}

/// Number of categories in the catalog.
pub fn category_count() -> usize {
    CATALOG.len()
}

/// The suggested questions for a category.
///
/// Unknown or empty input degrades to no suggestions, never an error.
pub fn questions_for(category: &str) -> &'static [&'static str] {
    CATALOG
        .iter()
        .find(|(name, _)| *name == category)
        .map_or(&[], |(_, questions)| questions.as_slice())
}
