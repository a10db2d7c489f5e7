//! Word tables for English boundary decisions

/// Titles that precede a name and never end a sentence
pub(crate) const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "rev", "fr", "st", "sr", "jr", "gen", "col", "capt", "lt",
    "sgt", "gov", "sen", "rep", "hon", "mt",
];

/// Abbreviations that usually continue the sentence but may end one
pub(crate) const ABBREVIATIONS: &[&str] = &[
    // Latin and common
    "etc", "vs", "e.g", "i.e", "cf", "viz", "approx", "est", "misc", "no", "nos", "vol", "pp",
    "fig", "al", "ca",
    // Business / organisation
    "inc", "corp", "ltd", "llc", "co", "assn", "org", "dept", "univ",
    // Geography
    "ave", "blvd", "rd", "ln", "apt", "bldg", "fl",
    // Months and days
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "mon",
    "tue", "tues", "wed", "thu", "thur", "thurs", "fri", "sat", "sun",
    // Degrees
    "ph.d", "m.d", "b.a", "m.a", "b.s", "m.s",
];

/// Words that commonly open a sentence; after an abbreviation they signal a boundary
pub(crate) const SENTENCE_STARTERS: &[&str] = &[
    // Pronouns
    "I", "You", "He", "She", "It", "We", "They",
    // Determiners
    "The", "A", "An", "This", "That", "These", "Those", "My", "Our", "Your", "Their", "His",
    "Her", "Its",
    // Connectives
    "But", "And", "So", "However", "Then", "Also", "Yet", "Still", "Meanwhile", "Therefore",
    "Thus", "Furthermore", "Moreover", "Finally", "Next",
    // Interrogatives
    "What", "When", "Where", "Why", "How", "Who", "Which",
    // Discourse
    "Yes", "No", "Okay", "OK", "Well", "Thanks", "Thank", "Let", "There", "Here", "If",
    "In", "On", "At", "After", "Before",
];
