//! Shared naming helpers for code generation.

/// Words whose plural and singular forms are identical.
const UNCOUNTABLE: &[&str] = &[
    "audio",
    "data",
    "equipment",
    "feedback",
    "fish",
    "information",
    "knowledge",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
];

/// Irregular plural endings and their singular replacements.
const IRREGULAR: &[(&str, &str)] = &[
    ("aliases", "alias"),
    ("analyses", "analysis"),
    ("bonuses", "bonus"),
    ("buses", "bus"),
    ("campuses", "campus"),
    ("children", "child"),
    ("cookies", "cookie"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("curves", "curve"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("knives", "knife"),
    ("lives", "life"),
    ("men", "man"),
    ("menus", "menu"),
    ("mice", "mouse"),
    ("movies", "movie"),
    ("oxen", "ox"),
    ("people", "person"),
    ("shoes", "shoe"),
    ("statuses", "status"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("valves", "valve"),
    ("wives", "wife"),
    ("zombies", "zombie"),
];

/// Regular suffix rules, checked in order. First match wins.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("lves", "lf"),
    ("sses", "ss"),
    ("zzes", "zz"),
    ("xes", "x"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("ss", "ss"),
    ("us", "us"),
    ("is", "is"),
    ("s", ""),
];

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
pub fn to_pascal_case(s: &str) -> String {
    s.split('_').map(capitalize).collect()
}

/// Convert a string to camelCase (e.g., "hello_world" -> "helloWorld")
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Singularize an English noun (e.g., "categories" -> "category").
///
/// Matching is on the word's ending, so compound names without separators
/// ("policycoverages") singularize on their last word. The casing of the
/// untouched prefix is preserved.
pub fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.iter().any(|u| lower.ends_with(u)) {
        return word.to_string();
    }

    for (plural, singular) in IRREGULAR {
        if lower.ends_with(plural) {
            return replace_suffix(word, plural.len(), singular);
        }
    }

    for (suffix, replacement) in SUFFIX_RULES {
        if lower.len() > suffix.len() && lower.ends_with(suffix) {
            return replace_suffix(word, suffix.len(), replacement);
        }
    }

    word.to_string()
}

fn replace_suffix(word: &str, suffix_len: usize, replacement: &str) -> String {
    match word.get(..word.len() - suffix_len) {
        Some(stem) => format!("{}{}", stem, replacement),
        None => word.to_string(),
    }
}
