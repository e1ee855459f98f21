// Copyright 2025 Cowboy AI, LLC.

//! English inflections used to derive presenter names from type names
//!
//! The rule tables follow the conventional English inflection set used by
//! Rails-style naming: uncountable words are left alone, irregular pairs are
//! checked next, then the regular suffix rules in precedence order. Every rule
//! is anchored at the end of the word, so compound `CamelCase` names inflect
//! on their last word (`OnlyChildren` -> `OnlyChild`).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A single suffix rewrite
struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    fn new(pattern: &str, replacement: impl Into<String>) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("inflection rule is a valid regex"),
            replacement: replacement.into(),
        }
    }
}

/// Compiled inflection tables, highest precedence first
struct Inflections {
    plurals: Vec<Rule>,
    singulars: Vec<Rule>,
    uncountable: Regex,
}

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

// (singular, plural)
const IRREGULAR: &[(&str, &str)] = &[
    ("zombie", "zombies"),
    ("move", "moves"),
    ("sex", "sexes"),
    ("child", "children"),
    ("man", "men"),
    ("person", "people"),
];

const PLURAL_RULES: &[(&str, &str)] = &[
    (r"(?i)(quiz)$", "${1}zes"),
    (r"(?i)^(oxen)$", "${1}"),
    (r"(?i)^(ox)$", "${1}en"),
    (r"(?i)^(m|l)ice$", "${1}ice"),
    (r"(?i)^(m|l)ouse$", "${1}ice"),
    (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
    (r"(?i)(x|ch|ss|sh)$", "${1}es"),
    (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
    (r"(?i)(hive)$", "${1}s"),
    (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
    (r"(?i)sis$", "ses"),
    (r"(?i)([ti])a$", "${1}a"),
    (r"(?i)([ti])um$", "${1}a"),
    (r"(?i)(buffal|tomat)o$", "${1}oes"),
    (r"(?i)(bu)s$", "${1}ses"),
    (r"(?i)(alias|status)$", "${1}es"),
    (r"(?i)(octop|vir)i$", "${1}i"),
    (r"(?i)(octop|vir)us$", "${1}i"),
    (r"(?i)^(ax|test)is$", "${1}es"),
    (r"(?i)s$", "s"),
    (r"$", "s"),
];

const SINGULAR_RULES: &[(&str, &str)] = &[
    (r"(?i)(database)s$", "${1}"),
    (r"(?i)(quiz)zes$", "${1}"),
    (r"(?i)(matr)ices$", "${1}ix"),
    (r"(?i)(vert|ind)ices$", "${1}ex"),
    (r"(?i)^(ox)en", "${1}"),
    (r"(?i)(alias|status)(es)?$", "${1}"),
    (r"(?i)(octop|vir)(us|i)$", "${1}us"),
    (r"(?i)^(a)x[ie]s$", "${1}xis"),
    (r"(?i)(cris|test)(is|es)$", "${1}is"),
    (r"(?i)(shoe)s$", "${1}"),
    (r"(?i)(o)es$", "${1}"),
    (r"(?i)(bus)(es)?$", "${1}"),
    (r"(?i)^(m|l)ice$", "${1}ouse"),
    (r"(?i)(x|ch|ss|sh)es$", "${1}"),
    (r"(?i)(m)ovies$", "${1}ovie"),
    (r"(?i)(s)eries$", "${1}eries"),
    (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
    (r"(?i)([lr])ves$", "${1}f"),
    (r"(?i)(tive)s$", "${1}"),
    (r"(?i)(hive)s$", "${1}"),
    (r"(?i)([^f])ves$", "${1}fe"),
    (r"(?i)(^analy)(sis|ses)$", "${1}sis"),
    (
        r"(?i)((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$",
        "${1}sis",
    ),
    (r"(?i)([ti])a$", "${1}um"),
    (r"(?i)(n)ews$", "${1}ews"),
    (r"(?i)(ss)$", "${1}"),
    (r"(?i)s$", ""),
];

impl Inflections {
    fn english() -> Self {
        let mut plurals = Vec::new();
        let mut singulars = Vec::new();

        // Irregular pairs keep the case of their first letter and rewrite the rest.
        for (singular, plural) in IRREGULAR {
            let (s_head, s_rest) = singular.split_at(1);
            let (p_head, p_rest) = plural.split_at(1);
            let plural_rest = format!("${{1}}{p_rest}");
            let singular_rest = format!("${{1}}{s_rest}");

            plurals.push(Rule::new(&format!("(?i)({s_head}){s_rest}$"), plural_rest.clone()));
            plurals.push(Rule::new(&format!("(?i)({p_head}){p_rest}$"), plural_rest));
            singulars.push(Rule::new(&format!("(?i)({s_head}){s_rest}$"), singular_rest.clone()));
            singulars.push(Rule::new(&format!("(?i)({p_head}){p_rest}$"), singular_rest));
        }

        plurals.extend(PLURAL_RULES.iter().map(|(p, r)| Rule::new(p, *r)));
        singulars.extend(SINGULAR_RULES.iter().map(|(p, r)| Rule::new(p, *r)));

        let uncountable = Regex::new(&format!(r"(?i)\b(?:{})$", UNCOUNTABLE.join("|")))
            .expect("uncountable pattern is a valid regex");

        Self {
            plurals,
            singulars,
            uncountable,
        }
    }

    fn apply(&self, word: &str, rules: &[Rule]) -> String {
        if word.is_empty() || self.uncountable.is_match(word) {
            return word.to_string();
        }
        rules
            .iter()
            .find(|rule| rule.pattern.is_match(word))
            .map(|rule| rule.pattern.replace(word, rule.replacement.as_str()).into_owned())
            .unwrap_or_else(|| word.to_string())
    }
}

static INFLECTIONS: Lazy<Inflections> = Lazy::new(Inflections::english);

static LEADING_LOWER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z\d]*").expect("camelize pattern is a valid regex"));

static SEPARATED_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:_|(/))([a-z\d]*)").expect("camelize pattern is a valid regex"));

/// Return the singular form of a word
///
/// ```rust
/// use cim_presenter::inflector::singularize;
///
/// assert_eq!(singularize("Children"), "Child");
/// assert_eq!(singularize("LessonSteps"), "LessonStep");
/// assert_eq!(singularize("OnlyChild"), "OnlyChild");
/// ```
pub fn singularize(word: &str) -> String {
    INFLECTIONS.apply(word, &INFLECTIONS.singulars)
}

/// Return the plural form of a word
///
/// ```rust
/// use cim_presenter::inflector::pluralize;
///
/// assert_eq!(pluralize("child"), "children");
/// assert_eq!(pluralize("LessonStep"), "LessonSteps");
/// ```
pub fn pluralize(word: &str) -> String {
    INFLECTIONS.apply(word, &INFLECTIONS.plurals)
}

/// Uppercase the first character and lowercase the rest
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Convert `snake_case` and `path/like` terms to `UpperCamelCase`
///
/// Already camel-cased input is returned unchanged and `/` separators become
/// `::`.
pub fn camelize(term: &str) -> String {
    let head = LEADING_LOWER.replace(term, |caps: &Captures| capitalize(&caps[0]));
    SEPARATED_WORD
        .replace_all(&head, |caps: &Captures| {
            format!(
                "{}{}",
                caps.get(1).map_or("", |m| m.as_str()),
                capitalize(&caps[2])
            )
        })
        .replace('/', "::")
}

/// Strip any `::`-separated module path, keeping the last segment
pub fn demodulize(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Turn a (possibly plural) name into a singular `UpperCamelCase` type name
///
/// Everything up to the last `.` is dropped first, so schema-qualified names
/// classify by their final component.
///
/// ```rust
/// use cim_presenter::inflector::classify;
///
/// assert_eq!(classify("Children"), "Child");
/// assert_eq!(classify("OnlyChild"), "OnlyChild");
/// assert_eq!(classify("lesson_steps"), "LessonStep");
/// assert_eq!(classify("school.lessons"), "Lesson");
/// ```
pub fn classify(name: &str) -> String {
    let last = name.rsplit('.').next().unwrap_or(name);
    camelize(&singularize(last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("children", "child")]
    #[test_case("Children", "Child")]
    #[test_case("OnlyChildren", "OnlyChild")]
    #[test_case("people", "person")]
    #[test_case("women", "woman")]
    #[test_case("steps", "step")]
    #[test_case("categories", "category")]
    #[test_case("boxes", "box")]
    #[test_case("statuses", "status")]
    #[test_case("status", "status")]
    #[test_case("wolves", "wolf")]
    #[test_case("knives", "knife")]
    #[test_case("analyses", "analysis")]
    #[test_case("mice", "mouse")]
    #[test_case("matrices", "matrix")]
    #[test_case("quizzes", "quiz")]
    #[test_case("databases", "database")]
    #[test_case("movies", "movie")]
    #[test_case("news", "news")]
    #[test_case("class", "class")]
    #[test_case("fish", "fish")]
    #[test_case("Sheep", "Sheep")]
    #[test_case("zombies", "zombie")]
    #[test_case("", "")]
    fn singularizes(word: &str, expected: &str) {
        assert_eq!(singularize(word), expected);
    }

    #[test_case("child", "children")]
    #[test_case("Child", "Children")]
    #[test_case("person", "people")]
    #[test_case("step", "steps")]
    #[test_case("category", "categories")]
    #[test_case("box", "boxes")]
    #[test_case("status", "statuses")]
    #[test_case("wife", "wives")]
    #[test_case("half", "halves")]
    #[test_case("mouse", "mice")]
    #[test_case("ox", "oxen")]
    #[test_case("tomato", "tomatoes")]
    #[test_case("datum", "data")]
    #[test_case("equipment", "equipment")]
    fn pluralizes(word: &str, expected: &str) {
        assert_eq!(pluralize(word), expected);
    }

    #[test_case("only_child", "OnlyChild")]
    #[test_case("OnlyChild", "OnlyChild")]
    #[test_case("lesson_STEP", "LessonStep")]
    #[test_case("admin/lesson_step", "Admin::LessonStep")]
    #[test_case("HTTPServer", "HTTPServer")]
    #[test_case("", "")]
    fn camelizes(term: &str, expected: &str) {
        assert_eq!(camelize(term), expected);
    }

    #[test_case("Children", "Child")]
    #[test_case("OnlyChild", "OnlyChild")]
    #[test_case("lesson_steps", "LessonStep")]
    #[test_case("StepModules", "StepModule")]
    #[test_case("school.lessons", "Lesson")]
    #[test_case("Status", "Status")]
    fn classifies(name: &str, expected: &str) {
        assert_eq!(classify(name), expected);
    }

    #[test]
    fn demodulize_keeps_last_segment() {
        assert_eq!(demodulize("cim_presenter::tests::Lesson"), "Lesson");
        assert_eq!(demodulize("Lesson"), "Lesson");
    }

    #[test]
    fn capitalize_lowercases_tail() {
        assert_eq!(capitalize("sTEP"), "Step");
        assert_eq!(capitalize(""), "");
    }
}
