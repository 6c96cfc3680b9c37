//! Company and title heuristics over subject lines.

use regex::Regex;

const COMPANY_PLACEHOLDER: &str = "{company}";

/// First non-empty capture group 1 across `patterns`, in order.
pub fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|regex| {
        regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Derives a company name from the sender's mail domain.
///
/// `"Careers <jobs@globex.io>"` gives `"Globex"`.
pub fn company_from_sender(sender: &str) -> Option<String> {
    let address = sender.rsplit('<').next()?.split('>').next()?;
    let domain = address.split('@').nth(1)?;
    let label = domain.split('.').next()?.trim();
    if label.is_empty() {
        None
    } else {
        Some(capitalize(label))
    }
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// A boilerplate phrase, compiled unless it mentions the company.
#[derive(Debug, Clone)]
pub enum Boilerplate {
    Fixed(Regex),
    WithCompany(String),
}

impl Boilerplate {
    pub fn new(phrase: &str) -> Option<Self> {
        if phrase.contains(COMPANY_PLACEHOLDER) {
            Some(Self::WithCompany(phrase.to_string()))
        } else {
            phrase_regex(phrase, "").map(Self::Fixed)
        }
    }

    fn regex(&self, company: Option<&str>) -> Option<Regex> {
        match (self, company) {
            (Self::Fixed(regex), _) => Some(regex.clone()),
            (Self::WithCompany(phrase), Some(company)) if !company.trim().is_empty() => {
                phrase_regex(phrase, company.trim())
            }
            (Self::WithCompany(_), _) => None,
        }
    }
}

/// Case-insensitive regex for a literal phrase. Spaces match any whitespace
/// run and word edges are anchored so "re:" does not fire inside "store:".
fn phrase_regex(phrase: &str, company: &str) -> Option<Regex> {
    let body = phrase
        .split(COMPANY_PLACEHOLDER)
        .map(|literal| regex::escape(literal).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join(&regex::escape(company));
    let expanded = phrase.replace(COMPANY_PLACEHOLDER, company);

    let mut pattern = String::from("(?i)");
    if expanded.starts_with(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&body);
    if expanded.ends_with(is_word_char) {
        pattern.push_str(r"\b");
    }
    Regex::new(&pattern).ok()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Removes boilerplate from a subject, leaving the job title.
///
/// Falls back to the trimmed subject when nothing is left.
pub fn subtract_boilerplate(
    subject: &str,
    phrases: &[Boilerplate],
    company: Option<&str>,
    edges: &Regex,
) -> String {
    let mut title = subject.to_string();
    for phrase in phrases {
        if let Some(regex) = phrase.regex(company) {
            title = regex.replace_all(&title, " ").into_owned();
        }
    }

    let collapsed = title.split_whitespace().collect::<Vec<_>>().join(" ");
    let cleaned = edges.replace_all(&collapsed, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        subject.trim().to_string()
    } else {
        cleaned.to_string()
    }
}

/// Leading or trailing non-word characters.
pub fn edge_trimmer() -> Regex {
    Regex::new(r"^\W+|\W+$").expect("static regex")
}
