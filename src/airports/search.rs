use crate::airports::Airport;
use std::cmp::Ordering;

/// Upper bound on how many airports one search returns.
pub const MAX_RESULTS: usize = 30;

/// Field words shorter than this never match by appearing inside a query
/// word, so "de" or "al" do not pull in unrelated airports.
const MIN_EMBEDDED_WORD_CHARS: usize = 3;

/// Match `query` against every airport and rank the hits.
///
/// A field matches when the whole normalized query is a substring of it, or
/// when every query word is contained in some field word or contains one of
/// at least [`MIN_EMBEDDED_WORD_CHARS`] characters.
/// Hits are ordered exact city match first, then city prefix, then city name.
pub fn rank(airports: &[Airport], query: &str) -> Vec<Airport> {
    let query = Query::new(query);
    let mut hits: Vec<(u8, String, &Airport)> = airports
        .iter()
        .filter(|airport| query.matches(airport))
        .map(|airport| {
            let city = normalize(&airport.city);
            (query.tier(&city), city, airport)
        })
        .collect();
    hits.sort_by(|a, b| match a.0.cmp(&b.0) {
        Ordering::Equal => a.1.cmp(&b.1).then_with(|| a.2.code.cmp(&b.2.code)),
        other => other,
    });
    hits.into_iter()
        .take(MAX_RESULTS)
        .map(|(_, _, airport)| airport.clone())
        .collect()
}

struct Query {
    whole: String,
    words: Vec<String>,
}

impl Query {
    fn new(raw: &str) -> Self {
        let whole = normalize(raw);
        let words = words(&whole);
        Self { whole, words }
    }

    fn matches(&self, airport: &Airport) -> bool {
        [
            &airport.code,
            &airport.city,
            &airport.country,
            &airport.name,
        ]
        .into_iter()
        .any(|field| self.matches_field(field))
    }

    fn matches_field(&self, field: &str) -> bool {
        let field = normalize(field);
        if field.contains(&self.whole) {
            return true;
        }
        let field_words = words(&field);
        !self.words.is_empty()
            && self.words.iter().all(|query_word| {
                field_words.iter().any(|field_word| {
                    field_word.contains(query_word.as_str())
                        || (field_word.chars().count() >= MIN_EMBEDDED_WORD_CHARS
                            && query_word.contains(field_word.as_str()))
                })
            })
    }

    fn tier(&self, city: &str) -> u8 {
        if city == self.whole {
            0
        } else if city.starts_with(&self.whole) {
            1
        } else {
            2
        }
    }
}

fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn words(normalized: &str) -> Vec<String> {
    normalized
        .split(|c: char| c.is_whitespace() || matches!(c, '-' | '/' | ',' | '(' | ')'))
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}
