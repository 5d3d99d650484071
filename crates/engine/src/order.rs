//! Natural ordering and deduplication of badge rows.
//!
//! Route numbers sort the way riders expect: "7" before "52" before "112"
//! (shorter first), and "9" before "12" among equal lengths when both are
//! plain integers. Equal-length keys that are not both numeric keep their
//! input order; see DESIGN.md for why this weak tie-break is intentional.

use std::cmp::Ordering;
use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

use crate::model::{Badge, BadgeVariant};

/// Result of reading a display key as a number. Parse failure is data here,
/// not an error: it routes the comparison to the non-numeric branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NaturalKey {
    Number(i64),
    Text,
}

impl NaturalKey {
    fn parse(key: &str) -> Self {
        key.parse::<i64>().map(Self::Number).unwrap_or(Self::Text)
    }
}

/// Visible length of a display key in grapheme clusters. Route refs are
/// often Cyrillic; byte length would misreport them.
pub fn display_len(key: &str) -> usize {
    key.graphemes(true).count()
}

fn natural_cmp(a: &Badge, b: &Badge) -> Ordering {
    let (ka, kb) = (a.display_key(), b.display_key());
    match display_len(ka).cmp(&display_len(kb)) {
        Ordering::Equal => match (NaturalKey::parse(ka), NaturalKey::parse(kb)) {
            (NaturalKey::Number(na), NaturalKey::Number(nb)) => na.cmp(&nb),
            // Stable sort keeps the input order for these.
            _ => Ordering::Equal,
        },
        other => other,
    }
}

/// Sort badges into natural order, then drop duplicates by identity key,
/// keeping the first occurrence. Deterministic for a fixed input sequence
/// and idempotent.
pub fn normalize(mut badges: Vec<Badge>) -> Vec<Badge> {
    badges.sort_by(natural_cmp);

    let mut seen: HashSet<(String, BadgeVariant)> = HashSet::new();
    badges.retain(|badge| {
        let (key, variant) = badge.identity();
        seen.insert((key.to_owned(), variant))
    });
    badges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PoiKind;

    fn transfer(route_ref: &str) -> Badge {
        Badge::Transfer {
            route_ref: route_ref.into(),
            colour: None,
        }
    }

    #[test]
    fn test_shorter_keys_come_first() {
        let out = normalize(vec![transfer("112"), transfer("7"), transfer("52")]);
        let keys: Vec<_> = out.iter().map(|b| b.display_key().to_owned()).collect();
        assert_eq!(keys, ["7", "52", "112"]);
    }

    #[test]
    fn test_equal_length_numeric_tiebreak() {
        let out = normalize(vec![transfer("31"), transfer("12"), transfer("25")]);
        let keys: Vec<_> = out.iter().map(|b| b.display_key().to_owned()).collect();
        assert_eq!(keys, ["12", "25", "31"]);
    }

    #[test]
    fn test_equal_length_non_numeric_keeps_input_order() {
        // "5а" and "5б" are equal length and do not parse as integers.
        let out = normalize(vec![transfer("5б"), transfer("5а")]);
        let keys: Vec<_> = out.iter().map(|b| b.display_key().to_owned()).collect();
        assert_eq!(keys, ["5б", "5а"]);
    }

    #[test]
    fn test_malformed_numeric_field_falls_back() {
        // One side numeric, one not: still the non-numeric branch, input
        // order kept, no panic, no abort.
        let out = normalize(vec![transfer("1x"), transfer("12")]);
        let keys: Vec<_> = out.iter().map(|b| b.display_key().to_owned()).collect();
        assert_eq!(keys, ["1x", "12"]);
    }

    #[test]
    fn test_duplicates_removed_by_identity() {
        let out = normalize(vec![
            transfer("5"),
            Badge::Transfer {
                route_ref: "5".into(),
                colour: Some("red".into()),
            },
            transfer("5"),
        ]);
        assert_eq!(out.len(), 1);
        // Keep-first: the uncoloured one arrived first.
        assert_eq!(out[0], transfer("5"));
    }

    #[test]
    fn test_poi_and_transfer_do_not_collapse() {
        let poi = Badge::Poi {
            kind: PoiKind::Train,
            colour: None,
        };
        let out = normalize(vec![poi.clone(), transfer("train")]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let input = vec![
            transfer("112"),
            transfer("7"),
            Badge::Poi {
                kind: PoiKind::Metro,
                colour: None,
            },
            transfer("7"),
            transfer("52"),
        ];
        let once = normalize(input);
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_identity_key_repeats() {
        let out = normalize(vec![
            transfer("5"),
            transfer("5"),
            transfer("10"),
            transfer("10"),
        ]);
        let mut keys: Vec<_> = out.iter().map(Badge::identity).collect();
        keys.dedup();
        assert_eq!(keys.len(), out.len());
    }
}
