use std::collections::BTreeMap;

use super::filter::FilteredView;
use super::model::{AnimeRecord, NumericField, ScalarField, TokenField};

// ---------------------------------------------------------------------------
// Aggregations over a FilteredView
// ---------------------------------------------------------------------------
//
// Every operation here is total over an empty view: it returns an empty
// result instead of failing, so the charts can always render a "no data"
// placeholder.

/// The `n` records with the largest non-null values of `field`, descending.
///
/// Nulls are never returned, so the result length is
/// `min(n, records with a non-null value)`. Ties keep dataset order: the
/// underlying sort is stable and the view iterates in dataset order. That
/// ordering is a contract (see the tie test below), not a side effect.
pub fn top_n<'a>(view: &FilteredView<'a>, field: NumericField, n: usize) -> Vec<&'a AnimeRecord> {
    let mut scored: Vec<(&'a AnimeRecord, f64)> = view
        .records()
        .filter_map(|r| field.get(r).map(|v| (r, v)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(n);
    scored.into_iter().map(|(r, _)| r).collect()
}

/// Occurrences per distinct token of a multi-valued field, sorted by count
/// descending (ties alphabetical, for a deterministic presentation order).
///
/// Counts sum to the number of token occurrences, not the number of records:
/// a record tagged `["Isekai", "Mecha"]` contributes to both buckets.
pub fn token_counts(view: &FilteredView<'_>, field: TokenField) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in view.records() {
        for token in field.get(record) {
            *counts.entry(token).or_default() += 1;
        }
    }
    sorted_counts(counts)
}

/// Occurrences per distinct value of a scalar field; null values are skipped.
pub fn scalar_counts(view: &FilteredView<'_>, field: ScalarField) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in view.records().filter_map(|r| field.get(r)) {
        *counts.entry(value).or_default() += 1;
    }
    sorted_counts(counts)
}

fn sorted_counts(counts: BTreeMap<&str, usize>) -> Vec<(String, usize)> {
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Sum of `value` over every co-occurring (row-token, col-token) pair.
///
/// Pairs that never co-occur are simply absent from the map. Consumers must
/// keep "no co-occurrence" visually distinct from an explicit 0.0 sum.
pub fn pivot_sum(
    view: &FilteredView<'_>,
    rows: TokenField,
    cols: TokenField,
    value: NumericField,
) -> BTreeMap<(String, String), f64> {
    let mut table: BTreeMap<(String, String), f64> = BTreeMap::new();
    for record in view.records() {
        let Some(v) = value.get(record) else {
            continue;
        };
        for row_token in rows.get(record) {
            for col_token in cols.get(record) {
                *table
                    .entry((row_token.clone(), col_token.clone()))
                    .or_default() += v;
            }
        }
    }
    table
}

/// Records ordered by a numeric field. Records with a null value are
/// excluded entirely; a missing rank is not orderable to either end.
/// Stable among equal values.
pub fn rank_ordered<'a>(
    view: &FilteredView<'a>,
    field: NumericField,
    ascending: bool,
) -> Vec<&'a AnimeRecord> {
    let mut scored: Vec<(&'a AnimeRecord, f64)> = view
        .records()
        .filter_map(|r| field.get(r).map(|v| (r, v)))
        .collect();
    if ascending {
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
    } else {
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    }
    scored.into_iter().map(|(r, _)| r).collect()
}

/// Sum of a numeric field over the view; nulls contribute nothing.
pub fn numeric_sum(view: &FilteredView<'_>, field: NumericField) -> f64 {
    view.records().filter_map(|r| field.get(r)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{self, Criterion};
    use crate::data::model::AnimeDataset;

    fn mk(name: &str, favorites: Option<f64>, themes: &[&str]) -> AnimeRecord {
        AnimeRecord {
            name: name.to_string(),
            favorites,
            themes: themes.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    /// The three-record scenario: filter by theme, then take the top record.
    #[test]
    fn theme_filter_then_top_one() {
        let ds = AnimeDataset::from_records(vec![
            mk("R1", Some(100.0), &["Isekai"]),
            mk("R2", Some(50.0), &["Isekai", "Mecha"]),
            mk("R3", Some(200.0), &["Mecha"]),
        ]);
        let view = filter::apply(
            &ds,
            &[Criterion::ContainsToken(TokenField::Themes, "Mecha".into())],
        );
        assert_eq!(view.indices(), [1, 2]);

        let top = top_n(&view, NumericField::Favorites, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "R3");
    }

    #[test]
    fn top_n_length_and_dominance() {
        let ds = AnimeDataset::from_records(vec![
            mk("A", Some(10.0), &[]),
            mk("B", None, &[]),
            mk("C", Some(30.0), &[]),
            mk("D", Some(20.0), &[]),
        ]);
        let view = FilteredView::all(&ds);

        let top = top_n(&view, NumericField::Favorites, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "C");
        assert_eq!(top[1].name, "D");

        // n larger than the non-null population: nulls still never appear.
        let top = top_n(&view, NumericField::Favorites, 10);
        assert_eq!(top.len(), 3);
    }

    #[test]
    fn top_n_ties_keep_dataset_order() {
        let ds = AnimeDataset::from_records(vec![
            mk("First", Some(50.0), &[]),
            mk("Second", Some(50.0), &[]),
            mk("Third", Some(50.0), &[]),
        ]);
        let view = FilteredView::all(&ds);
        let names: Vec<&str> = top_n(&view, NumericField::Favorites, 3)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn token_counts_count_occurrences_not_records() {
        let ds = AnimeDataset::from_records(vec![
            mk("A", None, &["Isekai"]),
            mk("B", None, &["Isekai", "Mecha"]),
            mk("C", None, &["Mecha"]),
        ]);
        let view = FilteredView::all(&ds);
        let counts = token_counts(&view, TokenField::Themes);
        assert_eq!(counts, vec![("Isekai".into(), 2), ("Mecha".into(), 2)]);
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        assert_eq!(total, 4); // 4 token occurrences across 3 records
    }

    #[test]
    fn pivot_sum_absent_cells_stay_absent() {
        let mut a = mk("A", Some(100.0), &["Isekai"]);
        a.demographics = vec!["Shounen".into()];
        let mut b = mk("B", Some(40.0), &["Mecha"]);
        b.demographics = vec!["Seinen".into()];
        let mut c = mk("C", Some(0.0), &["Mecha"]);
        c.demographics = vec!["Seinen".into()];
        let ds = AnimeDataset::from_records(vec![a, b, c]);
        let view = FilteredView::all(&ds);

        let table = pivot_sum(
            &view,
            TokenField::Themes,
            TokenField::Demographics,
            NumericField::Favorites,
        );
        assert_eq!(
            table.get(&("Isekai".into(), "Shounen".into())),
            Some(&100.0)
        );
        assert_eq!(table.get(&("Mecha".into(), "Seinen".into())), Some(&40.0));
        // Never co-occurs: absent, which is not the same as a 0.0 sum.
        assert_eq!(table.get(&("Isekai".into(), "Seinen".into())), None);
    }

    #[test]
    fn rank_ordered_excludes_nulls() {
        let mut a = mk("A", None, &[]);
        a.ranked = Some(2.0);
        let mut b = mk("B", None, &[]);
        b.ranked = None;
        let mut c = mk("C", None, &[]);
        c.ranked = Some(1.0);
        let ds = AnimeDataset::from_records(vec![a, b, c]);
        let view = FilteredView::all(&ds);

        let names: Vec<&str> = rank_ordered(&view, NumericField::Ranked, true)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, ["C", "A"]);
    }

    #[test]
    fn empty_view_is_a_valid_input_everywhere() {
        let ds = AnimeDataset::from_records(Vec::new());
        let view = FilteredView::all(&ds);

        assert!(top_n(&view, NumericField::Favorites, 10).is_empty());
        assert!(token_counts(&view, TokenField::Genres).is_empty());
        assert!(scalar_counts(&view, ScalarField::Kind).is_empty());
        assert!(pivot_sum(
            &view,
            TokenField::Themes,
            TokenField::Demographics,
            NumericField::Favorites
        )
        .is_empty());
        assert!(rank_ordered(&view, NumericField::Ranked, true).is_empty());
        assert_eq!(numeric_sum(&view, NumericField::Episodes), 0.0);
    }
}
