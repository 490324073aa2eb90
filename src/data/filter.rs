use thiserror::Error;

use super::model::{AnimeDataset, AnimeRecord, NumericField, ScalarField, TokenField};

// ---------------------------------------------------------------------------
// Criterion – one filter predicate
// ---------------------------------------------------------------------------

/// A single filter predicate. The typed field enums make an operator/field
/// mismatch unrepresentable; [`Criterion::parse`] is the stringly entry point
/// and rejects bad combinations up front.
///
/// "No filter" / "All" is expressed by omitting the criterion, never by a
/// sentinel value inside one.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// Scalar field must equal the value exactly.
    Equals(ScalarField, String),
    /// Tokenized field must contain the value as one whole token.
    ContainsToken(TokenField, String),
    /// Numeric field must be non-null and >= the threshold.
    NumericMin(NumericField, f64),
}

/// Rejected at criterion-construction time, long before any aggregation runs.
#[derive(Debug, Error, PartialEq)]
pub enum CriterionError {
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
    #[error("operator '{op}' cannot be applied to field '{field}'")]
    OperatorMismatch { op: &'static str, field: String },
    #[error("'{0}' is not a valid numeric threshold")]
    BadThreshold(String),
    #[error("empty token for field '{0}'")]
    EmptyToken(String),
}

impl Criterion {
    /// Build a criterion from column name, operator name, and value.
    ///
    /// Operators: `equals`, `contains-token`, `numeric-minimum`.
    pub fn parse(field: &str, op: &str, value: &str) -> Result<Self, CriterionError> {
        match op {
            "equals" => {
                let field = ScalarField::ALL
                    .into_iter()
                    .find(|f| f.column() == field)
                    .ok_or_else(|| mismatch_or_unknown("equals", field))?;
                Ok(Criterion::Equals(field, value.to_string()))
            }
            "contains-token" => {
                let field = TokenField::ALL
                    .into_iter()
                    .find(|f| f.column() == field)
                    .ok_or_else(|| mismatch_or_unknown("contains-token", field))?;
                let token = value.trim();
                if token.is_empty() {
                    return Err(CriterionError::EmptyToken(field.column().to_string()));
                }
                Ok(Criterion::ContainsToken(field, token.to_string()))
            }
            "numeric-minimum" => {
                let field = NumericField::ALL
                    .into_iter()
                    .find(|f| f.column() == field)
                    .ok_or_else(|| mismatch_or_unknown("numeric-minimum", field))?;
                let min: f64 = value
                    .trim()
                    .parse()
                    .map_err(|_| CriterionError::BadThreshold(value.to_string()))?;
                if !min.is_finite() {
                    return Err(CriterionError::BadThreshold(value.to_string()));
                }
                Ok(Criterion::NumericMin(field, min))
            }
            other => Err(CriterionError::UnknownOperator(other.to_string())),
        }
    }

    /// Whether a record satisfies this predicate.
    pub fn matches(&self, record: &AnimeRecord) -> bool {
        match self {
            Criterion::Equals(field, value) => field.get(record) == Some(value.as_str()),
            // Whole-token comparison: "Action" never matches "Live-Action".
            // Case-insensitive so externally built criteria survive the
            // dataset's canonical casing.
            Criterion::ContainsToken(field, token) => field
                .get(record)
                .iter()
                .any(|t| t.eq_ignore_ascii_case(token)),
            Criterion::NumericMin(field, min) => {
                field.get(record).is_some_and(|value| value >= *min)
            }
        }
    }
}

/// A known column used with the wrong operator reads better than "unknown".
fn mismatch_or_unknown(op: &'static str, field: &str) -> CriterionError {
    let known = ScalarField::ALL.iter().any(|f| f.column() == field)
        || NumericField::ALL.iter().any(|f| f.column() == field)
        || TokenField::ALL.iter().any(|f| f.column() == field);
    if known {
        CriterionError::OperatorMismatch {
            op,
            field: field.to_string(),
        }
    } else {
        CriterionError::UnknownField(field.to_string())
    }
}

// ---------------------------------------------------------------------------
// FilteredView – the dataset with criteria applied
// ---------------------------------------------------------------------------

/// A borrowed subset of the dataset: the indices of records passing every
/// active criterion, in dataset order. Cheap to rebuild, rebuilt in full on
/// every interaction.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a AnimeDataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// The whole dataset, nothing filtered.
    pub fn all(dataset: &'a AnimeDataset) -> Self {
        FilteredView {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    /// Reconstruct a view from previously computed indices.
    pub fn from_indices(dataset: &'a AnimeDataset, indices: Vec<usize>) -> Self {
        FilteredView { dataset, indices }
    }

    pub fn dataset(&self) -> &'a AnimeDataset {
        self.dataset
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Passing records, in dataset order.
    pub fn records(&self) -> impl Iterator<Item = &'a AnimeRecord> + '_ {
        self.indices.iter().map(|&i| &self.dataset.records[i])
    }

    /// (dataset index, record) pairs, in dataset order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &'a AnimeRecord)> + '_ {
        self.indices.iter().map(|&i| (i, &self.dataset.records[i]))
    }
}

/// Apply criteria as a logical AND, in order.
///
/// Pure and deterministic: same inputs, same view. An empty intermediate
/// result is carried through the remaining criteria and comes back as a
/// valid empty view, never an error.
pub fn apply<'a>(dataset: &'a AnimeDataset, criteria: &[Criterion]) -> FilteredView<'a> {
    let mut indices: Vec<usize> = (0..dataset.len()).collect();
    for criterion in criteria {
        indices.retain(|&i| criterion.matches(&dataset.records[i]));
    }
    FilteredView { dataset, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::AnimeRecord;

    fn fixture() -> AnimeDataset {
        let mk = |name: &str, kind: &str, favorites: Option<f64>, genres: &[&str]| AnimeRecord {
            name: name.to_string(),
            kind: Some(kind.to_string()),
            favorites,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            ..Default::default()
        };
        AnimeDataset::from_records(vec![
            mk("Alpha", "TV", Some(100.0), &["Action", "Comedy"]),
            mk("Beta", "Movie", Some(50.0), &["Live-Action"]),
            mk("Gamma", "TV", None, &["Comedy"]),
            mk("Delta", "TV", Some(200.0), &["Action"]),
        ])
    }

    #[test]
    fn no_criteria_is_identity() {
        let ds = fixture();
        let view = apply(&ds, &[]);
        assert_eq!(view.indices(), [0, 1, 2, 3]);
    }

    #[test]
    fn result_is_subset_in_dataset_order() {
        let ds = fixture();
        let view = apply(&ds, &[Criterion::Equals(ScalarField::Kind, "TV".into())]);
        assert_eq!(view.indices(), [0, 2, 3]);
        assert!(view.indices().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn repeated_application_is_idempotent() {
        let ds = fixture();
        let criteria = vec![
            Criterion::Equals(ScalarField::Kind, "TV".into()),
            Criterion::NumericMin(NumericField::Favorites, 100.0),
        ];
        let first = apply(&ds, &criteria);
        let second = apply(&ds, &criteria);
        assert_eq!(first.indices(), second.indices());
    }

    #[test]
    fn criteria_order_does_not_change_the_result() {
        let ds = fixture();
        let a = Criterion::ContainsToken(TokenField::Genres, "Action".into());
        let b = Criterion::NumericMin(NumericField::Favorites, 60.0);
        let forward = apply(&ds, &[a.clone(), b.clone()]);
        let reversed = apply(&ds, &[b, a]);
        assert_eq!(forward.indices(), reversed.indices());
        assert_eq!(forward.indices(), [0, 3]);
    }

    #[test]
    fn token_match_respects_token_boundaries() {
        let ds = fixture();
        // "Action" must not match Beta's "Live-Action".
        let view = apply(
            &ds,
            &[Criterion::ContainsToken(TokenField::Genres, "Action".into())],
        );
        assert_eq!(view.indices(), [0, 3]);

        let live = apply(
            &ds,
            &[Criterion::ContainsToken(
                TokenField::Genres,
                "Live-Action".into(),
            )],
        );
        assert_eq!(live.indices(), [1]);
    }

    #[test]
    fn numeric_minimum_excludes_nulls() {
        let ds = fixture();
        let view = apply(&ds, &[Criterion::NumericMin(NumericField::Favorites, 0.0)]);
        // Gamma has no favorites count and is excluded.
        assert_eq!(view.indices(), [0, 1, 3]);
    }

    #[test]
    fn empty_intermediate_result_is_carried_through() {
        let ds = fixture();
        let view = apply(
            &ds,
            &[
                Criterion::Equals(ScalarField::Kind, "ONA".into()),
                Criterion::NumericMin(NumericField::Favorites, 10.0),
                Criterion::ContainsToken(TokenField::Genres, "Comedy".into()),
            ],
        );
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
    }

    #[test]
    fn parse_validates_up_front() {
        assert!(Criterion::parse("Type", "equals", "TV").is_ok());
        assert!(Criterion::parse("Genres", "contains-token", "Action").is_ok());
        assert!(Criterion::parse("Favorites", "numeric-minimum", "100").is_ok());

        assert_eq!(
            Criterion::parse("Bogus", "equals", "x"),
            Err(CriterionError::UnknownField("Bogus".into()))
        );
        assert_eq!(
            Criterion::parse("Genres", "equals", "Action"),
            Err(CriterionError::OperatorMismatch {
                op: "equals",
                field: "Genres".into()
            })
        );
        assert_eq!(
            Criterion::parse("Favorites", "numeric-minimum", "lots"),
            Err(CriterionError::BadThreshold("lots".into()))
        );
        assert_eq!(
            Criterion::parse("Themes", "contains-token", "  "),
            Err(CriterionError::EmptyToken("Themes".into()))
        );
        assert_eq!(
            Criterion::parse("Type", "like", "TV"),
            Err(CriterionError::UnknownOperator("like".into()))
        );
    }
}
