use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

// ---------------------------------------------------------------------------
// AnimeRecord – one row of the catalog
// ---------------------------------------------------------------------------

/// A single catalog entry. Numeric columns are nullable because the source
/// CSV marks unknowns with empty cells or sentinel text like `"Unknown"`.
#[derive(Debug, Clone, Default)]
pub struct AnimeRecord {
    pub name: String,

    // Numeric metrics
    pub favorites: Option<f64>,
    pub episodes: Option<f64>,
    pub score: Option<f64>,
    pub members: Option<f64>,
    pub popularity: Option<f64>,
    pub ranked: Option<f64>,

    // Scalar categoricals
    pub kind: Option<String>, // the "Type" column
    pub status: Option<String>,
    pub rating: Option<String>,
    pub aired: Option<String>,

    // Multi-valued categoricals, tokenized at load
    pub genres: Vec<String>,
    pub themes: Vec<String>,
    pub demographics: Vec<String>,
}

// ---------------------------------------------------------------------------
// Typed field handles
// ---------------------------------------------------------------------------
//
// Criteria and aggregations name fields through these enums, so an operator
// can only ever be paired with a field of the right shape.

/// Scalar (single-valued) string fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScalarField {
    Name,
    Kind,
    Status,
    Rating,
    Aired,
}

/// Nullable numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NumericField {
    Favorites,
    Episodes,
    Score,
    Members,
    Popularity,
    Ranked,
}

/// Multi-valued (tokenized) categorical fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TokenField {
    Genres,
    Themes,
    Demographics,
}

impl ScalarField {
    pub const ALL: [ScalarField; 5] = [
        ScalarField::Name,
        ScalarField::Kind,
        ScalarField::Status,
        ScalarField::Rating,
        ScalarField::Aired,
    ];

    /// CSV column name.
    pub const fn column(self) -> &'static str {
        match self {
            ScalarField::Name => "Name",
            ScalarField::Kind => "Type",
            ScalarField::Status => "Status",
            ScalarField::Rating => "Rating",
            ScalarField::Aired => "Aired",
        }
    }

    pub fn get(self, record: &AnimeRecord) -> Option<&str> {
        match self {
            ScalarField::Name => Some(record.name.as_str()),
            ScalarField::Kind => record.kind.as_deref(),
            ScalarField::Status => record.status.as_deref(),
            ScalarField::Rating => record.rating.as_deref(),
            ScalarField::Aired => record.aired.as_deref(),
        }
    }
}

impl NumericField {
    pub const ALL: [NumericField; 6] = [
        NumericField::Favorites,
        NumericField::Episodes,
        NumericField::Score,
        NumericField::Members,
        NumericField::Popularity,
        NumericField::Ranked,
    ];

    pub const fn column(self) -> &'static str {
        match self {
            NumericField::Favorites => "Favorites",
            NumericField::Episodes => "Episodes",
            NumericField::Score => "Score",
            NumericField::Members => "Members",
            NumericField::Popularity => "Popularity",
            NumericField::Ranked => "Ranked",
        }
    }

    pub fn get(self, record: &AnimeRecord) -> Option<f64> {
        match self {
            NumericField::Favorites => record.favorites,
            NumericField::Episodes => record.episodes,
            NumericField::Score => record.score,
            NumericField::Members => record.members,
            NumericField::Popularity => record.popularity,
            NumericField::Ranked => record.ranked,
        }
    }
}

impl TokenField {
    pub const ALL: [TokenField; 3] = [
        TokenField::Genres,
        TokenField::Themes,
        TokenField::Demographics,
    ];

    pub const fn column(self) -> &'static str {
        match self {
            TokenField::Genres => "Genres",
            TokenField::Themes => "Themes",
            TokenField::Demographics => "Demographics",
        }
    }

    pub fn get(self, record: &AnimeRecord) -> &[String] {
        match self {
            TokenField::Genres => &record.genres,
            TokenField::Themes => &record.themes,
            TokenField::Demographics => &record.demographics,
        }
    }

    fn get_mut(self, record: &mut AnimeRecord) -> &mut Vec<String> {
        match self {
            TokenField::Genres => &mut record.genres,
            TokenField::Themes => &mut record.themes,
            TokenField::Demographics => &mut record.demographics,
        }
    }
}

// ---------------------------------------------------------------------------
// AnimeDataset – the complete loaded catalog
// ---------------------------------------------------------------------------

/// The full parsed catalog with precomputed selectable-option vocabularies.
/// Read-only after construction; filtering always derives a new view.
#[derive(Debug, Clone, Default)]
pub struct AnimeDataset {
    /// All records, in source-file order.
    pub records: Vec<AnimeRecord>,

    token_options: BTreeMap<TokenField, Vec<String>>,
    scalar_options: BTreeMap<ScalarField, Vec<String>>,
}

impl AnimeDataset {
    /// Build the dataset from loaded records.
    ///
    /// Canonicalizes categorical values across the whole dataset: values that
    /// differ only in casing fold to the spelling seen first (source order is
    /// fixed, so this is deterministic), which keeps the selectable-options
    /// lists from fragmenting into near-duplicates.
    pub fn from_records(mut records: Vec<AnimeRecord>) -> Self {
        let mut token_options = BTreeMap::new();
        for field in TokenField::ALL {
            let mut canon: BTreeMap<String, String> = BTreeMap::new();
            for record in &mut records {
                for token in field.get_mut(record) {
                    canonicalize(&mut canon, token);
                }
            }
            token_options.insert(field, sorted_options(canon));
        }

        let mut scalar_options = BTreeMap::new();
        for field in [ScalarField::Kind, ScalarField::Status, ScalarField::Rating] {
            let mut canon: BTreeMap<String, String> = BTreeMap::new();
            for record in &mut records {
                let value = match field {
                    ScalarField::Kind => &mut record.kind,
                    ScalarField::Status => &mut record.status,
                    ScalarField::Rating => &mut record.rating,
                    _ => unreachable!(),
                };
                if let Some(value) = value {
                    canonicalize(&mut canon, value);
                }
            }
            scalar_options.insert(field, sorted_options(canon));
        }

        AnimeDataset {
            records,
            token_options,
            scalar_options,
        }
    }

    /// Sorted unique tokens of a multi-valued field across the dataset.
    pub fn token_options(&self, field: TokenField) -> &[String] {
        self.token_options
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sorted unique values of a scalar categorical field.
    pub fn scalar_options(&self, field: ScalarField) -> &[String] {
        self.scalar_options
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// (min, max) over the non-null values of a numeric field.
    pub fn numeric_range(&self, field: NumericField) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for value in self.records.iter().filter_map(|r| field.get(r)) {
            range = Some(match range {
                Some((lo, hi)) => (lo.min(value), hi.max(value)),
                None => (value, value),
            });
        }
        range
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Rewrite `value` to the canonical spelling for its case-folded key,
/// registering it as the canonical spelling if the key is new.
fn canonicalize(canon: &mut BTreeMap<String, String>, value: &mut String) {
    match canon.entry(value.to_ascii_lowercase()) {
        Entry::Occupied(entry) => {
            if entry.get() != value {
                *value = entry.get().clone();
            }
        }
        Entry::Vacant(entry) => {
            entry.insert(value.clone());
        }
    }
}

fn sorted_options(canon: BTreeMap<String, String>) -> Vec<String> {
    let mut options: Vec<String> = canon.into_values().collect();
    options.sort();
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, genres: &[&str]) -> AnimeRecord {
        AnimeRecord {
            name: name.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn vocabulary_is_sorted_and_deduplicated() {
        let ds = AnimeDataset::from_records(vec![
            record("A", &["Comedy", "Action"]),
            record("B", &["Action", "Drama"]),
        ]);
        assert_eq!(
            ds.token_options(TokenField::Genres),
            ["Action", "Comedy", "Drama"]
        );
    }

    #[test]
    fn inconsistent_casing_folds_to_first_spelling() {
        let ds = AnimeDataset::from_records(vec![
            record("A", &["Action"]),
            record("B", &["ACTION"]),
            record("C", &["action"]),
        ]);
        assert_eq!(ds.token_options(TokenField::Genres), ["Action"]);
        // Record values are rewritten too, so matching stays exact downstream.
        assert_eq!(ds.records[1].genres, ["Action"]);
        assert_eq!(ds.records[2].genres, ["Action"]);
    }

    #[test]
    fn numeric_range_skips_nulls() {
        let mut a = record("A", &[]);
        a.favorites = Some(10.0);
        let mut b = record("B", &[]);
        b.favorites = None;
        let mut c = record("C", &[]);
        c.favorites = Some(250.0);
        let ds = AnimeDataset::from_records(vec![a, b, c]);
        assert_eq!(
            ds.numeric_range(NumericField::Favorites),
            Some((10.0, 250.0))
        );
        assert_eq!(ds.numeric_range(NumericField::Score), None);
    }
}
