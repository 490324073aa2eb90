use std::path::Path;
use std::sync::{Arc, OnceLock};

use serde::Deserialize;
use thiserror::Error;

use super::model::{AnimeDataset, AnimeRecord};
use super::tokens::tokenize;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal load failures. There is no partial load: any of these aborts before
/// a dataset is produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Columns every view of the dashboard depends on. Checked against the
/// header row before any record is parsed, so a truncated export fails with
/// the column name instead of rendering blank charts.
pub const REQUIRED_COLUMNS: [&str; 14] = [
    "Name",
    "Favorites",
    "Episodes",
    "Type",
    "Demographics",
    "Themes",
    "Genres",
    "Rating",
    "Status",
    "Score",
    "Members",
    "Popularity",
    "Ranked",
    "Aired",
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a catalog from a file. Dispatch by extension; only `.csv` is a
/// supported source format.
pub fn load_file(path: &Path) -> Result<AnimeDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

static STARTUP_DATASET: OnceLock<Arc<AnimeDataset>> = OnceLock::new();

/// Load the startup catalog at most once per process.
///
/// The first successful call populates a process-wide cache; later calls
/// return the same shared dataset regardless of `path`. The cache is never
/// invalidated; the catalog is read-only for the life of the process.
pub fn load_cached(path: &Path) -> Result<Arc<AnimeDataset>, LoadError> {
    if let Some(dataset) = STARTUP_DATASET.get() {
        return Ok(dataset.clone());
    }
    let dataset = Arc::new(load_file(path)?);
    Ok(STARTUP_DATASET.get_or_init(|| dataset).clone())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Raw CSV row, straight from serde. Everything is an optional string at
/// this stage; typing and tokenization happen in [`to_record`].
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Favorites")]
    favorites: Option<String>,
    #[serde(rename = "Episodes")]
    episodes: Option<String>,
    #[serde(rename = "Score")]
    score: Option<String>,
    #[serde(rename = "Members")]
    members: Option<String>,
    #[serde(rename = "Popularity")]
    popularity: Option<String>,
    #[serde(rename = "Ranked")]
    ranked: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
    #[serde(rename = "Status")]
    status: Option<String>,
    #[serde(rename = "Rating")]
    rating: Option<String>,
    #[serde(rename = "Aired")]
    aired: Option<String>,
    #[serde(rename = "Genres")]
    genres: Option<String>,
    #[serde(rename = "Themes")]
    themes: Option<String>,
    #[serde(rename = "Demographics")]
    demographics: Option<String>,
}

fn load_csv(path: &Path) -> Result<AnimeDataset, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for row in reader.deserialize::<RawRow>() {
        records.push(to_record(row?));
    }

    log::info!("loaded {} records from {}", records.len(), path.display());
    Ok(AnimeDataset::from_records(records))
}

fn to_record(row: RawRow) -> AnimeRecord {
    AnimeRecord {
        name: row.name.map(|n| n.trim().to_string()).unwrap_or_default(),
        favorites: parse_numeric(row.favorites.as_deref()),
        episodes: parse_numeric(row.episodes.as_deref()),
        score: parse_numeric(row.score.as_deref()),
        members: parse_numeric(row.members.as_deref()),
        popularity: parse_numeric(row.popularity.as_deref()),
        ranked: parse_numeric(row.ranked.as_deref()),
        kind: clean_scalar(row.kind),
        status: clean_scalar(row.status),
        rating: clean_scalar(row.rating),
        aired: clean_scalar(row.aired),
        genres: tokenize(row.genres.as_deref()),
        themes: tokenize(row.themes.as_deref()),
        demographics: tokenize(row.demographics.as_deref()),
    }
}

/// Numeric cells that are empty or sentinel text ("Unknown", "N/A") load as
/// null rather than failing the whole file.
fn parse_numeric(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

fn clean_scalar(raw: Option<String>) -> Option<String> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    const HEADER: &str =
        "Name,Favorites,Episodes,Type,Demographics,Themes,Genres,Rating,Status,Score,Members,Popularity,Ranked,Aired";

    fn write_csv(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("anidash-{}-{name}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{body}").unwrap();
        path
    }

    #[test]
    fn loads_and_tokenizes_a_well_formed_file() {
        let path = write_csv(
            "ok.csv",
            &format!(
                "{HEADER}\n\
                 Alpha,1200,26,TV,\"['Shounen']\",\"['Mecha', 'Isekai']\",\"['Action']\",PG-13,Finished Airing,8.1,50000,12,34,\"Apr 1998\"\n\
                 Beta,Unknown,,Movie,\"['Seinen']\",\"['Mecha']\",\"['Drama']\",R,Finished Airing,7.2,20000,40,100,\"Jul 2001\""
            ),
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);

        let alpha = &ds.records[0];
        assert_eq!(alpha.name, "Alpha");
        assert_eq!(alpha.favorites, Some(1200.0));
        assert_eq!(alpha.themes, ["Mecha", "Isekai"]);
        assert_eq!(alpha.kind.as_deref(), Some("TV"));

        // "Unknown" and empty numeric cells load as null, not as errors.
        let beta = &ds.records[1];
        assert_eq!(beta.favorites, None);
        assert_eq!(beta.episodes, None);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_required_column_fails_fast() {
        let path = write_csv(
            "missing.csv",
            "Name,Favorites,Episodes\nAlpha,1200,26",
        );
        match load_file(&path) {
            Err(LoadError::MissingColumn(column)) => assert_eq!(column, "Type"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        match load_file(Path::new("catalog.parquet")) {
            Err(LoadError::UnsupportedExtension(ext)) => assert_eq!(ext, "parquet"),
            other => panic!("expected UnsupportedExtension, got {other:?}"),
        }
    }
}
