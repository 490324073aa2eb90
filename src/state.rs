use std::sync::Arc;

use crate::color::CategoryColors;
use crate::data::filter::{self, Criterion, FilteredView};
use crate::data::model::{AnimeDataset, NumericField, ScalarField, TokenField};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which dashboard page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Catalog browsing: posters, genre bubble chart, top-10 charts.
    #[default]
    Explorer,
    /// Drill-down: metrics, bar/pie/scatter/heatmap, data table.
    Analytics,
}

/// Sidebar selections for the Explorer page. `None` is the "All" sentinel:
/// the criterion is omitted entirely, it never means "match nothing".
#[derive(Debug, Clone, Default)]
pub struct ExplorerFilters {
    pub rating: Option<String>,
    pub kind: Option<String>,
    pub status: Option<String>,
    pub demographic: Option<String>,
    /// Genre picked from the bubble-chart buttons. Persists across other
    /// filter changes as ordinary state owned here, fed to the engine as
    /// just another criterion on every recompute.
    pub genre: Option<String>,
}

impl ExplorerFilters {
    /// All active criteria, including the persistent genre selection.
    pub fn criteria(&self) -> Vec<Criterion> {
        let mut criteria = self.base_criteria();
        if let Some(genre) = &self.genre {
            criteria.push(Criterion::ContainsToken(TokenField::Genres, genre.clone()));
        }
        criteria
    }

    /// The sidebar criteria without the genre selection. The genre bubble
    /// chart uses this so it keeps showing the full genre spread the buttons
    /// choose from.
    pub fn base_criteria(&self) -> Vec<Criterion> {
        let mut criteria = Vec::new();
        if let Some(rating) = &self.rating {
            criteria.push(Criterion::Equals(ScalarField::Rating, rating.clone()));
        }
        if let Some(kind) = &self.kind {
            criteria.push(Criterion::Equals(ScalarField::Kind, kind.clone()));
        }
        if let Some(status) = &self.status {
            criteria.push(Criterion::Equals(ScalarField::Status, status.clone()));
        }
        if let Some(demographic) = &self.demographic {
            criteria.push(Criterion::ContainsToken(
                TokenField::Demographics,
                demographic.clone(),
            ));
        }
        criteria
    }
}

/// Sidebar selections for the Analytics page.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsFilters {
    pub theme: Option<String>,
    pub demographic: Option<String>,
    pub kind: Option<String>,
    pub min_favorites: f64,
}

impl AnalyticsFilters {
    pub fn criteria(&self) -> Vec<Criterion> {
        let mut criteria = Vec::new();
        if let Some(theme) = &self.theme {
            criteria.push(Criterion::ContainsToken(TokenField::Themes, theme.clone()));
        }
        if let Some(demographic) = &self.demographic {
            criteria.push(Criterion::ContainsToken(
                TokenField::Demographics,
                demographic.clone(),
            ));
        }
        if let Some(kind) = &self.kind {
            criteria.push(Criterion::Equals(ScalarField::Kind, kind.clone()));
        }
        criteria.push(Criterion::NumericMin(
            NumericField::Favorites,
            self.min_favorites,
        ));
        criteria
    }
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded catalog (None until a file is loaded).
    pub dataset: Option<Arc<AnimeDataset>>,

    pub page: Page,
    pub explorer: ExplorerFilters,
    pub analytics: AnalyticsFilters,

    /// Slider bounds for the favorites filter, from the loaded data.
    pub favorites_bounds: (f64, f64),

    /// Indices of records passing the current page's filters (cached, in
    /// dataset order). Rebuilt in full on every interaction.
    pub visible_indices: Vec<usize>,

    /// Stable genre → colour assignment for the whole catalog.
    pub genre_colors: CategoryColors,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset and reset all selections.
    pub fn set_dataset(&mut self, dataset: Arc<AnimeDataset>) {
        self.explorer = ExplorerFilters::default();
        self.analytics = AnalyticsFilters::default();

        let (lo, hi) = dataset
            .numeric_range(NumericField::Favorites)
            .unwrap_or((0.0, 0.0));
        self.favorites_bounds = (lo, hi);
        self.analytics.min_favorites = lo;

        self.genre_colors =
            CategoryColors::new(dataset.token_options(TokenField::Genres).iter().cloned());

        self.visible_indices = (0..dataset.len()).collect();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// The criteria for the current page, in selection order.
    pub fn active_criteria(&self) -> Vec<Criterion> {
        match self.page {
            Page::Explorer => self.explorer.criteria(),
            Page::Analytics => self.analytics.criteria(),
        }
    }

    /// Recompute `visible_indices` from the base dataset. Full recompute
    /// every time; the catalog is small enough that nothing incremental is
    /// worth its complexity.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filter::apply(ds, &self.active_criteria()).into_indices();
        }
    }

    /// Switch page and recompute for its filter set.
    pub fn set_page(&mut self, page: Page) {
        if self.page != page {
            self.page = page;
            self.refilter();
        }
    }

    /// The current filtered view, if a dataset is loaded.
    pub fn visible_view(&self) -> Option<FilteredView<'_>> {
        self.dataset
            .as_deref()
            .map(|ds| FilteredView::from_indices(ds, self.visible_indices.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::AnimeRecord;

    fn dataset() -> Arc<AnimeDataset> {
        let mk = |name: &str, favorites: f64, genres: &[&str], kind: &str| AnimeRecord {
            name: name.to_string(),
            favorites: Some(favorites),
            kind: Some(kind.to_string()),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            ..Default::default()
        };
        Arc::new(AnimeDataset::from_records(vec![
            mk("Alpha", 100.0, &["Action"], "TV"),
            mk("Beta", 300.0, &["Comedy"], "Movie"),
            mk("Gamma", 200.0, &["Action", "Comedy"], "TV"),
        ]))
    }

    #[test]
    fn selections_translate_to_criteria_in_order() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.explorer.kind = Some("TV".to_string());
        state.explorer.genre = Some("Action".to_string());
        state.refilter();
        assert_eq!(state.visible_indices, [0, 2]);
    }

    #[test]
    fn genre_selection_persists_across_other_filter_changes() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.explorer.genre = Some("Comedy".to_string());
        state.refilter();
        assert_eq!(state.visible_indices, [1, 2]);

        // Changing an unrelated filter keeps the genre criterion active.
        state.explorer.kind = Some("TV".to_string());
        state.refilter();
        assert_eq!(state.visible_indices, [2]);

        state.explorer.kind = None;
        state.refilter();
        assert_eq!(state.visible_indices, [1, 2]);
    }

    #[test]
    fn all_sentinel_means_no_filtering() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        // Defaults: every selection is None, slider at dataset minimum.
        assert_eq!(state.visible_indices, [0, 1, 2]);
        state.set_page(Page::Analytics);
        assert_eq!(state.visible_indices, [0, 1, 2]);
    }
}
