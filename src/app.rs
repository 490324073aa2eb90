use eframe::egui;

use crate::data::filter::{self, FilteredView};
use crate::state::{AppState, Page};
use crate::ui::{charts, panels, posters, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AniDashApp {
    pub state: AppState,
}

impl AniDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for AniDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the active page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a catalog CSV to get started  (File → Open…)");
                });
                return;
            }
            egui::ScrollArea::vertical().show(ui, |ui| match self.state.page {
                Page::Explorer => explorer_page(ui, &mut self.state),
                Page::Analytics => analytics_page(ui, &mut self.state),
            });
        });
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// Catalog browsing: posters, genre bubbles with clickable genre filter, and
/// the two top-10 charts.
fn explorer_page(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        return;
    };

    ui.vertical_centered(|ui: &mut egui::Ui| {
        ui.heading("Anime That You Should Watch");
    });
    ui.add_space(8.0);

    ui.heading("Top 10 Ranked Anime of All Time");
    posters::top_ranked_strip(ui, &dataset);
    ui.separator();

    // The bubble chart ignores the genre criterion on purpose: it is the
    // menu the genre buttons pick from.
    ui.heading("Anime Genre Distribution");
    let bubble_view = filter::apply(&dataset, &state.explorer.base_criteria());
    charts::genre_bubble_chart(ui, &bubble_view, &state.genre_colors);
    panels::genre_buttons(ui, state);
    ui.separator();

    let view = FilteredView::from_indices(&dataset, state.visible_indices.clone());
    ui.columns(2, |cols| {
        cols[0].heading("Top 10 Favorite Anime");
        charts::top_favorites_bar(&mut cols[0], "explorer_favorites", &view, &state.genre_colors);
        cols[1].heading("Top 10 Most Popular Anime");
        charts::top_popular_bar(&mut cols[1], "explorer_popular", &view, &state.genre_colors);
    });
}

/// Drill-down analytics: metrics and the chart stack over the filtered view.
fn analytics_page(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(view) = state.visible_view() else {
        return;
    };

    ui.heading("Anime Analytics Dashboard");
    ui.add_space(8.0);

    charts::metrics_row(ui, &view);
    ui.separator();

    ui.heading("Top Anime by Favorites");
    charts::top_favorites_bar(ui, "analytics_favorites", &view, &state.genre_colors);
    ui.separator();

    ui.heading("Demographics Distribution");
    charts::demographics_pie(ui, &view);
    ui.separator();

    ui.heading("Favorites vs Episodes");
    charts::favorites_vs_episodes_scatter(ui, &view);
    ui.separator();

    ui.heading("Heatmap of Favorites by Themes and Demographics");
    charts::theme_demographic_heatmap(ui, &view);
    ui.separator();

    ui.heading("Filtered Anime Data");
    table::filtered_table(ui, &view);
}
