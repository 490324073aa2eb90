use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::loader;
use crate::data::model::{ScalarField, TokenField};
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel for the active page.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.page {
            Page::Explorer => {
                changed |= option_combo(
                    ui,
                    "rating_filter",
                    "Rating",
                    dataset.scalar_options(ScalarField::Rating),
                    &mut state.explorer.rating,
                );
                changed |= option_combo(
                    ui,
                    "type_filter",
                    "Type",
                    dataset.scalar_options(ScalarField::Kind),
                    &mut state.explorer.kind,
                );
                changed |= option_combo(
                    ui,
                    "status_filter",
                    "Status",
                    dataset.scalar_options(ScalarField::Status),
                    &mut state.explorer.status,
                );
                changed |= option_combo(
                    ui,
                    "demographic_filter",
                    "Demographics",
                    dataset.token_options(TokenField::Demographics),
                    &mut state.explorer.demographic,
                );

                ui.separator();
                match &state.explorer.genre {
                    Some(genre) => {
                        ui.label(format!("Filtered by genre: {genre}"));
                        if ui.small_button("Clear genre").clicked() {
                            state.explorer.genre = None;
                            changed = true;
                        }
                    }
                    None => {
                        ui.weak("Showing all genres");
                    }
                }
            }
            Page::Analytics => {
                changed |= option_combo(
                    ui,
                    "theme_filter",
                    "Select a Genre",
                    dataset.token_options(TokenField::Themes),
                    &mut state.analytics.theme,
                );
                changed |= option_combo(
                    ui,
                    "analytics_demographic",
                    "Select a Demographic",
                    dataset.token_options(TokenField::Demographics),
                    &mut state.analytics.demographic,
                );
                changed |= option_combo(
                    ui,
                    "analytics_type",
                    "Select a Type",
                    dataset.scalar_options(ScalarField::Kind),
                    &mut state.analytics.kind,
                );

                ui.separator();
                ui.strong("Minimum Favorites");
                let (lo, hi) = state.favorites_bounds;
                changed |= ui
                    .add(Slider::new(&mut state.analytics.min_favorites, lo..=hi).integer())
                    .changed();
            }
        });

    if changed {
        state.refilter();
    }
}

/// Combo box over `options` with a leading "All" entry that clears the
/// selection. Returns whether the selection changed.
fn option_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    options: &[String],
    selection: &mut Option<String>,
) -> bool {
    let mut changed = false;

    ui.strong(label);
    egui::ComboBox::from_id_salt(id)
        .width(180.0)
        .selected_text(selection.clone().unwrap_or_else(|| "All".to_string()))
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(selection.is_none(), "All").clicked() {
                *selection = None;
                changed = true;
            }
            for option in options {
                if ui
                    .selectable_label(selection.as_deref() == Some(option), option)
                    .clicked()
                {
                    *selection = Some(option.clone());
                    changed = true;
                }
            }
        });
    ui.add_space(6.0);

    changed
}

// ---------------------------------------------------------------------------
// Genre buttons (Explorer page)
// ---------------------------------------------------------------------------

/// One button per genre; clicking sets the persistent genre criterion.
pub fn genre_buttons(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        return;
    };

    ui.label("Click a genre to filter the data:");
    let mut changed = false;

    ui.horizontal_wrapped(|ui: &mut Ui| {
        if ui.button("All Genres").clicked() {
            state.explorer.genre = None;
            changed = true;
        }
        for genre in dataset.token_options(TokenField::Genres) {
            let selected = state.explorer.genre.as_deref() == Some(genre);
            let text = if selected {
                RichText::new(genre).color(state.genre_colors.get(genre)).strong()
            } else {
                RichText::new(genre)
            };
            if ui.button(text).clicked() {
                state.explorer.genre = Some(genre.clone());
                changed = true;
            }
        }
    });

    if changed {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar: file open, page switch, record counts.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .selectable_label(state.page == Page::Explorer, "Explorer")
            .clicked()
        {
            state.set_page(Page::Explorer);
        }
        if ui
            .selectable_label(state.page == Page::Analytics, "Analytics")
            .clicked()
        {
            state.set_page(Page::Analytics);
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} titles loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open anime catalog")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_file(&path) {
            Ok(dataset) => {
                log::info!("loaded {} titles from {}", dataset.len(), path.display());
                state.set_dataset(Arc::new(dataset));
            }
            Err(e) => {
                log::error!("failed to load catalog: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
