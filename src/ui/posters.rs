use std::path::{Path, PathBuf};

use eframe::egui::{self, ScrollArea, Ui};

use crate::data::aggregate;
use crate::data::filter::FilteredView;
use crate::data::model::{AnimeDataset, NumericField};

/// Directory of poster images, looked up as `posters/<Name>.jpg`.
const POSTER_DIR: &str = "posters";

// ---------------------------------------------------------------------------
// Top-10 ranked poster strip
// ---------------------------------------------------------------------------

/// The ten best-ranked titles of the whole catalog, posters and scores.
/// Deliberately unfiltered: this strip always shows the all-time list.
pub fn top_ranked_strip(ui: &mut Ui, dataset: &AnimeDataset) {
    let all = FilteredView::all(dataset);
    let mut ranked = aggregate::rank_ordered(&all, NumericField::Ranked, true);
    ranked.truncate(10);

    if ranked.is_empty() {
        ui.weak("No ranking data available.");
        return;
    }

    ScrollArea::horizontal()
        .id_salt("top_ranked_strip")
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                for (position, record) in ranked.iter().enumerate() {
                    ui.vertical(|ui: &mut Ui| {
                        ui.set_width(110.0);
                        match poster_path(&record.name) {
                            Some(path) => {
                                ui.add(
                                    egui::Image::from_uri(format!(
                                        "file://{}",
                                        path.display()
                                    ))
                                    .max_width(100.0)
                                    .max_height(150.0)
                                    .rounding(4.0),
                                );
                            }
                            // A missing asset never aborts the strip.
                            None => {
                                ui.add_sized([100.0, 150.0], egui::Label::new("no poster"));
                            }
                        }
                        ui.label(truncated_name(&record.name));
                        match record.score {
                            Some(score) => ui.weak(format!("★ {score}/10")),
                            None => ui.weak("★ –/10"),
                        };
                        ui.strong(format!("#{}", position + 1));
                    });
                }
            });
        });
}

/// Poster for a title, falling back to the default poster, falling back to
/// nothing.
fn poster_path(name: &str) -> Option<PathBuf> {
    let path = Path::new(POSTER_DIR).join(format!("{name}.jpg"));
    if path.exists() {
        return Some(path);
    }
    let default = Path::new(POSTER_DIR).join("default.jpg");
    if default.exists() {
        log::debug!("poster for '{name}' missing, using default");
        return Some(default);
    }
    None
}

fn truncated_name(name: &str) -> String {
    if name.chars().count() <= 16 {
        name.to_string()
    } else {
        let head: String = name.chars().take(15).collect();
        format!("{head}…")
    }
}
