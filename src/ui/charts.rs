use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, pos2, vec2};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Points, Text};

use crate::color::{self, CategoryColors};
use crate::data::aggregate;
use crate::data::filter::FilteredView;
use crate::data::model::{NumericField, TokenField};

// ---------------------------------------------------------------------------
// Chart widgets
// ---------------------------------------------------------------------------
//
// Each widget takes a FilteredView and renders one visualization. An empty
// view is a normal input everywhere: the widget shows a placeholder instead
// of a chart and never fails.

fn no_data(ui: &mut Ui) {
    ui.weak("No data for the current filters.");
}

// ---- Metrics row ----------------------------------------------------------

/// Three summary tiles: top anime by favorites, total favorites, total
/// episodes over the filtered view.
pub fn metrics_row(ui: &mut Ui, view: &FilteredView<'_>) {
    let top_name = aggregate::top_n(view, NumericField::Favorites, 1)
        .first()
        .map(|r| r.name.clone());
    let total_favorites = aggregate::numeric_sum(view, NumericField::Favorites);
    let total_episodes = aggregate::numeric_sum(view, NumericField::Episodes);

    ui.columns(3, |cols| {
        metric(
            &mut cols[0],
            "Top Anime",
            top_name.unwrap_or_else(|| "No Data".to_string()),
        );
        metric(
            &mut cols[1],
            "Total Favorites (Filtered)",
            format!("{total_favorites:.0}"),
        );
        metric(
            &mut cols[2],
            "Total Episodes (Filtered)",
            format!("{total_episodes:.0}"),
        );
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.weak(label);
            ui.heading(value);
        });
    });
}

// ---- Horizontal top-N bar charts ------------------------------------------

/// Top 10 by favorites, bars coloured by each record's first genre.
pub fn top_favorites_bar(ui: &mut Ui, id: &str, view: &FilteredView<'_>, colors: &CategoryColors) {
    let entries: Vec<(String, f64, Color32)> =
        aggregate::top_n(view, NumericField::Favorites, 10)
            .into_iter()
            .map(|r| {
                let color = r
                    .genres
                    .first()
                    .map(|g| colors.get(g))
                    .unwrap_or(Color32::LIGHT_BLUE);
                (r.name.clone(), r.favorites.unwrap_or(0.0), color)
            })
            .collect();
    horizontal_bar_chart(ui, id, &entries);
}

/// The 10 most popular records (best Popularity rank first), plotted by
/// member count.
pub fn top_popular_bar(ui: &mut Ui, id: &str, view: &FilteredView<'_>, colors: &CategoryColors) {
    let mut ranked = aggregate::rank_ordered(view, NumericField::Popularity, true);
    ranked.truncate(10);
    let entries: Vec<(String, f64, Color32)> = ranked
        .into_iter()
        .map(|r| {
            let color = r
                .genres
                .first()
                .map(|g| colors.get(g))
                .unwrap_or(Color32::LIGHT_BLUE);
            (r.name.clone(), r.members.unwrap_or(0.0), color)
        })
        .collect();
    horizontal_bar_chart(ui, id, &entries);
}

/// Horizontal bars, best entry on top, name drawn at the end of each bar.
fn horizontal_bar_chart(ui: &mut Ui, id: &str, entries: &[(String, f64, Color32)]) {
    if entries.is_empty() {
        no_data(ui);
        return;
    }

    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, (name, value, color))| {
            Bar::new((entries.len() - 1 - i) as f64, *value)
                .width(0.7)
                .fill(*color)
                .name(name)
        })
        .collect();

    Plot::new(id.to_string())
        .height(320.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
            for (i, (name, value, _)) in entries.iter().enumerate() {
                let y = (entries.len() - 1 - i) as f64;
                plot_ui.text(
                    Text::new(PlotPoint::new(*value, y), format!("  {name}"))
                        .anchor(Align2::LEFT_CENTER),
                );
            }
        });
}

// ---- Pie chart ------------------------------------------------------------

/// Demographics distribution as a pie with a side legend.
pub fn demographics_pie(ui: &mut Ui, view: &FilteredView<'_>) {
    let counts = aggregate::token_counts(view, TokenField::Demographics);
    if counts.is_empty() {
        no_data(ui);
        return;
    }

    let palette = color::generate_palette(counts.len());
    let total: usize = counts.iter().map(|(_, c)| c).sum();

    let height = 220.0_f32;
    let (response, painter) =
        ui.allocate_painter(vec2(ui.available_width().min(460.0), height), Sense::hover());
    let rect = response.rect;

    let radius = height / 2.0 - 8.0;
    let center = pos2(rect.left() + radius + 8.0, rect.center().y);

    // Slices as small triangle fans: sectors wider than a half turn are not
    // convex, triangles always are.
    let mut angle = -std::f32::consts::FRAC_PI_2;
    for ((_, count), color) in counts.iter().zip(&palette) {
        let sweep = *count as f32 / total as f32 * std::f32::consts::TAU;
        let steps = (sweep / 0.1).ceil().max(1.0) as usize;
        for step in 0..steps {
            let a0 = angle + sweep * step as f32 / steps as f32;
            let a1 = angle + sweep * (step + 1) as f32 / steps as f32;
            painter.add(egui::Shape::convex_polygon(
                vec![
                    center,
                    center + radius * vec2(a0.cos(), a0.sin()),
                    center + radius * vec2(a1.cos(), a1.sin()),
                ],
                *color,
                Stroke::NONE,
            ));
        }
        angle += sweep;
    }

    // Legend
    let mut legend_y = rect.top() + 10.0;
    let legend_x = center.x + radius + 20.0;
    for ((name, count), color) in counts.iter().zip(&palette) {
        painter.rect_filled(
            egui::Rect::from_min_size(pos2(legend_x, legend_y), vec2(10.0, 10.0)),
            2.0,
            *color,
        );
        let share = 100.0 * *count as f32 / total as f32;
        painter.text(
            pos2(legend_x + 16.0, legend_y + 5.0),
            Align2::LEFT_CENTER,
            format!("{name} ({share:.1}%)"),
            FontId::proportional(12.0),
            ui.visuals().text_color(),
        );
        legend_y += 16.0;
        if legend_y > rect.bottom() - 10.0 {
            break;
        }
    }
}

// ---- Scatter --------------------------------------------------------------

/// Favorites vs episodes, points heat-coloured by favorites.
pub fn favorites_vs_episodes_scatter(ui: &mut Ui, view: &FilteredView<'_>) {
    let points: Vec<(&str, f64, f64)> = view
        .records()
        .filter_map(|r| Some((r.name.as_str(), r.episodes?, r.favorites?)))
        .collect();
    if points.is_empty() {
        no_data(ui);
        return;
    }

    let max_favorites = points.iter().fold(0.0_f64, |acc, p| acc.max(p.2));

    Plot::new("favorites_vs_episodes")
        .height(320.0)
        .x_axis_label("Number of Episodes")
        .y_axis_label("Favorites")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (name, episodes, favorites) in &points {
                let t = if max_favorites > 0.0 {
                    (favorites / max_favorites) as f32
                } else {
                    0.0
                };
                plot_ui.points(
                    Points::new(vec![[*episodes, *favorites]])
                        .radius(3.5)
                        .color(color::heat(t))
                        .name(*name),
                );
            }
        });
}

// ---- Heatmap --------------------------------------------------------------

/// Theme × demographic favorites heatmap. Cells without any co-occurrence
/// stay neutral gray, which is deliberately different from a 0.0 sum (the
/// cold end of the ramp).
pub fn theme_demographic_heatmap(ui: &mut Ui, view: &FilteredView<'_>) {
    let table = aggregate::pivot_sum(
        view,
        TokenField::Themes,
        TokenField::Demographics,
        NumericField::Favorites,
    );
    if table.is_empty() {
        no_data(ui);
        return;
    }

    let mut rows: Vec<&str> = table.keys().map(|(r, _)| r.as_str()).collect();
    rows.dedup();
    let mut cols: Vec<&str> = table.keys().map(|(_, c)| c.as_str()).collect();
    cols.sort();
    cols.dedup();

    let max_value = table.values().fold(0.0_f64, |acc, v| acc.max(*v));

    let label_width = 130.0_f32;
    let header_height = 22.0_f32;
    let cell_height = 22.0_f32;
    let cell_width =
        ((ui.available_width() - label_width - 8.0) / cols.len() as f32).clamp(30.0, 140.0);

    let size = vec2(
        label_width + cell_width * cols.len() as f32 + 8.0,
        header_height + cell_height * rows.len() as f32 + 4.0,
    );
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(11.0);

    for (ci, col) in cols.iter().enumerate() {
        painter.text(
            pos2(
                origin.x + label_width + (ci as f32 + 0.5) * cell_width,
                origin.y + header_height / 2.0,
            ),
            Align2::CENTER_CENTER,
            truncated(col, 14),
            font.clone(),
            text_color,
        );
    }

    for (ri, row) in rows.iter().enumerate() {
        let y = origin.y + header_height + ri as f32 * cell_height;
        painter.text(
            pos2(origin.x + label_width - 6.0, y + cell_height / 2.0),
            Align2::RIGHT_CENTER,
            truncated(row, 18),
            font.clone(),
            text_color,
        );

        for (ci, col) in cols.iter().enumerate() {
            let cell = egui::Rect::from_min_size(
                pos2(origin.x + label_width + ci as f32 * cell_width, y),
                vec2(cell_width - 2.0, cell_height - 2.0),
            );
            match table.get(&(row.to_string(), col.to_string())) {
                Some(sum) => {
                    let t = if max_value > 0.0 {
                        (sum / max_value) as f32
                    } else {
                        0.0
                    };
                    painter.rect_filled(cell, 2.0, color::heat(t));
                }
                // No co-occurrence at all: neutral, not "cold".
                None => {
                    painter.rect_filled(cell, 2.0, Color32::from_gray(45));
                }
            }
        }
    }
}

fn truncated(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

// ---- Genre bubbles --------------------------------------------------------

/// One bubble per genre, sized and positioned by how many records carry it.
pub fn genre_bubble_chart(ui: &mut Ui, view: &FilteredView<'_>, colors: &CategoryColors) {
    let counts = aggregate::token_counts(view, TokenField::Genres);
    if counts.is_empty() {
        no_data(ui);
        return;
    }

    let max_count = counts.first().map(|(_, c)| *c).unwrap_or(1).max(1);

    Plot::new("genre_bubbles")
        .height(260.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (i, (genre, count)) in counts.iter().enumerate() {
                let x = i as f64;
                let y = *count as f64;
                let radius = 8.0 + 22.0 * (*count as f32 / max_count as f32).sqrt();
                plot_ui.points(
                    Points::new(vec![[x, y]])
                        .radius(radius)
                        .color(colors.get(genre).gamma_multiply(0.6))
                        .name(format!("{genre}: {count}")),
                );
                plot_ui.text(Text::new(PlotPoint::new(x, y), genre.clone()));
            }
        });
}
