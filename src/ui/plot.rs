use std::collections::BTreeMap;

use eframe::egui::{Align2, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::color::{set2, ColorMap};
use crate::data::model::TableView;

const PLOT_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// Scatter plot: Price/Earnings vs Earnings/Share
// ---------------------------------------------------------------------------

/// A plotted company, kept for the hover tooltip.
struct HoverPoint {
    name: String,
    sector: String,
    eps: f64,
    pe: f64,
}

/// Scatter of P/E (x) against EPS (y), one series per sector.
pub fn scatter_plot(ui: &mut Ui, view: &TableView<'_>, color_map: &ColorMap) {
    let mut by_sector: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    let mut hover = Vec::with_capacity(view.len());

    for record in view.iter() {
        if record.price_earnings.is_nan() || record.earnings_per_share.is_nan() {
            continue;
        }
        by_sector
            .entry(record.sector.as_str())
            .or_default()
            .push([record.price_earnings, record.earnings_per_share]);
        hover.push(HoverPoint {
            name: record.name.clone(),
            sector: record.sector.clone(),
            eps: record.earnings_per_share,
            pe: record.price_earnings,
        });
    }

    Plot::new("pe_eps_scatter")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Price/Earnings")
        .y_axis_label("Earnings/Share")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |series, value: &PlotPoint| {
            // Hovering snaps to a plotted point, so match it exactly.
            hover
                .iter()
                .find(|p| p.sector == series && p.pe == value.x && p.eps == value.y)
                .map(|p| {
                    format!(
                        "{}\nSector: {}\nEarnings/Share: {:.2}\nPrice/Earnings: {:.2}",
                        p.name, p.sector, p.eps, p.pe
                    )
                })
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (sector, points) in by_sector {
                let points: PlotPoints = points.into_iter().collect();
                let series = Points::new(points)
                    .name(sector)
                    .color(color_map.color_for(sector))
                    .filled(true)
                    .radius(4.0);
                plot_ui.points(series);
            }
        });
}

// ---------------------------------------------------------------------------
// Horizontal bar chart: companies per sector
// ---------------------------------------------------------------------------

/// Horizontal bars of `counts` (already in descending order), largest on
/// top, each labelled with its count.
pub fn sector_count_chart(ui: &mut Ui, counts: &[(String, usize)]) {
    let n = counts.len();
    // Bar i sits at y = n - 1 - i so the first entry is drawn on top.
    let position = move |i: usize| (n - 1 - i) as f64;

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (sector, count))| {
            Bar::new(position(i), *count as f64)
                .name(sector)
                .fill(set2(i))
                .width(0.7)
        })
        .collect();

    let labels: Vec<String> = counts.iter().rev().map(|(s, _)| s.clone()).collect();

    Plot::new("sector_counts")
        .height(PLOT_HEIGHT)
        .x_axis_label("Count")
        .include_x(0.0)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .y_axis_formatter(move |mark: GridMark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
            for (i, (_, count)) in counts.iter().enumerate() {
                let anchor = PlotPoint::new(*count as f64, position(i));
                let label = Text::new(anchor, RichText::new(format!(" {count}")).strong())
                    .anchor(Align2::LEFT_CENTER);
                plot_ui.text(label);
            }
        });
}
