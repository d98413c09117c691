use std::path::Path as FilePath;

use svg::{
    node::element::{path::Data, Line, Path},
    Document,
};

use crate::amount::Amount;
use crate::report::DailyTotals;

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 500.0;
const MARGIN: f64 = 20.0;
const STROKE_WIDTH: f64 = 2.0;

/// Writes the income, expense and net lines to `file`. Returns `false`
/// without touching the file when there is nothing to draw.
pub fn render(totals: &DailyTotals, file: &FilePath) -> std::io::Result<bool> {
    if totals.is_empty() {
        return Ok(false);
    }
    svg::save(file, &document(totals))?;
    Ok(true)
}

fn document(totals: &DailyTotals) -> Document {
    let all = || totals.income.iter().chain(&totals.expense).chain(&totals.net);
    // Keep zero in view so the x axis is always drawn.
    let ymin = all().copied().min().unwrap_or_default().min(Amount::ZERO).as_f64();
    let ymax = all().copied().max().unwrap_or_default().max(Amount::ZERO).as_f64();
    let yspan = if ymax > ymin { ymax - ymin } else { 1.0 };
    let xspan = (totals.days.len().max(2) - 1) as f64;

    let resize_x = |i: usize| i as f64 / xspan * WIDTH;
    let resize_y = |y: f64| (ymax - y) / yspan * HEIGHT;

    let line = |points: &[Amount], color: &str, label: &str| {
        let mut data = Data::new().move_to((resize_x(0), resize_y(points[0].as_f64())));
        for (i, point) in points.iter().enumerate().skip(1) {
            data = data.line_to((resize_x(i), resize_y(point.as_f64())));
        }
        Path::new()
            .set("fill", "none")
            .set("stroke", color)
            .set("stroke-width", STROKE_WIDTH)
            .set("class", label)
            .set("d", data)
    };

    let yaxis = Line::new()
        .set("x1", 0.0)
        .set("x2", 0.0)
        .set("y1", 0.0)
        .set("y2", HEIGHT)
        .set("stroke", "black")
        .set("stroke-width", STROKE_WIDTH);
    let xaxis = Line::new()
        .set("x1", 0.0)
        .set("x2", WIDTH)
        .set("y1", resize_y(0.0))
        .set("y2", resize_y(0.0))
        .set("stroke", "black")
        .set("stroke-width", STROKE_WIDTH);

    Document::new()
        .set(
            "viewBox",
            (-MARGIN, -MARGIN, WIDTH + 2.0 * MARGIN, HEIGHT + 2.0 * MARGIN),
        )
        .add(xaxis)
        .add(yaxis)
        .add(line(&totals.income, "green", "Income"))
        .add(line(&totals.expense, "red", "Expense"))
        .add(line(&totals.net, "gold", "Net"))
}
