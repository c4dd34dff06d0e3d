//! Plain-text rendering of a [`Dashboard`].
//!
//! Cards are boxed blocks laid out side by side; the trend is a marker plot
//! with one column per sample.

use std::fmt::Write as _;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use weather_core::view::{Dashboard, TrendChart};

const CARD_WIDTH: usize = 24;
const CHART_HEIGHT: usize = 10;
const MARKER: char = '●';

pub fn dashboard(d: &Dashboard) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n📍 {}\n", d.location);

    let current = [
        card(
            "🌡 Temperature",
            &[
                d.current.temperature.clone(),
                format!("{} {}", d.current.icon, d.current.description),
            ],
        ),
        card(
            "💧 Humidity & Wind",
            &[format!("💧 {}", d.atmosphere.humidity), format!("💨 {}", d.atmosphere.wind)],
        ),
        card(
            "🌅 Sunrise & Sunset",
            &[format!("🌄 {}", d.sun.sunrise), format!("🌇 {}", d.sun.sunset)],
        ),
    ];
    out.push_str(&row(&current));

    let _ = writeln!(out, "\n🔮 5-Day Forecast");
    let daily: Vec<Vec<String>> = d
        .daily
        .iter()
        .map(|c| {
            let lines =
                [c.icon.to_string(), c.description.clone(), format!("🌡️ {}", c.temperature)];
            card(&c.date, &lines)
        })
        .collect();
    out.push_str(&row(&daily));

    let _ = writeln!(out, "\n📈 Temperature Trend (Next 5 Days)");
    out.push_str(&trend_chart(&d.trend, CHART_HEIGHT));

    let _ = writeln!(out, "\n🕒 Hourly Forecast (Next 12 Hours)");
    let hourly: Vec<Vec<String>> = d
        .hourly
        .iter()
        .map(|c| card(&c.time, &[c.icon.to_string(), c.temperature.clone(), c.category.clone()]))
        .collect();
    out.push_str(&row(&hourly));

    out
}

/// A boxed card, one entry per line.
fn card(title: &str, lines: &[String]) -> Vec<String> {
    let inner = CARD_WIDTH - 2;
    let mut block = Vec::with_capacity(lines.len() + 4);

    block.push(format!("┌{}┐", "─".repeat(CARD_WIDTH)));
    block.push(format!("│ {} │", fit(title, inner)));
    block.push(format!("├{}┤", "─".repeat(CARD_WIDTH)));
    for line in lines {
        block.push(format!("│ {} │", fit(line, inner)));
    }
    block.push(format!("└{}┘", "─".repeat(CARD_WIDTH)));

    block
}

/// Pad or cut `text` to exactly `width` terminal columns.
fn fit(text: &str, width: usize) -> String {
    let len = text.width();
    if len <= width {
        return format!("{text}{}", " ".repeat(width - len));
    }

    // Leave one column for the ellipsis.
    let budget = width.saturating_sub(1);
    let mut cut = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        cut.push(c);
        used += w;
    }

    format!("{cut}…{}", " ".repeat(budget - used))
}

/// Lay cards out side by side; shorter cards are padded with blanks.
fn row(cards: &[Vec<String>]) -> String {
    let height = cards.iter().map(Vec::len).max().unwrap_or(0);
    let blank = " ".repeat(CARD_WIDTH + 2);
    let mut out = String::new();

    for i in 0..height {
        let line: Vec<&str> = cards
            .iter()
            .map(|c| c.get(i).map(String::as_str).unwrap_or(blank.as_str()))
            .collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }

    out
}

pub fn trend_chart(chart: &TrendChart, height: usize) -> String {
    let points = &chart.points;
    let mut out = String::new();

    if points.is_empty() || height == 0 {
        let _ = writeln!(out, "(no data)");
        return out;
    }

    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.temperature), hi.max(p.temperature))
        });
    let span = max - min;

    // Row 0 is the top of the plot.
    let row_of = |t: f64| -> usize {
        if span <= f64::EPSILON {
            return height / 2;
        }
        let scaled = ((max - t) / span * (height - 1) as f64).round() as usize;
        scaled.min(height - 1)
    };

    let mut grid = vec![vec![' '; points.len()]; height];
    for (col, p) in points.iter().enumerate() {
        grid[row_of(p.temperature)][col] = MARKER;
    }

    let _ = writeln!(out, "{}", chart.y_label);
    for (i, cells) in grid.iter().enumerate() {
        let label = if i == 0 {
            format!("{max:>7.1}")
        } else if i == height - 1 {
            format!("{min:>7.1}")
        } else {
            " ".repeat(7)
        };
        let line: String = cells.iter().collect();
        let _ = writeln!(out, "{label} ┤{}", line.trim_end());
    }
    let _ = writeln!(out, "{} └{}", " ".repeat(7), "─".repeat(points.len()));

    let first = &points[0].time;
    let last = &points[points.len() - 1].time;
    let _ = writeln!(
        out,
        "{}  {} → {}",
        " ".repeat(7),
        first.format("%a %d %b %H:%M"),
        last.format("%a %d %b %H:%M")
    );

    out
}
