use super::common::{self, Trend};
use crate::Result;
use crate::ranking::RankedResult;
use core::fmt::Write;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

/// Narrowest the package column gets, however small the terminal.
const MIN_NAME_WIDTH: usize = 12;

const COLUMN_GAP: &str = "  ";

struct Row<'a> {
    rank: String,
    name: &'a str,
    count: String,
    delta: String,
    percent: String,
    trend: Trend,
}

/// Write the ranking as a table sized to the terminal.
pub fn generate<W: Write>(ranked: &RankedResult, use_colors: bool, writer: &mut W) -> Result<()> {
    generate_with_width(ranked, use_colors, get_terminal_width(), writer)
}

/// Write the ranking as a table at most `width` columns wide, when names allow.
pub fn generate_with_width<W: Write>(ranked: &RankedResult, use_colors: bool, width: usize, writer: &mut W) -> Result<()> {
    if ranked.is_empty() {
        return Ok(());
    }

    let window = ranked.window();
    let with_change = common::has_baseline(window);

    let rows: Vec<Row<'_>> = ranked
        .iter()
        .enumerate()
        .map(|(index, package)| {
            let stat = package.counts.get(window);
            Row {
                rank: (index + 1).to_string(),
                name: package.name.as_str(),
                count: common::format_count(stat.count),
                delta: common::format_delta(stat.delta),
                percent: common::format_percent(stat.percent),
                trend: Trend::from(stat),
            }
        })
        .collect();

    let heading = common::window_heading(window);
    let rank_width = column_width("#", rows.iter().map(|r| r.rank.len()));
    let count_width = column_width(heading, rows.iter().map(|r| r.count.len()));
    let delta_width = column_width("Change", rows.iter().map(|r| r.delta.len()));
    let percent_width = column_width("Percent", rows.iter().map(|r| r.percent.len()));

    // Rank and count columns, plus the change columns when shown
    let mut fixed_width = rank_width + COLUMN_GAP.len() * 2 + count_width;
    if with_change {
        fixed_width += COLUMN_GAP.len() * 2 + delta_width + percent_width;
    }

    let widest_name = column_width("Package", rows.iter().map(|r| r.name.chars().count()));
    let name_width = widest_name.min(width.saturating_sub(fixed_width).max(MIN_NAME_WIDTH));

    let mut header = format!("{:>rank_width$}{COLUMN_GAP}{:<name_width$}{COLUMN_GAP}{heading:>count_width$}", "#", "Package");
    if with_change {
        write!(header, "{COLUMN_GAP}{:>delta_width$}{COLUMN_GAP}{:>percent_width$}", "Change", "Percent")?;
    }

    if use_colors {
        writeln!(writer, "{}", header.bold())?;
    } else {
        writeln!(writer, "{header}")?;
    }

    for row in &rows {
        let name = truncate(row.name, name_width);
        write!(
            writer,
            "{:>rank_width$}{COLUMN_GAP}{name:<name_width$}{COLUMN_GAP}{:>count_width$}",
            row.rank, row.count
        )?;

        if with_change {
            let change = format!("{:>delta_width$}{COLUMN_GAP}{:>percent_width$}", row.delta, row.percent);
            if use_colors {
                match row.trend {
                    Trend::Up => write!(writer, "{COLUMN_GAP}{}", change.green())?,
                    Trend::Down => write!(writer, "{COLUMN_GAP}{}", change.red())?,
                    Trend::Flat => write!(writer, "{COLUMN_GAP}{}", change.dimmed())?,
                }
            } else {
                write!(writer, "{COLUMN_GAP}{change}")?;
            }
        }

        writeln!(writer)?;
    }

    Ok(())
}

fn column_width(heading: &str, values: impl Iterator<Item = usize>) -> usize {
    values.fold(heading.len(), usize::max)
}

/// Shorten `name` to `width` characters, marking the cut with an ellipsis.
fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }

    let mut truncated: String = name.chars().take(width.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

/// Get the terminal width, defaulting to 80 if not detectable
fn get_terminal_width() -> usize {
    terminal_size().map_or(80, |(Width(w), _)| usize::from(w))
}
