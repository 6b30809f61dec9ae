use crate::Result;
use crate::ranking::{RankedResult, WindowStat};
use core::fmt::Write;
use std::borrow::Cow;

const HEADER: &str = "Rank,Package,Day,Day Change,Day Percent,Week,Week Change,Week Percent,Month";

/// Write the ranking as CSV, one row per package in rank order.
pub fn generate<W: Write>(ranked: &RankedResult, writer: &mut W) -> Result<()> {
    writeln!(writer, "{HEADER}")?;

    for (index, package) in ranked.iter().enumerate() {
        write!(writer, "{},{}", index + 1, escape_csv(&package.name))?;
        write_comparison(writer, &package.counts.day)?;
        write_comparison(writer, &package.counts.week)?;
        writeln!(writer, ",{}", package.counts.month.count)?;
    }

    Ok(())
}

fn write_comparison<W: Write>(writer: &mut W, stat: &WindowStat) -> Result<()> {
    write!(writer, ",{},{},{:.2}", stat.count, stat.delta, stat.percent)?;
    Ok(())
}

/// Escape a value for RFC compliant CSV output.
///
/// Wraps the value in double quotes if it contains commas, newlines, or double quotes.
/// Internal double quotes are doubled per the RFC.
fn escape_csv(s: &str) -> Cow<'_, str> {
    if s.contains('"') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else if s.contains(',') || s.contains('\n') || s.contains('\r') {
        Cow::Owned(format!("\"{s}\""))
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::{DownloadSeries, Package, Window, WindowCounts};

    fn package(name: &str, day: WindowStat, week: WindowStat, month: u64) -> Package {
        Package {
            name: name.into(),
            downloads: DownloadSeries::default(),
            counts: WindowCounts {
                day,
                week,
                month: WindowStat::without_baseline(month),
            },
        }
    }

    #[test]
    fn test_generate() {
        let ranked = RankedResult::new(
            Window::Week,
            vec![
                package("left-pad", WindowStat::compare(4, 3), WindowStat::compare(20, 30), 100),
                package("is-odd", WindowStat::compare(10, 0), WindowStat::compare(70, 35), 150),
            ],
        );

        let mut output = String::new();
        generate(&ranked, &mut output).unwrap();

        let expected = format!(
            "{HEADER}\n\
             1,is-odd,10,10,0.00,70,35,100.00,150\n\
             2,left-pad,4,1,33.33,20,-10,-33.33,100\n"
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_generate_empty() {
        let mut output = String::new();
        generate(&RankedResult::new(Window::Month, Vec::new()), &mut output).unwrap();
        assert_eq!(output, format!("{HEADER}\n"));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("@scope/pkg"), "@scope/pkg");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv("line\nbreak"), "\"line\nbreak\"");
    }
}
