use crate::Result;
use crate::ranking::RankedResult;
use chrono::NaiveDate;
use core::fmt::Write;
use serde_json::json;

/// Write the ranking as pretty-printed JSON.
///
/// Every package carries its day, week, and month statistics. The normalized daily
/// series is included only when `include_series` is set.
#[expect(unused_results, reason = "Map::insert on fresh keys never replaces a value")]
pub fn generate<W: Write>(ranked: &RankedResult, reference_date: NaiveDate, include_series: bool, writer: &mut W) -> Result<()> {
    let mut packages = Vec::with_capacity(ranked.len());

    for (index, package) in ranked.iter().enumerate() {
        let mut package_obj = serde_json::Map::new();
        package_obj.insert("rank".to_string(), json!(index + 1));
        package_obj.insert("name".to_string(), json!(package.name.as_str()));
        package_obj.insert("day".to_string(), json!(package.counts.day));
        package_obj.insert("week".to_string(), json!(package.counts.week));
        package_obj.insert("month".to_string(), json!(package.counts.month));

        if include_series {
            package_obj.insert("downloads".to_string(), json!(package.downloads.as_slice()));
        }

        packages.push(json!(package_obj));
    }

    let output = json!({
        "window": ranked.window(),
        "reference_date": reference_date,
        "packages": packages,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
