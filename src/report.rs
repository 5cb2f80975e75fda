use std::fmt::Write;

use chrono::FixedOffset;
use strum_macros::{Display, EnumString};

use crate::solver::Solution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn render(
    solution: &Solution,
    format: OutputFormat,
    offset: FixedOffset,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(solution, offset)),
        OutputFormat::Json => serde_json::to_string_pretty(solution),
    }
}

pub fn render_text(solution: &Solution, offset: FixedOffset) -> String {
    let mut out = String::new();

    let name_width = solution
        .visible
        .iter()
        .map(|v| v.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let _ = writeln!(out, "{:<name_width$}  NORAD ID", "NAME");
    for object in &solution.visible {
        let _ = writeln!(out, "{:<name_width$}  {}", object.name, object.norad_id);
    }
    let _ = writeln!(out, "Visible satellites: {}", solution.visible.len());

    if let Some(nearest) = &solution.nearest {
        let _ = writeln!(out, "Nearest visible satellite:");
        let _ = writeln!(out, "NORAD ID: {}, NAME: {}", nearest.norad_id, nearest.name);
        let _ = writeln!(out, "Seen at: {}", nearest.time.with_timezone(&offset));
        let _ = writeln!(out, "Distance: {:.2} km", nearest.distance_km);
        let _ = writeln!(out, "Elevation: {:.2}°", nearest.elevation_deg);
        let _ = writeln!(out, "Azimuth: {:.2}°", nearest.azimuth_deg);
    }

    out
}
