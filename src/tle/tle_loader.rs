use std::fs;
use std::path::{Path, PathBuf};

use sgp4::Elements;

use crate::solver::{SolverError, TrackedObject};
use crate::tle::error::TleError;
use crate::tle::orbit::Sgp4Orbit;

/// Loads a catalog from a TLE file, or from every `.tle`/`.txt` file in a
/// directory in file-name order.
pub struct TleLoader {
    path: PathBuf,
}

impl TleLoader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// All records, in file order. Any bad record fails the whole load.
    pub fn load(&self) -> Result<Vec<TrackedObject<Sgp4Orbit>>, SolverError> {
        let files = if self.path.is_dir() {
            self.catalog_files()?
        } else {
            vec![self.path.clone()]
        };

        let mut objects = Vec::new();
        for file in &files {
            let content = fs::read_to_string(file).map_err(|e| {
                SolverError::Propagation(format!("{}: {}", file.display(), TleError::from(e)))
            })?;
            let parsed = parse_catalog(&content)
                .map_err(|e| SolverError::Propagation(format!("{}: {}", file.display(), e)))?;
            log::debug!("Loaded {} element sets from {}", parsed.len(), file.display());
            objects.extend(parsed);
        }

        log::info!("Loaded {} satellites from {}", objects.len(), self.path.display());
        Ok(objects)
    }

    fn catalog_files(&self) -> Result<Vec<PathBuf>, TleError> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let path = entry?.path();
            if path.is_file() && has_catalog_extension(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

fn has_catalog_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tle") | Some("txt")
    )
}

/// Parse 2-line or 3-line TLE records. Blank lines are ignored.
pub fn parse_catalog(content: &str) -> Result<Vec<TrackedObject<Sgp4Orbit>>, TleError> {
    split_records(content)?
        .into_iter()
        .map(build_object)
        .collect()
}

struct Record<'a> {
    line: usize,
    name: Option<&'a str>,
    line1: &'a str,
    line2: &'a str,
}

fn split_records(content: &str) -> Result<Vec<Record<'_>>, TleError> {
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(n, l)| (n + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect();

    let invalid = |line: usize, message: &str| TleError::InvalidRecord {
        line,
        message: message.into(),
    };

    let mut records = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let (number, text) = lines[i];
        let next = lines.get(i + 1).map(|(_, l)| *l);

        if text.starts_with("1 ") {
            match next {
                Some(l2) if l2.starts_with("2 ") => {
                    records.push(Record {
                        line: number,
                        name: None,
                        line1: text,
                        line2: l2,
                    });
                    i += 2;
                }
                _ => return Err(invalid(number, "line 1 is not followed by line 2")),
            }
        } else if text.starts_with("2 ") {
            return Err(invalid(number, "line 2 without a preceding line 1"));
        } else {
            let after = lines.get(i + 2).map(|(_, l)| *l);
            match (next, after) {
                (Some(l1), Some(l2)) if l1.starts_with("1 ") && l2.starts_with("2 ") => {
                    let name = text.strip_prefix("0 ").unwrap_or(text).trim();
                    records.push(Record {
                        line: number,
                        name: Some(name),
                        line1: l1,
                        line2: l2,
                    });
                    i += 3;
                }
                _ => return Err(invalid(number, "incomplete record")),
            }
        }
    }

    Ok(records)
}

fn build_object(record: Record<'_>) -> Result<TrackedObject<Sgp4Orbit>, TleError> {
    let invalid = |message: String| TleError::InvalidRecord {
        line: record.line,
        message,
    };

    let elements = Elements::from_tle(
        record.name.map(String::from),
        record.line1.as_bytes(),
        record.line2.as_bytes(),
    )
    .map_err(|e| invalid(e.to_string()))?;

    let norad_id = elements.norad_id;
    let name = elements
        .object_name
        .clone()
        .unwrap_or_else(|| format!("NORAD {}", norad_id));
    let source = Sgp4Orbit::new(elements).map_err(|e| invalid(e.to_string()))?;

    Ok(TrackedObject {
        norad_id,
        name,
        source,
    })
}
