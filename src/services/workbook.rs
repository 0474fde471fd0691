//! Spreadsheet writer holding one failure summary sheet per job.
//!
//! The whole workbook is kept in memory and only written to disk by
//! [`ReportWriter::close`].

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::{debug, info, warn};

use crate::models::FailureGroup;
use crate::models::failure_group::COLUMNS;

/// Maximum sheet-name length accepted by spreadsheet applications.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

/// Maximum number of characters a single cell can hold.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Characters that may not appear in a sheet name.
const FORBIDDEN_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Workbook errors.
#[derive(Debug, thiserror::Error)]
pub enum WorkbookError {
    #[error("invalid sheet name '{name}': {reason}")]
    InvalidSheetName { name: String, reason: &'static str },

    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),
}

/// What [`ReportWriter::close`] wrote.
#[derive(Debug, Clone)]
pub struct WorkbookSummary {
    pub path: PathBuf,
    pub sheet_names: Vec<String>,
}

/// Accumulates job sheets and saves them as one `.xlsx` file.
pub struct ReportWriter {
    workbook: Workbook,
    path: PathBuf,
    sheet_names: Vec<String>,
    header_format: Format,
}

impl ReportWriter {
    /// Start a new, empty workbook that will be saved to `path`.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            workbook: Workbook::new(),
            path: path.as_ref().to_path_buf(),
            sheet_names: Vec::new(),
            header_format: Format::new().set_bold(),
        }
    }

    /// Append a sheet with a header row followed by one row per group.
    ///
    /// Returns the sheet name actually used, which differs from `name` when
    /// it had to be sanitized or disambiguated.
    pub fn write_sheet(
        &mut self,
        name: &str,
        groups: &[FailureGroup],
    ) -> Result<String, WorkbookError> {
        let sanitized = sanitize_sheet_name(name)?;
        let sheet_name = unique_sheet_name(&sanitized, &self.sheet_names);
        if sheet_name != name {
            debug!("Sheet name '{}' stored as '{}'", name, sheet_name);
        }

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&sheet_name)?;

        for (col, header) in COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &self.header_format)?;
        }

        for (i, group) in groups.iter().enumerate() {
            let row = (i + 1) as u32;
            worksheet.write_string(row, 0, cell_text(&group.class_name, &sheet_name, row))?;
            worksheet.write_number(row, 1, group.count as f64)?;
            if let Some(details) = &group.error_details {
                worksheet.write_string(row, 2, cell_text(details, &sheet_name, row))?;
            }
        }

        info!("Wrote sheet '{}' with {} row(s)", sheet_name, groups.len());
        self.sheet_names.push(sheet_name.clone());
        Ok(sheet_name)
    }

    /// Save the workbook to disk.
    pub fn close(mut self) -> Result<WorkbookSummary, WorkbookError> {
        self.workbook.save(&self.path)?;
        Ok(WorkbookSummary {
            path: self.path,
            sheet_names: self.sheet_names,
        })
    }
}

/// Cut `text` to [`MAX_CELL_CHARS`], keeping its beginning.
fn cell_text<'a>(text: &'a str, sheet: &str, row: u32) -> Cow<'a, str> {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => {
            warn!(
                "Truncated {} character cell in sheet '{}' row {} to {}",
                text.chars().count(),
                sheet,
                row,
                MAX_CELL_CHARS
            );
            Cow::Owned(text[..end].to_string())
        }
        None => Cow::Borrowed(text),
    }
}

/// Output file name for a run started at `now`: `YYYYMMDDHHMMSS.xlsx`.
pub fn output_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}.xlsx", now.format("%Y%m%d%H%M%S"))
}

/// Make `name` acceptable as a sheet title.
///
/// Forbidden characters and leading/trailing apostrophes become `_`, an empty
/// name becomes `job`, and the reserved `History` gets a `_` suffix.
pub fn sanitize_sheet_name(name: &str) -> Result<String, WorkbookError> {
    if name.chars().count() > MAX_SHEET_NAME_CHARS {
        return Err(WorkbookError::InvalidSheetName {
            name: name.to_string(),
            reason: "longer than 31 characters",
        });
    }

    let mut sanitized: String = name
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '_' } else { c })
        .collect();

    if sanitized.starts_with('\'') {
        sanitized.replace_range(..1, "_");
    }
    if sanitized.ends_with('\'') {
        let last = sanitized.len() - 1;
        sanitized.replace_range(last.., "_");
    }

    if sanitized.is_empty() {
        return Ok("job".to_string());
    }
    if sanitized.eq_ignore_ascii_case("history") {
        sanitized.push('_');
    }
    Ok(sanitized)
}

/// Append `_2`, `_3`, ... until `name` differs from every existing name.
///
/// Comparison ignores case, as spreadsheet applications do. The base is
/// shortened when needed so the result fits in [`MAX_SHEET_NAME_CHARS`].
pub fn unique_sheet_name(name: &str, existing: &[String]) -> String {
    let taken = |candidate: &str| {
        let candidate = candidate.to_lowercase();
        existing.iter().any(|e| e.to_lowercase() == candidate)
    };

    if !taken(name) {
        return name.to_string();
    }

    let mut n = 2usize;
    loop {
        let suffix = format!("_{}", n);
        let room = MAX_SHEET_NAME_CHARS - suffix.len();
        let base: String = name.chars().take(room).collect();
        let candidate = format!("{}{}", base, suffix);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
