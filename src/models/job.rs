//! Job reference model and sheet-name resolution.

/// Longest job name kept for a sheet title.
pub const SHEET_NAME_CHARS: usize = 20;

/// Path appended to a build URL to reach its test-report API.
pub const TEST_REPORT_QUERY: &str =
    "testReport/api/json?pretty=true&tree=suites[cases[className,name,status,errorDetails]]";

/// Fallback sheet name when a job URL has no recognizable job segment.
const UNNAMED_JOB: &str = "job";

/// URL of one build of a CI job, always ending with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRef(String);

impl JobRef {
    /// Parse a raw URL, trimming whitespace and appending a trailing `/` if missing.
    ///
    /// Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let url = raw.trim();
        if url.is_empty() {
            return None;
        }
        if url.ends_with('/') {
            Some(Self(url.to_string()))
        } else {
            Some(Self(format!("{}/", url)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Test-report API endpoint for this build.
    pub fn report_url(&self) -> String {
        format!("{}{}", self.0, TEST_REPORT_QUERY)
    }

    /// Job identifier segment of a `.../job/<name>/<build>/` URL.
    ///
    /// Counts from the end of the `/`-split URL, so the trailing empty
    /// segment is included: for `http://jenkins/view/xyz/job/your-project/10042/`
    /// the result is `your-project`.
    pub fn short_name(&self) -> Option<&str> {
        let parts: Vec<&str> = self.0.split('/').collect();
        if parts.len() < 3 {
            return None;
        }
        let name = parts[parts.len() - 3];
        (!name.is_empty()).then_some(name)
    }

    /// Short name cut to its trailing [`SHEET_NAME_CHARS`] characters.
    pub fn sheet_name(&self) -> String {
        match self.short_name() {
            Some(name) => truncate_tail(name, SHEET_NAME_CHARS).to_string(),
            None => UNNAMED_JOB.to_string(),
        }
    }
}

impl std::fmt::Display for JobRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keep at most the last `max_chars` characters of `s`.
pub fn truncate_tail(s: &str, max_chars: usize) -> &str {
    let total = s.chars().count();
    if total <= max_chars {
        return s;
    }
    let skip = total - max_chars;
    match s.char_indices().nth(skip) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}
