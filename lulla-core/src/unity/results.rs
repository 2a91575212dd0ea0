// lulla-core/src/unity/results.rs

//! Locating and reading the NUnit-style XML report the Unity test runner
//! leaves behind.

use crate::errors::{LullaError, Result};
use crate::paths;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// File name pattern Unity uses when it picks its own results file.
pub const RESULTS_FILE_PATTERN: &str = "TestResults-*.xml";

const TEST_CASE_TAG: &[u8] = b"test-case";
const PASSED: &str = "Passed";

/// Where the results file is expected to come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsLocation {
    /// The caller asked Unity to write to this (absolute) path.
    ExplicitPath(PathBuf),
    /// Unity chose the name; look for the newest match in the project.
    AutoDiscover,
}

impl ResultsLocation {
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => ResultsLocation::ExplicitPath(path),
            None => ResultsLocation::AutoDiscover,
        }
    }

    /// Resolves the file to read once the run has finished.
    ///
    /// An explicit path wins only if Unity actually wrote it. Otherwise the
    /// newest `TestResults-*.xml` directly inside `project_dir` is used.
    pub fn resolve(&self, project_dir: &Path) -> Option<PathBuf> {
        if let ResultsLocation::ExplicitPath(path) = self {
            if path.is_file() {
                debug!(path = %path.display(), "Using requested results file");
                return Some(path.clone());
            }
            warn!(
                path = %path.display(),
                "Requested results file was not written; searching the project directory"
            );
        }
        newest_results_file(project_dir)
    }
}

/// A results file found by globbing, with the timestamp used to rank it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFileCandidate {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Every `TestResults-*.xml` in `project_dir`, newest first.
///
/// Equal timestamps fall back to descending path order so the choice is
/// stable. Entries whose metadata cannot be read are skipped.
pub fn results_candidates(project_dir: &Path) -> Vec<ResultFileCandidate> {
    let mut candidates: Vec<ResultFileCandidate> = paths::glob(project_dir, RESULTS_FILE_PATTERN)
        .filter(|path| path.is_file())
        .filter_map(|path| match fs::metadata(&path).and_then(|m| m.modified()) {
            Ok(modified) => Some(ResultFileCandidate { path, modified }),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping results file without mtime");
                None
            }
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| b.path.cmp(&a.path))
    });
    candidates
}

/// The most recently modified results file, if any exist.
pub fn newest_results_file(project_dir: &Path) -> Option<PathBuf> {
    let newest = results_candidates(project_dir).into_iter().next();
    match &newest {
        Some(candidate) => info!(path = %candidate.path.display(), "Discovered results file"),
        None => info!(dir = %project_dir.display(), "No results file found"),
    }
    newest.map(|candidate| candidate.path)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestCaseResult {
    Passed,
    /// Failed, Inconclusive, Skipped or anything else, kept verbatim.
    Other(String),
}

impl TestCaseResult {
    pub fn from_attribute(value: &str) -> Self {
        if value == PASSED {
            TestCaseResult::Passed
        } else {
            TestCaseResult::Other(value.to_string())
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, TestCaseResult::Passed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TestCaseResult::Passed => PASSED,
            TestCaseResult::Other(value) => value,
        }
    }
}

/// One `<test-case>` element of a results document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseOutcome {
    pub id: String,
    pub full_name: String,
    pub result: TestCaseResult,
}

pub fn parse_results_file(path: &Path) -> Result<Vec<TestCaseOutcome>> {
    let content = fs::read_to_string(path)
        .map_err(|e| LullaError::io(format!("Failed to read results file {:?}", path), e))?;
    parse_results(&content).map_err(|source| LullaError::Xml {
        path: path.to_path_buf(),
        source,
    })
}

/// Collects every `test-case` element, however deeply it is nested inside
/// suites.
pub fn parse_results(xml: &str) -> quick_xml::Result<Vec<TestCaseOutcome>> {
    let mut reader = Reader::from_str(xml);
    let mut outcomes = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element)
                if element.local_name().as_ref() == TEST_CASE_TAG =>
            {
                outcomes.push(read_test_case(&element)?);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(outcomes)
}

fn read_test_case(element: &BytesStart<'_>) -> quick_xml::Result<TestCaseOutcome> {
    let mut id = String::new();
    let mut full_name = String::new();
    let mut result = String::new();

    for attribute in element.attributes() {
        let attribute = attribute?;
        let value = attribute.unescape_value()?.into_owned();
        match attribute.key.as_ref() {
            b"id" => id = value,
            b"fullname" => full_name = value,
            b"result" => result = value,
            _ => {}
        }
    }

    Ok(TestCaseOutcome {
        id,
        full_name,
        result: TestCaseResult::from_attribute(&result),
    })
}
