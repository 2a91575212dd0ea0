// lulla-core/src/fody.rs

//! Strips Fody weaver package references out of `packages.config` files.

use crate::errors::{LullaError, Result};
use crate::paths;
use quick_xml::events::{BytesDecl, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// `packages.config` files two directory levels below the solution directory.
pub const PACKAGES_CONFIG_PATTERN: &str = "*/*/packages.config";

/// Package ids that are removed.
pub const FODY_PACKAGE_IDS: [&str; 2] = ["Costura.Fody", "Fody"];

const PACKAGE_TAG: &[u8] = b"package";

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOutcome {
    pub path: PathBuf,
    pub removed: usize,
    pub rewritten: bool,
}

pub fn packages_configs(solution_dir: &Path) -> impl Iterator<Item = PathBuf> {
    paths::glob(solution_dir, PACKAGES_CONFIG_PATTERN).filter(|path| path.is_file())
}

/// Cleans every `packages.config` under `solution_dir`.
pub fn clean_directory(solution_dir: &Path) -> Result<Vec<CleanOutcome>> {
    packages_configs(solution_dir)
        .map(|path| clean_file(&path))
        .collect()
}

/// Removes Fody references from one file, writing it back only if something
/// was removed.
pub fn clean_file(path: &Path) -> Result<CleanOutcome> {
    debug!(path = %path.display(), "Searching for Fody references");
    let content = fs::read_to_string(path)
        .map_err(|e| LullaError::io(format!("Failed to read {:?}", path), e))?;

    let (cleaned, removed) = strip_packages(&content).map_err(|source| LullaError::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    if removed == 0 {
        return Ok(CleanOutcome {
            path: path.to_path_buf(),
            removed,
            rewritten: false,
        });
    }

    fs::write(path, cleaned)
        .map_err(|e| LullaError::io(format!("Failed to write {:?}", path), e))?;
    info!(path = %path.display(), removed, "Rewrote packages.config");

    Ok(CleanOutcome {
        path: path.to_path_buf(),
        removed,
        rewritten: true,
    })
}

/// Returns the document without Fody `package` elements and how many were
/// dropped. The output always starts with a UTF-8 XML declaration.
///
/// Indentation directly in front of a dropped element is dropped with it, so
/// no blank lines are left behind.
pub fn strip_packages(xml: &str) -> quick_xml::Result<(String, usize)> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;

    let mut removed = 0;
    let mut before_root = true;
    let mut pending_blank: Option<Event<'_>> = None;

    loop {
        let event = reader.read_event()?;
        match event {
            Event::Eof => break,
            // The declaration is replaced by our own.
            Event::Decl(_) => continue,
            Event::Text(ref text) if is_blank(text) => {
                if before_root {
                    continue;
                }
                if let Some(previous) = pending_blank.take() {
                    writer.write_event(previous)?;
                }
                pending_blank = Some(event);
            }
            Event::Empty(ref element) if is_fody_package(element)? => {
                pending_blank = None;
                removed += 1;
            }
            Event::Start(ref element) if is_fody_package(element)? => {
                let end = element.to_end().into_owned();
                reader.read_to_end(end.name())?;
                pending_blank = None;
                removed += 1;
            }
            other => {
                if matches!(other, Event::Start(_) | Event::Empty(_)) {
                    before_root = false;
                }
                if let Some(previous) = pending_blank.take() {
                    writer.write_event(previous)?;
                }
                writer.write_event(other)?;
            }
        }
    }
    if let Some(previous) = pending_blank.take() {
        writer.write_event(previous)?;
    }

    // Input came from a &str and events are copied verbatim.
    let cleaned = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    Ok((cleaned, removed))
}

fn is_blank(text: &BytesText<'_>) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

fn is_fody_package(element: &BytesStart<'_>) -> quick_xml::Result<bool> {
    if element.local_name().as_ref() != PACKAGE_TAG {
        return Ok(false);
    }
    for attribute in element.attributes() {
        let attribute = attribute?;
        if attribute.key.as_ref() == b"id" {
            let id = attribute.unescape_value()?;
            return Ok(FODY_PACKAGE_IDS.contains(&id.as_ref()));
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CONFIG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<packages>
  <package id="Costura.Fody" version="3.1.0" targetFramework="net471" />
  <package id="Fody" version="3.1.3" targetFramework="net471" developmentDependency="true" />
  <package id="NUnit" version="3.10.1" targetFramework="net471" />
</packages>
"#;

    fn project_config(root: &Path, project: &str) -> PathBuf {
        let dir = root.join(project).join(project);
        fs::create_dir_all(&dir).unwrap();
        dir.join("packages.config")
    }

    #[test]
    fn test_strip_removes_both_ids() {
        let (cleaned, removed) = strip_packages(CONFIG).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(
            cleaned,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<packages>\n  \
             <package id=\"NUnit\" version=\"3.10.1\" targetFramework=\"net471\" />\n</packages>\n"
        );
    }

    #[test]
    fn test_strip_keeps_lookalike_ids() {
        let xml = r#"<packages><package id="Fody.Extra" /><package id="fody" /></packages>"#;
        let (_, removed) = strip_packages(xml).unwrap();
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_strip_handles_non_empty_elements() {
        let xml = "<packages>\n  <package id=\"Fody\"><note>x</note></package>\n  <package id=\"A\" />\n</packages>";
        let (cleaned, removed) = strip_packages(xml).unwrap();
        assert_eq!(removed, 1);
        assert!(!cleaned.contains("Fody"));
        assert!(!cleaned.contains("note"));
        assert!(cleaned.contains("<package id=\"A\" />"));
    }

    #[test]
    fn test_clean_file_then_idempotent() {
        let dir = tempdir().unwrap();
        let path = project_config(dir.path(), "Game");
        fs::write(&path, CONFIG).unwrap();

        let first = clean_file(&path).unwrap();
        assert_eq!(first.removed, 2);
        assert!(first.rewritten);
        let after_first = fs::read_to_string(&path).unwrap();
        assert!(!after_first.contains("Fody"));
        assert!(after_first.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));

        let second = clean_file(&path).unwrap();
        assert_eq!(second.removed, 0);
        assert!(!second.rewritten);
        assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
    }

    #[test]
    fn test_untouched_file_is_not_rewritten() {
        let dir = tempdir().unwrap();
        let path = project_config(dir.path(), "Tools");
        // No declaration: rewriting would add one, so equality proves no write.
        let original = "<packages>\n  <package id=\"NUnit\" version=\"3.10.1\" />\n</packages>\n";
        fs::write(&path, original).unwrap();

        let outcome = clean_file(&path).unwrap();
        assert!(!outcome.rewritten);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_clean_directory_uses_two_level_pattern() {
        let dir = tempdir().unwrap();
        let nested = project_config(dir.path(), "Game");
        fs::write(&nested, CONFIG).unwrap();
        // One level too shallow: not matched.
        let shallow = dir.path().join("packages.config");
        fs::write(&shallow, CONFIG).unwrap();

        let outcomes = clean_directory(dir.path()).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].path, nested);
        assert_eq!(fs::read_to_string(&shallow).unwrap(), CONFIG);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = project_config(dir.path(), "Broken");
        fs::write(&path, "<packages><package id=\"Fody\"></packages>").unwrap();
        assert!(matches!(clean_file(&path), Err(LullaError::Xml { .. })));
    }
}
