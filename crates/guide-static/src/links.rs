//! Build-time check that root-relative links resolve in the output tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;
use walkdir::WalkDir;

/// A link whose target has no file in the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    /// Page containing the link, relative to the output directory
    pub page: PathBuf,
    /// Link target as written
    pub target: String,
}

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:href|src)="([^"]*)""#).expect("Invalid link regex"));

/// Scan every `.html` file under `output_dir` and return links that do not
/// resolve. External, protocol-relative and fragment-only links are skipped.
pub fn check_links(output_dir: &Path) -> Result<Vec<BrokenLink>, std::io::Error> {
    let pages: Vec<PathBuf> = WalkDir::new(output_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("html"))
        .collect();

    let per_page: Vec<Result<Vec<BrokenLink>, std::io::Error>> = pages
        .par_iter()
        .map(|page| {
            let html = fs::read_to_string(page)?;
            let relative = page.strip_prefix(output_dir).unwrap_or(page).to_path_buf();

            Ok(extract_targets(&html)
                .into_iter()
                .filter(|target| !resolves(output_dir, target))
                .map(|target| BrokenLink {
                    page: relative.clone(),
                    target,
                })
                .collect())
        })
        .collect();

    let mut broken = Vec::new();
    for result in per_page {
        broken.extend(result?);
    }
    broken.sort_by(|a, b| a.page.cmp(&b.page).then_with(|| a.target.cmp(&b.target)));
    broken.dedup();

    Ok(broken)
}

/// Root-relative link targets in `html`, entity-decoded.
fn extract_targets(html: &str) -> Vec<String> {
    LINK_RE
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| decode_entities(m.as_str()))
        .filter(|t| t.starts_with('/') && !t.starts_with("//"))
        .collect()
}

fn decode_entities(value: &str) -> String {
    value
        .replace("&#x2f;", "/")
        .replace("&#x27;", "'")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Whether `target` maps to a file: `/x` resolves to `x`, `x.html` or
/// `x/index.html`.
fn resolves(output_dir: &Path, target: &str) -> bool {
    let path = target
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_matches('/');

    if path.is_empty() {
        return output_dir.join("index.html").is_file();
    }

    let base = output_dir.join(path);
    base.is_file()
        || output_dir.join(format!("{}.html", path)).is_file()
        || base.join("index.html").is_file()
}
