//! Tab-separated manifest parsing.
//!
//! The input contract is a header row `id<TAB>url` followed by one record
//! per line, in file order. Duplicate ids are permitted by the format; the
//! dispatcher keeps whichever result it observes last for a duplicated id.

use std::path::Path;

use anyhow::Context;
use prism_core::ImageRecord;

/// Read an ordered list of image records from a TSV manifest on disk.
///
/// `~` in the path is expanded before reading.
pub fn read_manifest(path: &Path) -> anyhow::Result<Vec<ImageRecord>> {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let content = std::fs::read_to_string(&expanded)
        .with_context(|| format!("failed to read manifest {expanded:?}"))?;
    parse_manifest(&content)
}

/// Parse TSV content into ordered records.
pub fn parse_manifest(content: &str) -> anyhow::Result<Vec<ImageRecord>> {
    let mut lines = content.lines();
    let header = lines
        .next()
        .ok_or_else(|| anyhow::anyhow!("manifest is empty"))?;
    let mut columns = header.split('\t');
    if columns.next().map(str::trim) != Some("id") || columns.next().map(str::trim) != Some("url")
    {
        anyhow::bail!("manifest header must be 'id<TAB>url', got {header:?}");
    }

    let mut records = Vec::new();
    for (index, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        // Header is line 1, so data lines start at 2.
        let lineno = index + 2;
        let mut fields = line.splitn(2, '\t');
        let id = fields
            .next()
            .unwrap_or_default()
            .trim()
            .parse::<i64>()
            .with_context(|| format!("line {lineno}: invalid id"))?;
        let url = fields
            .next()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| anyhow::anyhow!("line {lineno}: missing url column"))?;
        records.push(ImageRecord::new(id, url));
    }

    Ok(records)
}
