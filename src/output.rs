use crate::config::{CrawlConfig, OutputMode};
use crate::error::Result;
use crate::results::{CrawlResult, PageRecord};
use crate::utils::{domain_prefix, slugify_title};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use url::Url;

/// Suffix appended to the file written in solo mode
pub const SOLO_SUFFIX: &str = "-solo";

/// Every record of a crawl in one document
#[derive(Debug, Serialize)]
pub struct CombinedDocument<'a> {
    pub title: String,
    pub sections: Vec<&'a PageRecord>,
}

impl<'a> CombinedDocument<'a> {
    pub fn new(start_url: &str, result: &'a CrawlResult) -> Self {
        Self {
            title: format!("Documentation for {}", start_url),
            sections: result.records().collect(),
        }
    }
}

/// `{domain}_docs.json`
pub fn combined_filename(base: &Url) -> String {
    format!("{}_docs.json", domain_prefix(base))
}

/// `{domain}_docs_section_{slug}{suffix}.json`
pub fn section_filename(base: &Url, title: &str, suffix: &str) -> String {
    format!(
        "{}_docs_section_{}{}.json",
        domain_prefix(base),
        slugify_title(title),
        suffix
    )
}

/// Writes a crawl result according to the configured output mode
///
/// Creates the output directory if needed and returns the paths written,
/// in write order. In the per-record modes a later record whose title
/// slugs the same as an earlier one replaces that file.
pub fn write_output(config: &CrawlConfig, result: &CrawlResult) -> Result<Vec<PathBuf>> {
    let base = config.base_url()?;
    let dir = config.output_dir.as_path();
    fs::create_dir_all(dir)?;

    match config.output {
        OutputMode::Combined => {
            let path = dir.join(combined_filename(&base));
            save_json(&CombinedDocument::new(&config.start_url, result), &path)?;
            Ok(vec![path])
        }
        OutputMode::SplitPerSection => write_records(dir, &base, result, ""),
        OutputMode::Solo => write_records(dir, &base, result, SOLO_SUFFIX),
    }
}

fn write_records(dir: &Path, base: &Url, result: &CrawlResult, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(result.len());
    for record in result.records() {
        let path = dir.join(section_filename(base, &record.title, suffix));
        if written.contains(&path) {
            ::log::warn!(
                "Overwriting {} with section from {}",
                path.display(),
                record.url
            );
        }
        save_json(record, &path)?;
        written.push(path);
    }
    Ok(written)
}

/// Pretty-prints JSON with four-space indentation
pub fn save_json<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    data.serialize(&mut serializer)?;
    writer.flush()?;
    ::log::debug!("Wrote {}", path.display());
    Ok(())
}
