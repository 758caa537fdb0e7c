use crate::pdf::LopdfExtractor;
use crate::selection::SplitParams;
use crate::splitter::Splitter;
use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SplitSummary {
    pub output_path: PathBuf,
    pub page_count: u32,
    pub is_zip: bool,
    pub content_type: &'static str,
    pub size: usize,
}

/// Split `input` and write the resulting PDF or zip into `output_dir`.
pub fn split_to_dir<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    mode: &str,
    params: &SplitParams,
    output_dir: Q,
) -> Result<SplitSummary> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();

    let name = input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document.pdf");

    let mut file =
        File::open(input).with_context(|| format!("Failed to open PDF: {}", input.display()))?;

    let splitter = Splitter::new(LopdfExtractor);
    let page_count = splitter
        .page_count(&mut file)
        .with_context(|| format!("Failed to count pages: {}", input.display()))?;
    let artifact = splitter.process(&mut file, name, page_count, mode, params)?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let output_path = output_dir.join(&artifact.name);
    std::fs::write(&output_path, &artifact.content)
        .with_context(|| format!("Failed to write output: {}", output_path.display()))?;

    Ok(SplitSummary {
        output_path,
        page_count,
        is_zip: artifact.is_zip(),
        content_type: artifact.content_type(),
        size: artifact.content.len(),
    })
}

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    mode: &str,
    params: &SplitParams,
    output_dir: Q,
) -> Result<()> {
    let summary = split_to_dir(&input, mode, params, output_dir)?;

    println!(
        "Split {} ({} pages) into {}",
        input.as_ref().display(),
        summary.page_count,
        summary.output_path.display()
    );

    Ok(())
}
