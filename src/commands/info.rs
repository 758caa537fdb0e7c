use crate::pdf::LopdfExtractor;
use crate::splitter::Splitter;
use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

pub fn page_count<P: AsRef<Path>>(path: P) -> Result<u32> {
    let path = path.as_ref();
    let mut file =
        File::open(path).with_context(|| format!("Failed to open PDF: {}", path.display()))?;

    Splitter::new(LopdfExtractor)
        .page_count(&mut file)
        .with_context(|| format!("Failed to count pages: {}", path.display()))
}

pub fn run<P: AsRef<Path>>(path: P) -> Result<()> {
    let pages = page_count(&path)?;

    println!("File: {}", path.as_ref().display());
    println!("Pages: {}", pages);

    Ok(())
}
