use std::io::{Read, Seek};

use tracing::{debug, info, warn};

use crate::archive;
use crate::error::{Result, SplitError};
use crate::extractor::{PageExtractor, PdfSource};
use crate::selection::{plan, SplitMode, SplitParams};

/// The named result of a split: a PDF, or a zip of PDFs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub name: String,
    pub content: Vec<u8>,
}

impl OutputArtifact {
    pub fn is_zip(&self) -> bool {
        self.name.ends_with(".zip")
    }

    pub fn content_type(&self) -> &'static str {
        if self.is_zip() {
            "application/zip"
        } else {
            "application/pdf"
        }
    }
}

/// Drives a `PageExtractor` to produce the artifact for one split request.
///
/// Holds no per-request state, so one `Splitter` can serve any number of
/// concurrent calls as long as each brings its own document stream.
#[derive(Debug, Clone, Default)]
pub struct Splitter<E> {
    extractor: E,
}

impl<E: PageExtractor> Splitter<E> {
    pub fn new(extractor: E) -> Self {
        Splitter { extractor }
    }

    pub fn page_count<R: Read + Seek>(&self, document: &mut R) -> Result<u32> {
        document
            .rewind()
            .map_err(|e| SplitError::extraction("page count", e))?;
        self.extractor
            .page_count(document)
            .map_err(|e| SplitError::extraction("page count", e))
    }

    /// Entry point for callers holding the split mode as text, e.g. a form field.
    pub fn process<R: Read + Seek>(
        &self,
        document: &mut R,
        original_name: &str,
        total_pages: u32,
        mode: &str,
        params: &SplitParams,
    ) -> Result<OutputArtifact> {
        let mode = mode.parse::<SplitMode>()?;
        self.run(document, original_name, total_pages, mode, params)
    }

    /// Split `document` according to `mode`.
    ///
    /// All input validation happens before the first extraction. The first
    /// extraction failure ends the call; nothing produced so far is returned.
    pub fn run<R: Read + Seek>(
        &self,
        document: &mut R,
        original_name: &str,
        total_pages: u32,
        mode: SplitMode,
        params: &SplitParams,
    ) -> Result<OutputArtifact> {
        let selections = plan(mode, params, total_pages)?;
        debug!(%mode, total_pages, outputs = selections.len(), "Planned split");

        let mut outputs = Vec::with_capacity(selections.len());
        for pages in &selections {
            outputs.push(self.extract(&mut *document, pages)?);
        }

        let artifact = match <[Vec<u8>; 1]>::try_from(outputs) {
            Ok([content]) => OutputArtifact {
                name: format!("split_{}", original_name),
                content,
            },
            Err(outputs) => OutputArtifact {
                name: format!("split_{}.zip", original_name),
                content: archive::pack(&outputs)?,
            },
        };

        info!(
            name = %artifact.name,
            bytes = artifact.content.len(),
            "Split complete"
        );
        Ok(artifact)
    }

    // The extractor consumes the stream, so every call starts from a rewind.
    fn extract(&self, document: &mut dyn PdfSource, pages: &[u32]) -> Result<Vec<u8>> {
        let target = format!("pages {:?}", pages);
        document
            .rewind()
            .map_err(|e| SplitError::extraction(target.clone(), e))?;

        debug!(%target, "Extracting");
        self.extractor.extract_pages(document, pages).map_err(|e| {
            warn!(%target, error = %e, "Extraction failed");
            SplitError::extraction(target, e)
        })
    }
}
