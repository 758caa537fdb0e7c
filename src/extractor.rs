use std::io::{Read, Seek};

/// A seekable byte stream holding a PDF.
pub trait PdfSource: Read + Seek {}

impl<T: Read + Seek + ?Sized> PdfSource for T {}

/// The PDF engine the splitter delegates to.
///
/// Both operations consume `document` from its current position; callers
/// rewind before each call.
pub trait PageExtractor {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Total number of pages in the document
    fn page_count(&self, document: &mut dyn PdfSource) -> Result<u32, Self::Error>;

    /// Bytes of a new PDF holding exactly `pages` (1-based), in that order
    fn extract_pages(
        &self,
        document: &mut dyn PdfSource,
        pages: &[u32],
    ) -> Result<Vec<u8>, Self::Error>;
}

impl<E: PageExtractor + ?Sized> PageExtractor for &E {
    type Error = E::Error;

    fn page_count(&self, document: &mut dyn PdfSource) -> Result<u32, Self::Error> {
        (**self).page_count(document)
    }

    fn extract_pages(
        &self,
        document: &mut dyn PdfSource,
        pages: &[u32],
    ) -> Result<Vec<u8>, Self::Error> {
        (**self).extract_pages(document, pages)
    }
}
