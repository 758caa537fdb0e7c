use lopdf::{Document, Object, ObjectId};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

use crate::extractor::{PageExtractor, PdfSource};

// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

// Guards the Parent walk against cyclic page trees
const MAX_TREE_DEPTH: usize = 64;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to read PDF: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to process PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Page {page} is out of range (1-{total})")]
    PageOutOfRange { page: u32, total: u32 },

    #[error("No pages specified")]
    NoPages,
}

pub struct PdfDocument {
    pub doc: Document,
}

impl PdfDocument {
    pub fn load_mem(bytes: &[u8]) -> Result<Self, ExtractError> {
        let doc = Document::load_mem(bytes)?;
        Ok(PdfDocument { doc })
    }

    /// Read the rest of `source` and parse it
    pub fn read_from(source: &mut dyn PdfSource) -> Result<Self, ExtractError> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        Self::load_mem(&bytes)
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Build a new document whose pages are exactly `pages`, in that order.
    ///
    /// The page tree is rebuilt as a single flat `Kids` array under the root
    /// `Pages` node. A page listed more than once gets a copy of its page
    /// dictionary for each repeat, sharing content and resources.
    pub fn extract_pages(&self, pages: &[u32]) -> Result<Document, ExtractError> {
        if pages.is_empty() {
            return Err(ExtractError::NoPages);
        }

        let page_map = self.doc.get_pages();
        let total = page_map.len() as u32;

        let mut page_ids = Vec::with_capacity(pages.len());
        for &page in pages {
            match page_map.get(&page) {
                Some(&id) => page_ids.push(id),
                None => return Err(ExtractError::PageOutOfRange { page, total }),
            }
        }

        let mut new_doc = self.doc.clone();
        let root_id = new_doc.catalog()?.get(b"Pages")?.as_reference()?;

        // Intermediate Pages nodes go away, so pull down what they provided.
        let unique: HashSet<ObjectId> = page_ids.iter().copied().collect();
        for &id in &unique {
            for key in INHERITABLE_KEYS {
                if new_doc.get_dictionary(id)?.has(key) {
                    continue;
                }
                if let Some(value) = inherited_attribute(&new_doc, id, key) {
                    new_doc.get_dictionary_mut(id)?.set(key, value);
                }
            }
        }

        let mut placed = HashSet::new();
        let mut kids = Vec::with_capacity(page_ids.len());
        for id in page_ids {
            let kid = if placed.insert(id) {
                id
            } else {
                let copy = new_doc.get_object(id)?.clone();
                new_doc.add_object(copy)
            };
            new_doc
                .get_dictionary_mut(kid)?
                .set("Parent", Object::Reference(root_id));
            kids.push(Object::Reference(kid));
        }

        let count = kids.len() as i64;
        let root = new_doc.get_dictionary_mut(root_id)?;
        root.set("Kids", Object::Array(kids));
        root.set("Count", Object::Integer(count));

        let pruned = new_doc.prune_objects();
        debug!(
            pages = pages.len(),
            pruned = pruned.len(),
            "Rebuilt page tree"
        );

        Ok(new_doc)
    }

    pub fn to_bytes(doc: &mut Document) -> Result<Vec<u8>, ExtractError> {
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent_id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
    }
    None
}

/// `PageExtractor` backed by lopdf
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfExtractor;

impl PageExtractor for LopdfExtractor {
    type Error = ExtractError;

    fn page_count(&self, document: &mut dyn PdfSource) -> Result<u32, ExtractError> {
        Ok(PdfDocument::read_from(document)?.page_count())
    }

    fn extract_pages(
        &self,
        document: &mut dyn PdfSource,
        pages: &[u32],
    ) -> Result<Vec<u8>, ExtractError> {
        let source = PdfDocument::read_from(document)?;
        let mut new_doc = source.extract_pages(pages)?;
        PdfDocument::to_bytes(&mut new_doc)
    }
}
