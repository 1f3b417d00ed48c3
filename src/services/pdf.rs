use crate::error::{EasyToolsError, Result};
use crate::types::PageIndexSet;
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

pub const MERGED_FILE_NAME: &str = "merged_document.pdf";

/// Page-level PDF operations on in-memory documents.
pub struct PdfTools;

impl PdfTools {
    pub fn load(bytes: &[u8]) -> Result<Document> {
        let doc = Document::load_mem(bytes)?;
        if doc.is_encrypted() {
            return Err(EasyToolsError::Pdf {
                reason: "Could not read the PDF. It is encrypted.".to_string(),
            });
        }
        Ok(doc)
    }

    pub fn page_count(bytes: &[u8]) -> Result<usize> {
        Ok(Self::load(bytes)?.get_pages().len())
    }

    /// New document holding exactly the selected pages, in ascending order.
    pub fn extract_pages(bytes: &[u8], selection: &PageIndexSet) -> Result<Vec<u8>> {
        if selection.is_empty() {
            return Err(EasyToolsError::EmptySelection);
        }

        let mut doc = Self::load(bytes)?;
        let total = doc.get_pages().len();
        if let Some(last) = selection.iter().last() {
            if last >= total {
                return Err(EasyToolsError::InvalidInput {
                    reason: format!("page {} is beyond the document's {} pages", last + 1, total),
                });
            }
        }

        let doomed: Vec<u32> = (1..=total as u32)
            .filter(|page| !selection.contains(*page as usize - 1))
            .collect();
        debug!("Keeping {} of {} pages, deleting {}", selection.len(), total, doomed.len());

        doc.delete_pages(&doomed);
        doc.prune_objects();
        doc.renumber_objects();
        doc.compress();

        Self::save(&mut doc)
    }

    /// Concatenates every page of every input, in input order.
    pub fn merge(inputs: &[Vec<u8>]) -> Result<Vec<u8>> {
        if inputs.len() < 2 {
            return Err(EasyToolsError::InvalidInput {
                reason: "Please select at least two PDF files to merge.".to_string(),
            });
        }

        let mut max_id = 1;
        let mut pages: Vec<(ObjectId, Object)> = Vec::new();
        let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

        for (idx, bytes) in inputs.iter().enumerate() {
            let mut doc = Self::load(bytes)?;
            doc.renumber_objects_with(max_id);
            max_id = doc.max_id + 1;

            for (_, page_id) in doc.get_pages() {
                let page = doc.get_object(page_id)?.to_owned();
                pages.push((page_id, page));
            }
            debug!("Input {} contributes {} pages", idx + 1, doc.get_pages().len());
            objects.extend(doc.objects);
        }

        let mut merged = Document::with_version("1.5");
        let mut catalog: Option<(ObjectId, Object)> = None;
        let mut page_tree: Option<(ObjectId, Object)> = None;

        for (object_id, object) in objects {
            let kind = object.type_name().map(|name| name.as_bytes().to_vec()).unwrap_or_default();
            match kind.as_slice() {
                b"Catalog" => {
                    let id = catalog.as_ref().map(|(id, _)| *id).unwrap_or(object_id);
                    catalog = Some((id, object));
                }
                b"Pages" => {
                    let mut dictionary = object.as_dict()?.clone();
                    if let Some((_, previous)) = &page_tree {
                        dictionary.extend(previous.as_dict()?);
                    }
                    let id = page_tree.as_ref().map(|(id, _)| *id).unwrap_or(object_id);
                    page_tree = Some((id, Object::Dictionary(dictionary)));
                }
                // Pages are re-parented below; outlines point into the old trees.
                b"Page" | b"Outlines" | b"Outline" => {}
                _ => {
                    merged.objects.insert(object_id, object);
                }
            }
        }

        let (catalog_id, catalog_object) = catalog.ok_or_else(|| EasyToolsError::Pdf {
            reason: "no document catalog found".to_string(),
        })?;
        let (pages_id, pages_object) = page_tree.ok_or_else(|| EasyToolsError::Pdf {
            reason: "no page tree found".to_string(),
        })?;

        let mut kids = Vec::with_capacity(pages.len());
        for (page_id, page) in &pages {
            let mut dictionary = page.as_dict()?.clone();
            dictionary.set("Parent", pages_id);
            merged.objects.insert(*page_id, Object::Dictionary(dictionary));
            kids.push(Object::Reference(*page_id));
        }

        let mut pages_dictionary = pages_object.as_dict()?.clone();
        pages_dictionary.set("Count", pages.len() as i64);
        pages_dictionary.set("Kids", kids);
        merged.objects.insert(pages_id, Object::Dictionary(pages_dictionary));

        let mut catalog_dictionary = catalog_object.as_dict()?.clone();
        catalog_dictionary.set("Pages", pages_id);
        catalog_dictionary.remove(b"Outlines");
        merged.objects.insert(catalog_id, Object::Dictionary(catalog_dictionary));

        merged.trailer.set("Root", catalog_id);
        merged.max_id = merged.objects.keys().map(|(id, _)| *id).max().unwrap_or(0);
        merged.renumber_objects();
        merged.compress();

        info!("Merged {} documents into {} pages", inputs.len(), pages.len());
        Self::save(&mut merged)
    }

    fn save(doc: &mut Document) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        doc.save_to(&mut out)?;
        Ok(out)
    }
}

/// `report.pdf` -> `report_split.pdf`.
pub fn split_output_name(source: &Path) -> String {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    format!("{}_split.pdf", stem)
}
