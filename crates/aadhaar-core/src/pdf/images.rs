//! Enumeration of raster images embedded in page resources.

use std::collections::{HashSet, VecDeque};

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, trace};

use super::{PdfHandle, Result};
use crate::error::PdfError;
use crate::models::extraction::{EmbeddedImage, Ordinal};

/// Lazy, single-pass walk over every image of every page.
///
/// Pages are visited in ascending order, and images within a page in the
/// order of the page's XObject listing, descending into form XObjects.
/// Repeated references to one image object are yielded once per reference.
pub struct ImageWalker<'a> {
    document: &'a Document,
    pages: std::iter::Enumerate<std::collections::btree_map::IntoValues<u32, ObjectId>>,
    pending: VecDeque<(Ordinal, ObjectId)>,
}

/// Start walking the images of a document.
pub fn walk_images(handle: &PdfHandle) -> ImageWalker<'_> {
    let document = handle.document();
    ImageWalker {
        document,
        pages: document.get_pages().into_values().enumerate(),
        pending: VecDeque::new(),
    }
}

impl<'a> ImageWalker<'a> {
    fn queue_page(&mut self, page_index: usize, page_id: ObjectId) {
        let mut ids = Vec::new();
        if let Some(resources) = get_page_resources(self.document, page_id) {
            let mut visited_forms = HashSet::new();
            collect_images(self.document, &resources, &mut visited_forms, &mut ids);
        }

        debug!("Page {} lists {} images", page_index + 1, ids.len());
        self.pending.extend(
            ids.into_iter()
                .enumerate()
                .map(|(image_index, id)| (Ordinal::new(page_index, image_index), id)),
        );
    }

    fn resolve(&self, ordinal: Ordinal, id: ObjectId) -> Result<EmbeddedImage> {
        let stream = self
            .document
            .get_object(id)
            .and_then(Object::as_stream)
            .map_err(|e| {
                PdfError::ImageExtraction(format!("object {} {}: {}", id.0, id.1, e))
            })?;

        let extension = image_extension(stream);
        trace!(
            "Image {:?} from object {} {}: {} bytes, .{}",
            ordinal.one_based(),
            id.0,
            id.1,
            stream.content.len(),
            extension
        );
        Ok(EmbeddedImage::new(ordinal, stream.content.clone(), extension))
    }
}

impl<'a> Iterator for ImageWalker<'a> {
    type Item = Result<EmbeddedImage>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((ordinal, id)) = self.pending.pop_front() {
                return Some(self.resolve(ordinal, id));
            }
            let (page_index, page_id) = self.pages.next()?;
            self.queue_page(page_index, page_id);
        }
    }
}

/// Collect image object ids from a resources dictionary, in listing order.
fn collect_images(
    doc: &Document,
    resources: &Dictionary,
    visited_forms: &mut HashSet<ObjectId>,
    out: &mut Vec<ObjectId>,
) {
    let Ok(xobjects) = resources.get(b"XObject") else {
        return;
    };
    let Ok((_, Object::Dictionary(xobj_dict))) = doc.dereference(xobjects) else {
        return;
    };

    for (name, obj_ref) in xobj_dict.iter() {
        let Object::Reference(id) = obj_ref else {
            trace!("Skipping direct XObject {}", String::from_utf8_lossy(name));
            continue;
        };
        let Ok(Object::Stream(stream)) = doc.get_object(*id) else {
            trace!("Skipping unresolvable XObject {}", String::from_utf8_lossy(name));
            continue;
        };

        match subtype(&stream.dict) {
            Some(b"Image") => out.push(*id),
            Some(b"Form") => {
                if !visited_forms.insert(*id) {
                    continue;
                }
                if let Some(form_resources) = resolve_dictionary(doc, &stream.dict, b"Resources") {
                    collect_images(doc, &form_resources, visited_forms, out);
                }
            }
            _ => {}
        }
    }
}

fn subtype(dict: &Dictionary) -> Option<&[u8]> {
    dict.get(b"Subtype").ok()?.as_name().ok()
}

fn resolve_dictionary(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<Dictionary> {
    let value = dict.get(key).ok()?;
    match doc.dereference(value) {
        Ok((_, Object::Dictionary(resolved))) => Some(resolved.clone()),
        _ => None,
    }
}

/// Get resources dictionary for a page, handling inheritance
fn get_page_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
    let Ok(Object::Dictionary(dict)) = doc.get_object(page_id) else {
        return None;
    };

    if let Some(resources) = resolve_dictionary(doc, dict, b"Resources") {
        return Some(resources);
    }

    // Walk up the page tree for inherited Resources
    match dict.get(b"Parent") {
        Ok(Object::Reference(parent_id)) => get_page_resources(doc, *parent_id),
        _ => None,
    }
}

/// File extension implied by an image stream's payload.
///
/// Sniffs the bytes first and falls back to the stream filter for formats
/// without a recognizable header.
fn image_extension(stream: &Stream) -> &'static str {
    if let Ok(format) = image::guess_format(&stream.content) {
        if let Some(ext) = format.extensions_str().first() {
            return *ext;
        }
    }

    let filter = match stream.dict.get(b"Filter") {
        Ok(Object::Name(name)) => Some(name.as_slice()),
        Ok(Object::Array(arr)) => arr.last().and_then(|o| o.as_name().ok()),
        _ => None,
    };

    match filter {
        Some(b"DCTDecode") => "jpg",
        Some(b"JPXDecode") => "jp2",
        Some(b"JBIG2Decode") => "jb2",
        Some(b"CCITTFaxDecode") => "ccitt",
        _ => "bin",
    }
}
