//! Image-page PDF assembly using lopdf
//!
//! Both encoders produce one image XObject per slide and hand it here. Each
//! image is placed on its own page, scaled to cover the page's MediaBox.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use crate::error::Result;
use crate::layout::PageDimensions;
use super::metadata::DocumentInfo;

/// Resource name every page uses for its image
const IMAGE_NAME: &[u8] = b"Im0";

/// Pixel layout of an image XObject
#[derive(Debug, Clone)]
pub struct ImageXObject {
    pub width: u32,
    pub height: u32,
    /// `/ColorSpace` value (a name, or an `[/Indexed ...]` array)
    pub color_space: Object,
    pub bits_per_component: u8,
    /// `/Filter` name the data is encoded with
    pub filter: &'static str,
    /// `/DecodeParms`, when the filter needs them
    pub decode_parms: Option<Dictionary>,
    /// Encoded image data, stored verbatim
    pub data: Vec<u8>,
}

impl ImageXObject {
    fn into_stream(self) -> Stream {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", Object::Integer(self.width as i64));
        dict.set("Height", Object::Integer(self.height as i64));
        dict.set("ColorSpace", self.color_space);
        dict.set("BitsPerComponent", Object::Integer(self.bits_per_component as i64));
        dict.set("Filter", Object::Name(self.filter.as_bytes().to_vec()));
        if let Some(parms) = self.decode_parms {
            dict.set("DecodeParms", Object::Dictionary(parms));
        }

        // Already compressed; lopdf must not wrap it in another filter
        Stream::new(dict, self.data).with_compression(false)
    }
}

/// A PDF under construction where every page is a single full-page image
pub struct ImageDocument {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl Default for ImageDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageDocument {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");

        // Reserve the page tree id up front so pages can point at their parent
        let pages_id = doc.new_object_id();

        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
        }
    }

    /// Number of pages added so far
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Append a page showing `image` stretched over `page`
    pub fn add_image_page(&mut self, image: ImageXObject, page: &PageDimensions) -> Result<ObjectId> {
        let image_id = self.doc.add_object(image.into_stream());

        let [_, _, width, height] = page.media_box();

        // Image space is the unit square; scale it to the page
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(width),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(height),
                        Object::Integer(0),
                        Object::Integer(0),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(IMAGE_NAME.to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), content.encode()?));

        let mut xobjects = Dictionary::new();
        xobjects.set(IMAGE_NAME.to_vec(), Object::Reference(image_id));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(page.media_box().iter().map(|&v| Object::Real(v)).collect()),
        );
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.doc.add_object(page_dict);
        self.page_ids.push(page_id);

        log::debug!(
            "added page {} ({:.1} x {:.1} pt)",
            self.page_ids.len(),
            width,
            height
        );

        Ok(page_id)
    }

    /// Close the page tree, attach the catalog and Info, and return the document
    pub fn finish(mut self, info: &DocumentInfo) -> Document {
        // Create Kids array with all page references, in insertion order
        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();

        let mut pages_object = Dictionary::new();
        pages_object.set("Type", Object::Name(b"Pages".to_vec()));
        pages_object.set("Count", Object::Integer(self.page_ids.len() as i64));
        pages_object.set("Kids", Object::Array(kids));
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_object));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(self.pages_id));
        let catalog_id = self.doc.add_object(catalog);
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        let info_id = self.doc.add_object(info.to_dictionary());
        self.doc.trailer.set("Info", Object::Reference(info_id));

        // Compresses the content streams; image streams opted out above
        self.doc.compress();
        self.doc
    }

    /// Finish the document and write it to `path`, replacing any existing file
    pub fn save(self, path: &Path, info: &DocumentInfo) -> Result<()> {
        let mut doc = self.finish(info);
        let mut writer = BufWriter::new(File::create(path)?);
        doc.save_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
