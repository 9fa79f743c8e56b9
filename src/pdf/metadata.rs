//! PDF metadata: writing the Info dictionary and reading a finished file back

use std::path::Path;
use chrono::{DateTime, FixedOffset, Local};
use lopdf::{Dictionary, Document, Object};
use crate::error::{Error, Result};

/// Count pages by reading the Count field from the Pages dictionary
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    // Get the catalog (root)
    let catalog_ref = doc.trailer.get(b"Root")
        .map_err(|_| Error::General("No Root in trailer".to_string()))?;

    let catalog_id = match catalog_ref {
        Object::Reference(id) => *id,
        _ => return Err(Error::General("Root is not a reference".to_string())),
    };

    let catalog_dict = match doc.get_object(catalog_id)? {
        Object::Dictionary(dict) => dict,
        _ => return Err(Error::General("Catalog is not a dictionary".to_string())),
    };

    // Get the Pages reference
    let pages_id = match catalog_dict.get(b"Pages") {
        Ok(Object::Reference(id)) => *id,
        Ok(_) => return Err(Error::General("Pages is not a reference".to_string())),
        Err(_) => return Err(Error::General("No Pages in catalog".to_string())),
    };

    let pages_dict = match doc.get_object(pages_id)? {
        Object::Dictionary(dict) => dict,
        _ => return Err(Error::General("Pages is not a dictionary".to_string())),
    };

    match pages_dict.get(b"Count") {
        Ok(Object::Integer(n)) if *n >= 0 => Ok(*n as usize),
        Ok(_) => Err(Error::General("Count is not a non-negative integer".to_string())),
        Err(_) => Err(Error::General("No Count in Pages".to_string())),
    }
}

/// Format a timestamp as a PDF date string, e.g. `D:20261017093000+02'00'`
pub fn pdf_date(time: &DateTime<FixedOffset>) -> String {
    let offset = time.offset().local_minus_utc();
    let sign = if offset < 0 { '-' } else { '+' };
    let offset = offset.abs();

    format!(
        "{}{}{:02}'{:02}'",
        time.format("D:%Y%m%d%H%M%S"),
        sign,
        offset / 3600,
        (offset % 3600) / 60
    )
}

/// Document Info written into every collated PDF
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    /// Document title (the deck name)
    pub title: String,
    /// Producing application
    pub producer: String,
    /// Creation timestamp
    pub created: DateTime<FixedOffset>,
}

impl DocumentInfo {
    /// Info for a document created now by this crate
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            producer: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            created: Local::now().into(),
        }
    }

    pub fn to_dictionary(&self) -> Dictionary {
        let mut info = Dictionary::new();
        info.set("Title", Object::string_literal(self.title.as_str()));
        info.set("Producer", Object::string_literal(self.producer.as_str()));
        info.set("CreationDate", Object::string_literal(pdf_date(&self.created)));
        info
    }
}

/// PDF metadata
#[derive(Debug, Clone)]
pub struct PdfMetadata {
    /// Number of pages in the PDF
    pub page_count: usize,
    /// Document title (if present)
    pub title: Option<String>,
    /// Producing application (if present)
    pub producer: Option<String>,
}

/// Read a text entry from the Info dictionary
fn info_string(info: &Dictionary, key: &[u8]) -> Option<String> {
    let bytes = info.get(key).ok()?.as_str().ok()?;
    String::from_utf8(bytes.to_vec()).ok()
}

/// Extract metadata from a PDF file
pub fn extract_metadata(path: &Path) -> Result<PdfMetadata> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;

    // Use catalog-based counting for accuracy
    let page_count = count_pages_from_catalog(&doc)?;

    let info = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => doc.get_dictionary(*id).ok(),
        Ok(Object::Dictionary(dict)) => Some(dict),
        _ => None,
    };

    Ok(PdfMetadata {
        page_count,
        title: info.and_then(|info| info_string(info, b"Title")),
        producer: info.and_then(|info| info_string(info, b"Producer")),
    })
}

/// Count the number of pages in a PDF file
///
/// This is a quick operation that reads the Count field from the Pages dictionary.
pub fn count_pages(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    count_pages_from_catalog(&doc)
}
