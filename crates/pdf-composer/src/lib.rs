//! PDF composition utilities for post-processing finished documents.
//!
//! This crate provides low-level PDF manipulation using lopdf:
//! - Content overlaying (page numbers, footers) on existing pages
//! - Font resource registration for overlays
//! - Standard Helvetica metrics and WinAnsi text encoding

mod error;
pub mod metrics;
pub mod text;

pub use error::ComposerError;
pub use metrics::StandardFont;
pub use text::{text_operations, to_win_ansi};

use lopdf::content::Content;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// Looks up the object id of a 1-based page number.
pub fn page_id(doc: &Document, page: u32) -> Result<ObjectId, ComposerError> {
    let pages = doc.get_pages();
    pages
        .get(&page)
        .copied()
        .ok_or(ComposerError::PageNotFound { page, count: pages.len() })
}

/// Adds a new content stream to an existing page, overlaying it on top.
///
/// It wraps the existing page content and the new content in a new array of
/// content streams, so the original stream is left untouched.
///
/// # Arguments
/// * `doc` - The document containing the page to modify.
/// * `page_id` - The `ObjectId` of the page to add the overlay to.
/// * `content_stream` - The raw bytes of the new content stream.
pub fn overlay_content(
    doc: &mut Document,
    page_id: ObjectId,
    content_stream: Vec<u8>,
) -> Result<(), ComposerError> {
    let stream = Stream::new(dictionary! {}, content_stream);
    let new_content_id = doc.add_object(Object::Stream(stream));

    let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;

    match page_dict.get_mut(b"Contents") {
        Ok(contents_obj) => {
            let mut new_contents_array = match contents_obj.as_array() {
                Ok(arr) => arr.clone(),
                // A single reference: wrap it.
                Err(_) => vec![contents_obj.clone()],
            };

            // Last stream is drawn on top.
            new_contents_array.push(Object::Reference(new_content_id));

            page_dict.set("Contents", Object::Array(new_contents_array));
        }
        Err(_) => {
            return Err(ComposerError::Other(format!(
                "Page {:?} is missing a /Contents key.",
                page_id
            )));
        }
    }

    Ok(())
}

/// Makes sure the page's resources define `resource_name` as `font`.
///
/// Handles resources and font dictionaries that are either inline or
/// indirect objects. An existing entry with the same name is kept.
pub fn ensure_font_resource(
    doc: &mut Document,
    page_id: ObjectId,
    resource_name: &str,
    font: StandardFont,
) -> Result<(), ComposerError> {
    let resources_id = match doc.get_object(page_id)?.as_dict()?.get(b"Resources") {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    };

    let font_dict_id = {
        let resources = resources_dict_mut(doc, page_id, resources_id)?;
        let existing = match resources.get(b"Font") {
            Ok(Object::Reference(id)) => Some(Some(*id)),
            Ok(_) => Some(None),
            Err(_) => None,
        };
        match existing {
            Some(found) => found,
            None => {
                resources.set("Font", Dictionary::new());
                None
            }
        }
    };

    let fonts = match font_dict_id {
        Some(id) => doc.get_object_mut(id)?.as_dict_mut()?,
        None => resources_dict_mut(doc, page_id, resources_id)?
            .get_mut(b"Font")?
            .as_dict_mut()?,
    };
    if !fonts.has(resource_name.as_bytes()) {
        log::debug!("Registering font resource {} ({})", resource_name, font.base_font());
        fonts.set(
            resource_name,
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            },
        );
    }
    Ok(())
}

fn resources_dict_mut(
    doc: &mut Document,
    page_id: ObjectId,
    resources_id: Option<ObjectId>,
) -> Result<&mut Dictionary, ComposerError> {
    match resources_id {
        Some(id) => Ok(doc.get_object_mut(id)?.as_dict_mut()?),
        None => {
            let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
            if !page.has(b"Resources") {
                page.set("Resources", Dictionary::new());
            }
            Ok(page.get_mut(b"Resources")?.as_dict_mut()?)
        }
    }
}

/// Writes one line of text on top of an existing page.
///
/// `x` is the left edge and `y` the baseline, both in PDF user space (points,
/// origin at the bottom-left corner).
pub fn stamp_text(
    doc: &mut Document,
    page_id: ObjectId,
    resource_name: &str,
    font: StandardFont,
    font_size: f32,
    x: f32,
    y: f32,
    text: &str,
) -> Result<(), ComposerError> {
    ensure_font_resource(doc, page_id, resource_name, font)?;
    let content = Content { operations: text_operations(resource_name, font_size, x, y, text) };
    overlay_content(doc, page_id, content.encode()?)
}
