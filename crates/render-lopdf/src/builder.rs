use echeancier_pdf_composer::StandardFont;
use lopdf::content::Content;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// Resource name of the regular face in every page's font dictionary.
pub const FONT_REGULAR: &str = "F1";
/// Resource name of the bold face.
pub const FONT_BOLD: &str = "F2";

/// Assembles an in-memory PDF page by page.
///
/// The resources, page tree and catalog ids are reserved up front so pages
/// can point at them before they are written, the same way the streaming
/// writer does.
pub struct PdfBuilder {
    doc: Document,
    pub pages_id: ObjectId,
    pub resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl PdfBuilder {
    pub fn new(version: &str) -> Self {
        let mut doc = Document::with_version(version);
        let pages_id = doc.new_object_id();

        let mut font_dict = Dictionary::new();
        for (name, font) in [(FONT_REGULAR, StandardFont::Helvetica), (FONT_BOLD, StandardFont::HelveticaBold)] {
            font_dict.set(
                name,
                dictionary! {
                    "Type" => "Font", "Subtype" => "Type1", "BaseFont" => font.base_font(), "Encoding" => "WinAnsiEncoding",
                },
            );
        }
        let resources_id = doc.add_object(dictionary! { "Font" => font_dict });

        Self { doc, pages_id, resources_id, page_ids: Vec::new() }
    }

    /// Appends a page of `width` × `height` points drawing `content`.
    pub fn add_page(&mut self, content: Content, width: f32, height: f32) -> Result<ObjectId, lopdf::Error> {
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), width.into(), height.into()],
            "Contents" => Object::Array(vec![Object::Reference(content_id)]),
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);
        Ok(page_id)
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Writes the page tree and catalog and returns the document with its
    /// page ids in order.
    pub fn finish(mut self, title: &str) -> (Document, Vec<ObjectId>) {
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => self.page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => self.page_ids.len() as i64,
        };
        self.doc.objects.insert(self.pages_id, pages_dict.into());

        let catalog_id = self.doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => self.pages_id });
        self.doc.trailer.set("Root", catalog_id);

        let info_id = self.doc.add_object(dictionary! {
            "Title" => Object::string_literal(echeancier_pdf_composer::to_win_ansi(title)),
            "Producer" => Object::string_literal("echeancier"),
        });
        self.doc.trailer.set("Info", info_id);

        (self.doc, self.page_ids)
    }
}
