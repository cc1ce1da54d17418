//! Reader and writer for SupercellSWF (`.sc`) binary animation asset
//! containers: a compression envelope wrapped around a flat stream of
//! length-prefixed tags describing textures, shapes, movie clips, text
//! fields, and matrix/colour transform banks.
//!
//! ```no_run
//! let doc = sc_container::load_file("assets/hero.sc")?;
//! println!("{} textures, {} resources", doc.textures.len(), doc.resources.len());
//! sc_container::save_file("assets/hero_out.sc", &doc)?;
//! # Ok::<(), sc_container::ScError>(())
//! ```
//!
//! [`load_bytes`]/[`save_bytes`] work purely in memory; [`load_file`]/
//! [`save_file`] additionally resolve or write the split external texture
//! file next to a main container on disk.

mod buffer;
mod container;
mod document;
mod envelope;
mod error;
mod image_buffer;
mod options;
mod pixel;
mod progress;
mod reader;
mod resource;
mod tag;
mod texture;
mod transform;
mod writer;

pub use container::{load_file, load_file_with, save_file, save_file_with};
pub use document::Document;
pub use envelope::CompressionMethod;
pub use error::{ScError, ScResult, TagCategory};
pub use image_buffer::PixelImage;
pub use options::LoadOptions;
pub use pixel::{ChannelKind, PixelFormat};
pub use progress::{NoopProgressSink, ProgressPayload, ProgressState, ProgressSink};
pub use resource::{Resource, ResourceKind};
pub use texture::{Filter, Texture};
pub use transform::{ColorTransform, Matrix2x3, TransformBank};

/// Parses a document from an already-decompressed-or-not byte slice: the
/// envelope is detected and stripped automatically. Does not resolve
/// external texture files; a document loaded this way keeps blank
/// placeholder images for any texture whose pixel payload was split out.
pub fn load_bytes(bytes: &[u8]) -> ScResult<Document> {
    let (method, payload) = envelope::decompress(bytes)?;
    let mut doc = reader::read_document(&payload)?;
    doc.compression = method;
    Ok(doc)
}

/// Serialises a document and wraps it in its declared compression envelope.
pub fn save_bytes(doc: &Document) -> ScResult<Vec<u8>> {
    let payload = writer::write_document(doc);
    envelope::compress(doc.compression, &payload)
}
