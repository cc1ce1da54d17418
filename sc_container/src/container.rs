use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::envelope;
use crate::error::{ScError, ScResult};
use crate::options::LoadOptions;
use crate::progress::{NoopProgressSink, ProgressPayload, ProgressSink, ProgressState};
use crate::reader::read_document;
use crate::writer::write_document;

/// Loads a document from disk, resolving its external texture file (if any)
/// next to it. Uses default options and discards progress.
pub fn load_file<P: AsRef<Path>>(path: P) -> ScResult<Document> {
    load_file_with(path, &LoadOptions::default(), &mut NoopProgressSink)
}

pub fn load_file_with<P: AsRef<Path>>(
    path: P,
    options: &LoadOptions,
    sink: &mut dyn ProgressSink,
) -> ScResult<Document> {
    let path = path.as_ref();
    sink.on_progress(ProgressState::Loading, ProgressPayload::Path(path.display().to_string()));

    let raw = std::fs::read(path)?;
    let (method, payload) = envelope::decompress(&raw)?;
    let mut doc = read_document(&payload)?;
    doc.compression = method;

    if doc.has_external_texture {
        resolve_external_textures(path, &mut doc, options, sink)?;
    }

    sink.on_progress(ProgressState::LoadingFinish, ProgressPayload::Path(path.display().to_string()));
    Ok(doc)
}

/// Saves a document to disk, writing a companion texture file next to it
/// when `has_external_texture` is set. Discards progress.
pub fn save_file<P: AsRef<Path>>(path: P, doc: &Document) -> ScResult<()> {
    save_file_with(path, doc, &mut NoopProgressSink)
}

pub fn save_file_with<P: AsRef<Path>>(path: P, doc: &Document, sink: &mut dyn ProgressSink) -> ScResult<()> {
    let path = path.as_ref();
    sink.on_progress(ProgressState::Saving, ProgressPayload::Path(path.display().to_string()));

    let payload = write_document(doc);
    let wrapped = envelope::compress(doc.compression, &payload)?;
    std::fs::write(path, wrapped)?;

    if doc.has_external_texture {
        write_external_textures(path, doc, sink)?;
    }

    sink.on_progress(ProgressState::SavingFinish, ProgressPayload::Path(path.display().to_string()));
    Ok(())
}

/// The companion-file candidates tried in priority order: highres postfix,
/// lowres postfix, then the plain `_tex.sc` name.
fn external_texture_candidates(main_path: &Path, doc: &Document) -> Vec<PathBuf> {
    let stem = main_path.with_extension("");
    let base = stem.to_string_lossy();
    vec![
        PathBuf::from(format!("{base}{}_tex.sc", doc.highres_postfix)),
        PathBuf::from(format!("{base}{}_tex.sc", doc.lowres_postfix)),
        PathBuf::from(format!("{base}_tex.sc")),
    ]
}

fn resolve_external_textures(
    main_path: &Path,
    doc: &mut Document,
    options: &LoadOptions,
    sink: &mut dyn ProgressSink,
) -> ScResult<()> {
    let candidates = external_texture_candidates(main_path, doc);
    let chosen = candidates.iter().find(|p| p.exists());

    let chosen = match chosen {
        Some(p) => p.clone(),
        None if options.require_external_texture => {
            return Err(ScError::MissingExternalTexture {
                base: main_path.to_path_buf(),
                tried: candidates,
            });
        }
        None => return Ok(()),
    };

    sink.on_progress(ProgressState::TextureLoad, ProgressPayload::Path(chosen.display().to_string()));
    let raw = std::fs::read(&chosen)?;
    let (_, payload) = envelope::decompress(&raw)?;
    let companion = read_document(&payload)?;

    for (slot, texture) in doc.textures.iter_mut().zip(companion.textures.into_iter()) {
        slot.image = texture.image;
    }
    Ok(())
}

fn write_external_textures(main_path: &Path, doc: &Document, sink: &mut dyn ProgressSink) -> ScResult<()> {
    let stem = main_path.with_extension("");
    let base = stem.to_string_lossy().into_owned();

    let companion = Document {
        compression: doc.compression,
        textures: doc.textures.clone(),
        ..Document::default()
    };

    if doc.use_uncommon_texture {
        let highres_path = PathBuf::from(format!("{base}{}_tex.sc", doc.highres_postfix));
        write_companion_file(&highres_path, &companion, sink)?;

        let mut lowres_textures = doc.textures.clone();
        for texture in &mut lowres_textures {
            texture.image = texture.image.resize(0.5);
        }
        let lowres_companion = Document {
            textures: lowres_textures,
            ..companion
        };
        let lowres_path = PathBuf::from(format!("{base}{}_tex.sc", doc.lowres_postfix));
        write_companion_file(&lowres_path, &lowres_companion, sink)?;
    } else {
        let common_path = PathBuf::from(format!("{base}_tex.sc"));
        write_companion_file(&common_path, &companion, sink)?;
    }
    Ok(())
}

fn write_companion_file(path: &Path, doc: &Document, sink: &mut dyn ProgressSink) -> ScResult<()> {
    sink.on_progress(ProgressState::TextureSave, ProgressPayload::Path(path.display().to_string()));
    let payload = write_document(doc);
    let wrapped = envelope::compress(doc.compression, &payload)?;
    std::fs::write(path, wrapped)?;
    Ok(())
}
