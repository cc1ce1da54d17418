use crate::buffer::ByteBuffer;
use crate::document::Document;
use crate::pixel::{write_pixel_matrix, ChannelKind, PixelFormat};
use crate::resource::ResourceKind;
use crate::tag::{
    TAG_BANK_BEGIN, TAG_COLOR, TAG_EXTERNAL_TEXTURE_MARKER, TAG_LOWRES_MARKER, TAG_MATRIX,
    TAG_MODIFIER_BLOCK_BEGIN, TAG_POSTFIX, TAG_TERMINATOR, TAG_UNCOMMON_MARKER,
};
use crate::texture::{tag_for_filters, Texture};

/// Serialises a document into a tag stream, ready for an envelope to wrap.
/// Never fails: a document built through this crate's own API is always
/// well-formed by construction.
pub fn write_document(doc: &Document) -> Vec<u8> {
    let mut buf = ByteBuffer::new();

    let count_of = |kind: ResourceKind| doc.resources.values().filter(|r| r.kind() == kind).count() as u16;

    buf.write_u16(count_of(ResourceKind::Shape));
    buf.write_u16(count_of(ResourceKind::MovieClip));
    buf.write_u16(doc.textures.len() as u16);
    buf.write_u16(count_of(ResourceKind::TextField));

    let primary = doc.banks.first();
    buf.write_u16(primary.map_or(0, |b| b.matrices.len() as u16));
    buf.write_u16(primary.map_or(0, |b| b.colors.len() as u16));

    buf.fill(5);

    write_exports(&mut buf, doc);

    if doc.use_uncommon_texture
        && (doc.highres_postfix != crate::document::DEFAULT_HIGHRES_POSTFIX
            || doc.lowres_postfix != crate::document::DEFAULT_LOWRES_POSTFIX)
    {
        let mut payload = ByteBuffer::new();
        payload.write_ascii(&doc.highres_postfix);
        payload.write_ascii(&doc.lowres_postfix);
        buf.save_tag(TAG_POSTFIX, Some(&payload.into_vec()));
    }
    if doc.use_lowres_texture {
        buf.save_tag(TAG_LOWRES_MARKER, None);
    }
    if doc.use_uncommon_texture {
        buf.save_tag(TAG_UNCOMMON_MARKER, None);
    }
    if doc.has_external_texture {
        buf.save_tag(TAG_EXTERNAL_TEXTURE_MARKER, None);
    }

    for texture in &doc.textures {
        write_texture_tag(&mut buf, texture, !doc.has_external_texture);
    }

    let modifiers: Vec<_> = doc
        .resources
        .iter()
        .filter(|(_, r)| r.kind() == ResourceKind::MovieClipModifier)
        .collect();
    if !modifiers.is_empty() {
        let mut header = ByteBuffer::new();
        header.write_u16(modifiers.len() as u16);
        buf.save_tag(TAG_MODIFIER_BLOCK_BEGIN, Some(&header.into_vec()));
        for (_, resource) in &modifiers {
            buf.save_tag(resource.tag_id(), Some(resource.payload()));
        }
    }

    for (_, resource) in doc.resources.iter().filter(|(_, r)| r.kind() == ResourceKind::Shape) {
        buf.save_tag(resource.tag_id(), Some(resource.payload()));
    }
    for (_, resource) in doc.resources.iter().filter(|(_, r)| r.kind() == ResourceKind::TextField) {
        buf.save_tag(resource.tag_id(), Some(resource.payload()));
    }

    for (index, bank) in doc.banks.iter().enumerate() {
        if index > 0 {
            let mut payload = ByteBuffer::new();
            payload.write_ascii(bank.name.as_deref().unwrap_or(""));
            buf.save_tag(TAG_BANK_BEGIN, Some(&payload.into_vec()));
        }
        for matrix in &bank.matrices {
            let mut payload = ByteBuffer::new();
            matrix.encode(&mut payload);
            buf.save_tag(TAG_MATRIX, Some(&payload.into_vec()));
        }
        for color in &bank.colors {
            let mut payload = ByteBuffer::new();
            color.encode(&mut payload);
            buf.save_tag(TAG_COLOR, Some(&payload.into_vec()));
        }
    }

    for (_, resource) in doc.resources.iter().filter(|(_, r)| r.kind() == ResourceKind::MovieClip) {
        buf.save_tag(resource.tag_id(), Some(resource.payload()));
    }

    buf.save_tag(TAG_TERMINATOR, None);

    buf.into_vec()
}

/// Expands `exports` (id -> ordered name set) into parallel id/name arrays,
/// one entry per `(id, name)` pair, matching the header's flat pairing.
fn write_exports(buf: &mut ByteBuffer, doc: &Document) {
    let mut pairs: Vec<(u16, &str)> = Vec::new();
    for (id, names) in &doc.exports {
        for name in names {
            pairs.push((*id, name.as_str()));
        }
    }
    buf.write_u16(pairs.len() as u16);
    for (id, _) in &pairs {
        buf.write_u16(*id);
    }
    for (_, name) in &pairs {
        buf.write_ascii(name);
    }
}

fn write_texture_tag(buf: &mut ByteBuffer, texture: &Texture, include_pixels: bool) {
    let tag_id = tag_for_filters(texture.mag_filter, texture.min_filter, texture.linear, texture.downscaling);
    let format = corrected_format(texture);

    let mut payload = ByteBuffer::new();
    payload.write_u8(format.index());
    payload.write_u16(texture.image.width() as u16);
    payload.write_u16(texture.image.height() as u16);
    if include_pixels {
        write_pixel_matrix(&mut payload, format, &texture.image, texture.linear);
    }
    buf.save_tag(tag_id, Some(&payload.into_vec()));
}

/// If a texture's declared pixel format disagrees with its image's actual
/// channel layout, rewrite it to the default format for that channel kind
/// rather than emit bytes the format doesn't describe.
fn corrected_format(texture: &Texture) -> PixelFormat {
    let actual: ChannelKind = texture.image.channel_kind();
    if texture.pixel_format.channel_kind() == actual {
        texture.pixel_format
    } else {
        log::warn!(
            "texture pixel_format {:?} disagrees with its image's channel layout; rewriting to the default for {:?}",
            texture.pixel_format,
            actual
        );
        PixelFormat::default_for(actual)
    }
}
