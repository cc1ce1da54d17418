use crate::buffer::ByteBuffer;
use crate::document::Document;
use crate::error::{ScError, ScResult, TagCategory};
use crate::image_buffer::PixelImage;
use crate::pixel::{read_pixel_matrix, PixelFormat};
use crate::resource::Resource;
use crate::tag::{
    self, TAG_BANK_BEGIN, TAG_COLOR, TAG_EXTERNAL_TEXTURE_MARKER, TAG_LOWRES_MARKER, TAG_MATRIX,
    TAG_MATRIX_SHORT, TAG_MODIFIER_BLOCK_BEGIN, TAG_POSTFIX, TAG_TERMINATOR, TAG_UNCOMMON_MARKER,
};
use crate::texture::{filters_for_tag, Texture};
use crate::transform::{ColorTransform, Matrix2x3, TransformBank};

/// Reads the first two bytes of an opaque resource payload as its id. These
/// tags are otherwise treated as byte runs; peeking the id is the one piece
/// of structure the dispatcher needs to key [`Document::resources`].
fn peek_resource_id(payload: &[u8]) -> ScResult<u16> {
    if payload.len() < 2 {
        return Err(ScError::Truncated);
    }
    Ok(u16::from_le_bytes([payload[0], payload[1]]))
}

/// Parses a fully decompressed tag stream into a [`Document`]. Does not
/// touch the filesystem or resolve external texture files; see
/// [`crate::container::load_file`] for that.
pub fn read_document(data: &[u8]) -> ScResult<Document> {
    let mut buf = ByteBuffer::from_vec(data.to_vec());
    let mut doc = Document::default();

    let shape_count = buf.read_u16()?;
    let movie_clip_count = buf.read_u16()?;
    let texture_count = buf.read_u16()?;
    let text_field_count = buf.read_u16()?;

    // Declared matrix/color counts for the primary bank; informational only,
    // the writer uses them to size the header but the reader just keeps
    // appending as matrix/color tags arrive.
    let _primary_matrix_count = buf.read_u16()?;
    let _primary_color_count = buf.read_u16()?;

    buf.skip(5)?;

    let export_count = buf.read_u16()?;
    let mut export_ids = Vec::with_capacity(export_count as usize);
    for _ in 0..export_count {
        export_ids.push(buf.read_u16()?);
    }
    for id in export_ids {
        let name = buf.read_ascii()?;
        doc.exports.entry(id).or_default().insert(name);
    }

    let mut shapes_seen = 0u16;
    let mut movie_clips_seen = 0u16;
    let mut text_fields_seen = 0u16;
    let mut textures_seen = 0u16;
    let mut modifier_expected: Option<u16> = None;
    let mut modifiers_seen = 0u16;

    loop {
        let (tag_id, length) = buf.read_tag_header()?;

        if tag_id == TAG_TERMINATOR {
            break;
        }

        if tag::is_texture_tag(tag_id) {
            if textures_seen >= texture_count {
                return Err(ScError::CountOverflow { kind: TagCategory::Texture, declared: texture_count });
            }
            doc.textures.push(read_texture_tag(&mut buf, tag_id, length)?);
            textures_seen += 1;
            continue;
        }

        if tag::is_shape_tag(tag_id) {
            if shapes_seen >= shape_count {
                return Err(ScError::CountOverflow { kind: TagCategory::Shape, declared: shape_count });
            }
            let payload = buf.read_tag_payload(length)?.to_vec();
            let id = peek_resource_id(&payload)?;
            doc.resources.insert(id, Resource::Shape { tag_id, payload });
            shapes_seen += 1;
            continue;
        }

        if tag::is_movie_clip_tag(tag_id) {
            if movie_clips_seen >= movie_clip_count {
                return Err(ScError::CountOverflow { kind: TagCategory::MovieClip, declared: movie_clip_count });
            }
            let payload = buf.read_tag_payload(length)?.to_vec();
            let id = peek_resource_id(&payload)?;
            doc.resources.insert(id, Resource::MovieClip { tag_id, payload });
            movie_clips_seen += 1;
            continue;
        }

        if tag::is_text_field_tag(tag_id) {
            if text_fields_seen >= text_field_count {
                return Err(ScError::CountOverflow { kind: TagCategory::TextField, declared: text_field_count });
            }
            let payload = buf.read_tag_payload(length)?.to_vec();
            let id = peek_resource_id(&payload)?;
            doc.resources.insert(id, Resource::TextField { tag_id, payload });
            text_fields_seen += 1;
            continue;
        }

        if tag::is_modifier_tag(tag_id) {
            if let Some(expected) = modifier_expected {
                if modifiers_seen >= expected {
                    return Err(ScError::CountOverflow { kind: TagCategory::Modifier, declared: expected });
                }
            }
            let payload = buf.read_tag_payload(length)?.to_vec();
            let id = peek_resource_id(&payload)?;
            doc.resources.insert(id, Resource::MovieClipModifier { tag_id, payload });
            modifiers_seen += 1;
            continue;
        }

        match tag_id {
            TAG_LOWRES_MARKER => {
                doc.use_lowres_texture = true;
            }
            TAG_EXTERNAL_TEXTURE_MARKER => {
                doc.has_external_texture = true;
            }
            TAG_UNCOMMON_MARKER => {
                doc.use_uncommon_texture = true;
            }
            TAG_POSTFIX => {
                let payload = buf.read_tag_payload(length)?.to_vec();
                let mut inner = ByteBuffer::from_vec(payload);
                let highres = inner.read_ascii()?;
                let lowres = inner.read_ascii()?;
                if !highres.is_empty() && !lowres.is_empty() {
                    doc.highres_postfix = highres;
                    doc.lowres_postfix = lowres;
                }
            }
            TAG_MATRIX | TAG_MATRIX_SHORT => {
                let payload = buf.read_tag_payload(length)?.to_vec();
                let matrix = Matrix2x3::decode(tag_id, &payload)?;
                doc.banks.last_mut().expect("primary bank always present").matrices.push(matrix);
            }
            TAG_COLOR => {
                let payload = buf.read_tag_payload(length)?.to_vec();
                let color = ColorTransform::decode(&payload)?;
                doc.banks.last_mut().expect("primary bank always present").colors.push(color);
            }
            TAG_MODIFIER_BLOCK_BEGIN => {
                let payload = buf.read_tag_payload(length)?.to_vec();
                let mut inner = ByteBuffer::from_vec(payload);
                modifier_expected = Some(inner.read_u16()?);
                modifiers_seen = 0;
            }
            TAG_BANK_BEGIN => {
                let payload = buf.read_tag_payload(length)?.to_vec();
                let mut inner = ByteBuffer::from_vec(payload);
                let name = inner.read_ascii()?;
                doc.banks.push(TransformBank::new(Some(name)));
            }
            _ => {
                log::debug!("skipping unknown tag {tag_id} ({length} bytes)");
                buf.read_tag_payload(length)?;
            }
        }
    }

    Ok(doc)
}

fn read_texture_tag(buf: &mut ByteBuffer, tag_id: u8, length: i32) -> ScResult<Texture> {
    let payload = buf.read_tag_payload(length)?.to_vec();
    let mut inner = ByteBuffer::from_vec(payload);

    let format = PixelFormat::from_index(inner.read_u8()?)?;
    let width = inner.read_u16()? as u32;
    let height = inner.read_u16()? as u32;

    let (mag_filter, min_filter, linear, downscaling) =
        filters_for_tag(tag_id).expect("tag id validated by is_texture_tag");

    let image = if inner.remaining() == 0 {
        PixelImage::new(width, height, format.channel_kind())
    } else {
        read_pixel_matrix(&mut inner, format, width, height, linear)?
    };

    Ok(Texture {
        pixel_format: format,
        mag_filter,
        min_filter,
        linear,
        downscaling,
        image,
    })
}
