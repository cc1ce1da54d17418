//! Coverage for the nine testable properties documented in `SPEC_FULL.md`.

use pretty_assertions::assert_eq;

use sc_container::{
    load_bytes, load_file, save_bytes, save_file, ChannelKind, CompressionMethod, Document, Filter,
    PixelFormat, PixelImage, Resource, ScError, TagCategory, Texture,
};

fn sample_document() -> Document {
    let mut doc = Document::default();

    let mut image = PixelImage::new(2, 2, ChannelKind::Rgba);
    image.set(0, 0, [10, 20, 30, 255]);
    image.set(1, 1, [1, 2, 3, 4]);
    doc.textures.push(Texture {
        pixel_format: PixelFormat::from_index(0).unwrap(),
        mag_filter: Filter::Linear,
        min_filter: Filter::Nearest,
        linear: true,
        downscaling: true,
        image,
    });

    doc.resources.insert(
        1,
        Resource::Shape {
            tag_id: 2,
            payload: vec![1, 0, 9, 9, 9],
        },
    );
    doc.exports.entry(1).or_default().insert("hero".to_string());

    doc
}

/// Property #1: round trip holds for every compression method.
#[test]
fn round_trip_holds_across_compression_methods() {
    for method in [CompressionMethod::None, CompressionMethod::Lzma, CompressionMethod::Zstd] {
        let mut doc = sample_document();
        doc.compression = method;

        let bytes = save_bytes(&doc).unwrap();
        let loaded = load_bytes(&bytes).unwrap();

        assert_eq!(loaded.compression, method);
        assert_eq!(loaded.textures.len(), doc.textures.len());
        assert_eq!(loaded.textures[0].image.get(0, 0), [10, 20, 30, 255]);
        assert_eq!(loaded.textures[0].image.get(1, 1), [1, 2, 3, 4]);
        assert_eq!(loaded.resources.len(), 1);
        assert_eq!(loaded.exports[&1].iter().next().unwrap(), "hero");
    }
}

/// Property #3: switching `linear` produces identical payload length and
/// reconstructs the same pixel matrix, for a texture large enough to span
/// multiple 32x32 blocks.
#[test]
fn block_and_linear_layouts_reconstruct_the_same_pixels() {
    let width = 40;
    let height = 40;

    let mut image = PixelImage::new(width, height, ChannelKind::Rgba);
    for y in 0..height {
        for x in 0..width {
            image.set(x, y, [(x % 256) as u8, (y % 256) as u8, 7, 255]);
        }
    }

    let mut linear_doc = Document::default();
    linear_doc.textures.push(Texture {
        pixel_format: PixelFormat::from_index(0).unwrap(),
        mag_filter: Filter::Linear,
        min_filter: Filter::Nearest,
        linear: true,
        downscaling: true,
        image: image.clone(),
    });

    let mut block_doc = Document::default();
    block_doc.textures.push(Texture {
        pixel_format: PixelFormat::from_index(0).unwrap(),
        mag_filter: Filter::Linear,
        min_filter: Filter::Nearest,
        linear: false,
        downscaling: true,
        image,
    });

    let linear_bytes = save_bytes(&linear_doc).unwrap();
    let block_bytes = save_bytes(&block_doc).unwrap();
    assert_eq!(linear_bytes.len(), block_bytes.len());

    let linear_loaded = load_bytes(&linear_bytes).unwrap();
    let block_loaded = load_bytes(&block_bytes).unwrap();
    for y in 0..height {
        for x in 0..width {
            assert_eq!(linear_loaded.textures[0].image.get(x, y), block_loaded.textures[0].image.get(x, y));
        }
    }
}

/// Property #5: a crafted stream declaring N shapes but carrying N+1 shape
/// tags fails with `CountOverflow` at the (N+1)-th.
#[test]
fn declaring_fewer_shapes_than_are_present_overflows() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&1u16.to_le_bytes()); // shape_count = 1
    bytes.extend_from_slice(&0u16.to_le_bytes()); // movie_clip_count
    bytes.extend_from_slice(&0u16.to_le_bytes()); // texture_count
    bytes.extend_from_slice(&0u16.to_le_bytes()); // text_field_count
    bytes.extend_from_slice(&0u16.to_le_bytes()); // primary matrix count
    bytes.extend_from_slice(&0u16.to_le_bytes()); // primary color count
    bytes.extend_from_slice(&[0u8; 5]); // reserved
    bytes.extend_from_slice(&0u16.to_le_bytes()); // export count

    let shape_payload = |id: u16| -> Vec<u8> {
        let mut p = id.to_le_bytes().to_vec();
        p.push(0);
        p
    };

    for id in [1u16, 2u16] {
        let payload = shape_payload(id);
        bytes.push(2); // shape tag id
        bytes.extend_from_slice(&(payload.len() as i32).to_le_bytes());
        bytes.extend_from_slice(&payload);
    }
    bytes.push(0); // terminator
    bytes.extend_from_slice(&0i32.to_le_bytes());

    let err = load_bytes(&bytes).unwrap_err();
    assert!(matches!(
        err,
        ScError::CountOverflow { kind: TagCategory::Shape, declared: 1 }
    ));
}

/// Property #6: an unrecognised tag id with a valid length, injected mid
/// stream, must not alter any other parsed content.
#[test]
fn unknown_tag_is_skipped_without_disturbing_neighbours() {
    // No exports here: the export table is variable-length, and this test
    // splices at a fixed offset right past the (empty) export count.
    let mut doc = sample_document();
    doc.exports.clear();
    let known_bytes = save_bytes(&doc).unwrap();

    // Splice a harmless unknown tag (id 200, 3-byte payload) in right after
    // the 19-byte header/export preamble, before the first real tag.
    let mut spliced = known_bytes[..19].to_vec();
    spliced.push(200);
    spliced.extend_from_slice(&3i32.to_le_bytes());
    spliced.extend_from_slice(&[0xAA, 0xBB, 0xCC]);
    spliced.extend_from_slice(&known_bytes[19..]);

    let baseline = load_bytes(&known_bytes).unwrap();
    let spliced_loaded = load_bytes(&spliced).unwrap();

    assert_eq!(spliced_loaded.textures.len(), baseline.textures.len());
    assert_eq!(spliced_loaded.resources.len(), baseline.resources.len());
    assert_eq!(
        spliced_loaded.textures[0].image.get(0, 0),
        baseline.textures[0].image.get(0, 0)
    );
}

/// Property #7: when `use_uncommon_texture` is set and both highres and
/// lowres companion files exist, the highres file wins.
#[test]
fn highres_companion_file_wins_over_lowres() {
    let dir = std::env::temp_dir().join(format!("sc_container_invariant_p7_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let main_path = dir.join("foo.sc");

    let mut doc = Document::default();
    doc.has_external_texture = true;
    doc.use_uncommon_texture = true;

    let mut image = PixelImage::new(4, 4, ChannelKind::Rgba);
    image.set(0, 0, [9, 9, 9, 255]);
    doc.textures.push(Texture {
        pixel_format: PixelFormat::from_index(0).unwrap(),
        mag_filter: Filter::Linear,
        min_filter: Filter::Nearest,
        linear: true,
        downscaling: true,
        image,
    });

    save_file(&main_path, &doc).unwrap();
    assert!(dir.join("foo_highres_tex.sc").exists());
    assert!(dir.join("foo_lowres_tex.sc").exists());

    let loaded = load_file(&main_path).unwrap();
    // The lowres companion is written at half size (2x2); recovering the
    // full 4x4 image proves the highres file was the one actually read.
    assert_eq!(loaded.textures[0].image.width(), 4);
    assert_eq!(loaded.textures[0].image.height(), 4);
    assert_eq!(loaded.textures[0].image.get(0, 0), [9, 9, 9, 255]);

    std::fs::remove_dir_all(&dir).ok();
}

/// Property #8: a pixel written with alpha == 0 reads back as all-zero
/// channels, for formats that carry alpha.
#[test]
fn zero_alpha_pixel_reads_back_as_all_zero() {
    let mut image = PixelImage::new(1, 1, ChannelKind::Rgba);
    image.set(0, 0, [200, 150, 100, 0]);

    let mut doc = Document::default();
    doc.textures.push(Texture {
        pixel_format: PixelFormat::from_index(0).unwrap(),
        mag_filter: Filter::Linear,
        min_filter: Filter::Nearest,
        linear: true,
        downscaling: true,
        image,
    });

    let bytes = save_bytes(&doc).unwrap();
    let loaded = load_bytes(&bytes).unwrap();
    assert_eq!(loaded.textures[0].image.get(0, 0), [0, 0, 0, 0]);
}

/// Property #9: for 4-bit-per-channel formats, writing then reading an
/// 8-bit channel value round-trips to `round(round(v*k/255)*255/k)` where
/// `k` is the target format's per-channel maximum.
#[test]
fn four_bit_channel_round_trip_matches_the_scaling_formula() {
    fn round_scale(v: u32, num: u32, den: u32) -> u32 {
        (v * num + den / 2) / den
    }
    fn expected_round_trip(v: u8, bits: u32) -> u8 {
        let max = (1u32 << bits) - 1;
        let down = round_scale(v as u32, max, 255);
        round_scale(down, 255, max) as u8
    }

    // Pixel format index 2 is RGBA4444.
    for v in [0u8, 1, 16, 17, 127, 128, 200, 255] {
        let mut image = PixelImage::new(1, 1, ChannelKind::Rgba);
        image.set(0, 0, [v, v, v, v]);

        let mut doc = Document::default();
        doc.textures.push(Texture {
            pixel_format: PixelFormat::from_index(2).unwrap(),
            mag_filter: Filter::Linear,
            min_filter: Filter::Nearest,
            linear: true,
            downscaling: true,
            image,
        });

        let bytes = save_bytes(&doc).unwrap();
        let loaded = load_bytes(&bytes).unwrap();
        let px = loaded.textures[0].image.get(0, 0);
        let want = expected_round_trip(v, 4);
        assert_eq!(px, [want, want, want, want], "mismatch for input {v}");
    }
}
