use crate::image_buffer::PixelImage;
use crate::pixel::PixelFormat;
use crate::tag::{DEFAULT_TEXTURE_TAG, NEAREST_ANY_TEXTURE_TAG};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    Linear,
    LinearMipmapNearest,
}

#[derive(Debug, Clone)]
pub struct Texture {
    pub pixel_format: PixelFormat,
    pub mag_filter: Filter,
    pub min_filter: Filter,
    pub linear: bool,
    pub downscaling: bool,
    pub image: PixelImage,
}

struct TextureTagRow {
    id: u8,
    mag: Filter,
    min: Filter,
    linear: bool,
    downscaling: bool,
}

/// Every texture tag id except 34 ("nearest, any layout"), which is handled
/// separately since its mag filter alone determines it regardless of the
/// layout bits.
const TEXTURE_TAG_TABLE: &[TextureTagRow] = &[
    TextureTagRow { id: 1, mag: Filter::Linear, min: Filter::Nearest, linear: true, downscaling: true },
    TextureTagRow { id: 16, mag: Filter::Linear, min: Filter::LinearMipmapNearest, linear: true, downscaling: true },
    TextureTagRow { id: 19, mag: Filter::Linear, min: Filter::LinearMipmapNearest, linear: true, downscaling: false },
    TextureTagRow { id: 24, mag: Filter::Linear, min: Filter::Nearest, linear: true, downscaling: false },
    TextureTagRow { id: 27, mag: Filter::Linear, min: Filter::Nearest, linear: false, downscaling: false },
    TextureTagRow { id: 28, mag: Filter::Linear, min: Filter::Nearest, linear: false, downscaling: true },
    TextureTagRow { id: 29, mag: Filter::Linear, min: Filter::LinearMipmapNearest, linear: false, downscaling: true },
];

/// Looks up the filter/layout combination a texture tag id encodes. Tag 34
/// only pins the mag filter to nearest; its layout bits are unspecified in
/// the original format, so we record a representative `linear = true,
/// downscaling = true` here. This is safe for round-tripping: [`tag_for_filters`]
/// re-selects tag 34 for any texture whose mag filter is nearest, regardless
/// of what its layout fields hold.
pub fn filters_for_tag(id: u8) -> Option<(Filter, Filter, bool, bool)> {
    if id == NEAREST_ANY_TEXTURE_TAG {
        return Some((Filter::Nearest, Filter::Nearest, true, true));
    }
    TEXTURE_TAG_TABLE
        .iter()
        .find(|row| row.id == id)
        .map(|row| (row.mag, row.min, row.linear, row.downscaling))
}

pub fn tag_for_filters(mag: Filter, min: Filter, linear: bool, downscaling: bool) -> u8 {
    if mag == Filter::Nearest {
        return NEAREST_ANY_TEXTURE_TAG;
    }
    TEXTURE_TAG_TABLE
        .iter()
        .find(|row| row.mag == mag && row.min == min && row.linear == linear && row.downscaling == downscaling)
        .map(|row| row.id)
        .unwrap_or(DEFAULT_TEXTURE_TAG)
}
