use image::{DynamicImage, GenericImage, GenericImageView, Luma, LumaA, Rgb, Rgba};

use crate::pixel::{ChannelKind, Channels};

/// The pixel buffer collaborator: width/height, per-pixel get/set, a cheap
/// clone, and a resize, backed by the `image` crate's [`DynamicImage`]. The
/// container never looks inside it past this interface.
#[derive(Debug, Clone)]
pub struct PixelImage {
    inner: DynamicImage,
}

impl PixelImage {
    pub fn new(width: u32, height: u32, kind: ChannelKind) -> Self {
        let inner = match kind {
            ChannelKind::Grey => DynamicImage::new_luma8(width, height),
            ChannelKind::GreyAlpha => DynamicImage::new_luma_a8(width, height),
            ChannelKind::Rgb => DynamicImage::new_rgb8(width, height),
            ChannelKind::Rgba => DynamicImage::new_rgba8(width, height),
        };
        Self { inner }
    }

    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    pub fn channel_kind(&self) -> ChannelKind {
        match &self.inner {
            DynamicImage::ImageLuma8(_) => ChannelKind::Grey,
            DynamicImage::ImageLumaA8(_) => ChannelKind::GreyAlpha,
            DynamicImage::ImageRgb8(_) => ChannelKind::Rgb,
            DynamicImage::ImageRgba8(_) => ChannelKind::Rgba,
            _ => ChannelKind::Rgba,
        }
    }

    pub fn has_alpha(&self) -> bool {
        self.channel_kind().has_alpha()
    }

    /// Reads back whatever channels the backing buffer actually stores,
    /// without routing through `Rgba<u8>` conversion: that conversion
    /// derives luminance-weighted grey from RGB and loses the real grey/alpha
    /// values the pixel codec wrote. `Channels` slot 0 is grey or red, slot 1
    /// is alpha (for grey-alpha) or green, slot 2 is blue, slot 3 is alpha.
    pub fn get(&self, x: u32, y: u32) -> Channels {
        match &self.inner {
            DynamicImage::ImageLuma8(buf) => {
                let p = buf.get_pixel(x, y).0;
                [p[0], 0, 0, 0]
            }
            DynamicImage::ImageLumaA8(buf) => {
                let p = buf.get_pixel(x, y).0;
                [p[0], p[1], 0, 0]
            }
            DynamicImage::ImageRgb8(buf) => {
                let p = buf.get_pixel(x, y).0;
                [p[0], p[1], p[2], 0]
            }
            DynamicImage::ImageRgba8(buf) => buf.get_pixel(x, y).0,
            _ => self.inner.get_pixel(x, y).0,
        }
    }

    pub fn set(&mut self, x: u32, y: u32, px: Channels) {
        match &mut self.inner {
            DynamicImage::ImageLuma8(buf) => buf.put_pixel(x, y, Luma([px[0]])),
            DynamicImage::ImageLumaA8(buf) => buf.put_pixel(x, y, LumaA([px[0], px[1]])),
            DynamicImage::ImageRgb8(buf) => buf.put_pixel(x, y, Rgb([px[0], px[1], px[2]])),
            DynamicImage::ImageRgba8(buf) => buf.put_pixel(x, y, Rgba(px)),
            _ => self.inner.put_pixel(x, y, Rgba(px)),
        }
    }

    /// A new image scaled by `factor` (e.g. `0.5` for a lowres companion),
    /// each side rounded to the nearest pixel and floored at 1.
    pub fn resize(&self, factor: f64) -> Self {
        let new_w = ((self.width() as f64) * factor).round().max(1.0) as u32;
        let new_h = ((self.height() as f64) * factor).round().max(1.0) as u32;
        Self {
            inner: self
                .inner
                .resize_exact(new_w, new_h, image::imageops::FilterType::Triangle),
        }
    }
}
