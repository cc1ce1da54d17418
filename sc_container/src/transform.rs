use crate::buffer::ByteBuffer;
use crate::error::ScResult;
use crate::tag::TAG_MATRIX_SHORT;

/// Fixed-point scale shared by both matrix tag encodings (1/1024 units).
const MATRIX_SCALE: f32 = 1024.0;

/// An affine 2x3 transform, decoded from whichever matrix tag produced it.
/// Tag 36 is a compact `i16` wire variant of the same six fields tag 8
/// stores as `i32`; both decode to the same struct, and we always re-emit
/// tag 8 on write, since nothing in the data model remembers which variant a
/// matrix first arrived as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2x3 {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Matrix2x3 {
    pub fn decode(tag_id: u8, payload: &[u8]) -> ScResult<Self> {
        let mut buf = ByteBuffer::from_vec(payload.to_vec());
        let fields = if tag_id == TAG_MATRIX_SHORT {
            [
                buf.read_i16()? as f32,
                buf.read_i16()? as f32,
                buf.read_i16()? as f32,
                buf.read_i16()? as f32,
                buf.read_i16()? as f32,
                buf.read_i16()? as f32,
            ]
        } else {
            [
                buf.read_i32()? as f32,
                buf.read_i32()? as f32,
                buf.read_i32()? as f32,
                buf.read_i32()? as f32,
                buf.read_i32()? as f32,
                buf.read_i32()? as f32,
            ]
        };
        Ok(Self {
            a: fields[0] / MATRIX_SCALE,
            b: fields[1] / MATRIX_SCALE,
            c: fields[2] / MATRIX_SCALE,
            d: fields[3] / MATRIX_SCALE,
            tx: fields[4] / MATRIX_SCALE,
            ty: fields[5] / MATRIX_SCALE,
        })
    }

    pub fn encode(&self, buf: &mut ByteBuffer) {
        for v in [self.a, self.b, self.c, self.d, self.tx, self.ty] {
            buf.write_i32((v * MATRIX_SCALE).round() as i32);
        }
    }
}

/// A minimal colour transform: per-channel multipliers applied to a display
/// object, plus an alpha multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTransform {
    pub r_mult: u8,
    pub g_mult: u8,
    pub b_mult: u8,
    pub alpha_mult: u8,
}

impl ColorTransform {
    pub fn decode(payload: &[u8]) -> ScResult<Self> {
        let mut buf = ByteBuffer::from_vec(payload.to_vec());
        Ok(Self {
            r_mult: buf.read_u8()?,
            g_mult: buf.read_u8()?,
            b_mult: buf.read_u8()?,
            alpha_mult: buf.read_u8()?,
        })
    }

    pub fn encode(&self, buf: &mut ByteBuffer) {
        buf.write_u8(self.r_mult);
        buf.write_u8(self.g_mult);
        buf.write_u8(self.b_mult);
        buf.write_u8(self.alpha_mult);
    }
}

/// One transform bank: an ordered sequence of matrices and one of colours.
/// Only banks past the first carry a name, introduced by the bank-begin tag.
#[derive(Debug, Clone)]
pub struct TransformBank {
    pub name: Option<String>,
    pub matrices: Vec<Matrix2x3>,
    pub colors: Vec<ColorTransform>,
}

impl TransformBank {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            matrices: Vec::new(),
            colors: Vec::new(),
        }
    }
}
