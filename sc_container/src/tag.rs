//! The closed tag-id enumeration from the container's wire format.
//!
//! Tag ids are never exhaustively matched as a Rust enum: the dispatcher in
//! [`crate::reader`] has to tolerate ids outside this set, so these stay as
//! plain `u8` constants and small membership tables instead.

pub const TAG_TERMINATOR: u8 = 0;

pub const TAG_MATRIX: u8 = 8;
pub const TAG_COLOR: u8 = 9;

pub const TAG_LOWRES_MARKER: u8 = 23;
pub const TAG_EXTERNAL_TEXTURE_MARKER: u8 = 26;
pub const TAG_UNCOMMON_MARKER: u8 = 30;
pub const TAG_POSTFIX: u8 = 32;

pub const TAG_MATRIX_SHORT: u8 = 36;
pub const TAG_MODIFIER_BLOCK_BEGIN: u8 = 37;
pub const TAG_BANK_BEGIN: u8 = 42;

pub const TEXTURE_TAGS: [u8; 8] = [1, 16, 19, 24, 27, 28, 29, 34];
pub const SHAPE_TAGS: [u8; 2] = [2, 18];
pub const MOVIE_CLIP_TAGS: [u8; 5] = [3, 10, 12, 14, 35];
pub const TEXT_FIELD_TAGS: [u8; 8] = [7, 15, 20, 21, 25, 33, 43, 44];
pub const MODIFIER_TAGS: [u8; 3] = [38, 39, 40];

pub const DEFAULT_TEXTURE_TAG: u8 = 1;
pub const NEAREST_ANY_TEXTURE_TAG: u8 = 34;

pub fn is_texture_tag(id: u8) -> bool {
    TEXTURE_TAGS.contains(&id)
}

pub fn is_shape_tag(id: u8) -> bool {
    SHAPE_TAGS.contains(&id)
}

pub fn is_movie_clip_tag(id: u8) -> bool {
    MOVIE_CLIP_TAGS.contains(&id)
}

pub fn is_text_field_tag(id: u8) -> bool {
    TEXT_FIELD_TAGS.contains(&id)
}

pub fn is_modifier_tag(id: u8) -> bool {
    MODIFIER_TAGS.contains(&id)
}
