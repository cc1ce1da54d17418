use std::collections::BTreeMap;

use indexmap::IndexSet;

use crate::envelope::CompressionMethod;
use crate::resource::Resource;
use crate::texture::Texture;
use crate::transform::TransformBank;

pub const DEFAULT_HIGHRES_POSTFIX: &str = "_highres";
pub const DEFAULT_LOWRES_POSTFIX: &str = "_lowres";

/// The whole parsed asset: header flags, textures, transform banks, the
/// id-keyed resource table, and the export-name table. This is what
/// [`crate::load_bytes`]/[`crate::load_file`] produce and
/// [`crate::save_bytes`]/[`crate::save_file`] consume.
#[derive(Debug, Clone)]
pub struct Document {
    pub compression: CompressionMethod,
    pub has_external_texture: bool,
    pub use_lowres_texture: bool,
    pub use_uncommon_texture: bool,
    pub highres_postfix: String,
    pub lowres_postfix: String,
    pub textures: Vec<Texture>,
    pub banks: Vec<TransformBank>,
    /// Keyed by resource id, ascending iteration order (emit order matches
    /// `BTreeMap`'s natural order).
    pub resources: BTreeMap<u16, Resource>,
    /// Keyed by resource id; each id maps to its distinct export names in
    /// the order they first appeared.
    pub exports: BTreeMap<u16, IndexSet<String>>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::None,
            has_external_texture: false,
            use_lowres_texture: false,
            use_uncommon_texture: false,
            highres_postfix: DEFAULT_HIGHRES_POSTFIX.to_string(),
            lowres_postfix: DEFAULT_LOWRES_POSTFIX.to_string(),
            textures: Vec::new(),
            banks: vec![TransformBank::new(None)],
            resources: BTreeMap::new(),
            exports: BTreeMap::new(),
        }
    }
}
