/// Knobs for [`crate::load_file`]. Bytes-only loading (`load_bytes`) has
/// nothing to configure since it never touches the filesystem.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// When `true` (the default), a document whose header asks for an
    /// external texture file that can't be found fails with
    /// `MissingExternalTexture`. Set `false` to tolerate loading a document
    /// with blank placeholder images instead.
    pub require_external_texture: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            require_external_texture: true,
        }
    }
}
