use std::path::PathBuf;

use thiserror::Error;

use crate::envelope::CompressionMethod;

/// The opaque-tag families that are counted against a header-declared limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCategory {
    Shape,
    MovieClip,
    TextField,
    Modifier,
    Texture,
}

impl std::fmt::Display for TagCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TagCategory::Shape => "shape",
            TagCategory::MovieClip => "movie clip",
            TagCategory::TextField => "text field",
            TagCategory::Modifier => "movie clip modifier",
            TagCategory::Texture => "texture",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ScError {
    #[error("read past the end of the buffer")]
    Truncated,

    #[error("tag declared a negative payload length ({0})")]
    NegativeLength(i32),

    #[error("stream has more {kind} tags than the {declared} declared in the header")]
    CountOverflow { kind: TagCategory, declared: u16 },

    #[error("pixel format index {0} is not one of the eleven known formats")]
    UnknownPixelFormat(u8),

    #[error("no external texture file found next to {base:?} (tried {tried:?})")]
    MissingExternalTexture { base: PathBuf, tried: Vec<PathBuf> },

    #[error("failed to decompress a {method:?} payload")]
    CompressionFailure {
        method: CompressionMethod,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ScResult<T> = Result<T, ScError>;
