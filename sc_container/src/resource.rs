/// The four kinds of id-keyed resource the container carries as opaque byte
/// runs. Internal field layouts are never interpreted beyond the leading
/// resource id every one of these tag payloads opens with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Shape,
    MovieClip,
    TextField,
    MovieClipModifier,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Shape => "shape",
            ResourceKind::MovieClip => "movie clip",
            ResourceKind::TextField => "text field",
            ResourceKind::MovieClipModifier => "movie clip modifier",
        };
        f.write_str(name)
    }
}

/// An opaque tag payload, kept verbatim except for the id peeked off its
/// front to key it into [`crate::document::Document::resources`].
#[derive(Debug, Clone)]
pub enum Resource {
    Shape { tag_id: u8, payload: Vec<u8> },
    MovieClip { tag_id: u8, payload: Vec<u8> },
    TextField { tag_id: u8, payload: Vec<u8> },
    MovieClipModifier { tag_id: u8, payload: Vec<u8> },
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Shape { .. } => ResourceKind::Shape,
            Resource::MovieClip { .. } => ResourceKind::MovieClip,
            Resource::TextField { .. } => ResourceKind::TextField,
            Resource::MovieClipModifier { .. } => ResourceKind::MovieClipModifier,
        }
    }

    pub fn tag_id(&self) -> u8 {
        match self {
            Resource::Shape { tag_id, .. }
            | Resource::MovieClip { tag_id, .. }
            | Resource::TextField { tag_id, .. }
            | Resource::MovieClipModifier { tag_id, .. } => *tag_id,
        }
    }

    pub fn payload(&self) -> &[u8] {
        match self {
            Resource::Shape { payload, .. }
            | Resource::MovieClip { payload, .. }
            | Resource::TextField { payload, .. }
            | Resource::MovieClipModifier { payload, .. } => payload,
        }
    }
}
