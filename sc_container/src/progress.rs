/// A milestone a load or save pass reports through, in roughly chronological
/// order within a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    Loading,
    LoadingFinish,
    Saving,
    SavingFinish,
    TextureLoad,
    TextureSave,
}

#[derive(Debug, Clone)]
pub enum ProgressPayload {
    Path(String),
    Percent(f32),
}

/// An injectable progress sink, so callers embedding this crate in a UI or a
/// batch tool can report status without the container orchestrator knowing
/// anything about how progress gets displayed.
pub trait ProgressSink {
    fn on_progress(&mut self, state: ProgressState, payload: ProgressPayload);
}

/// The default sink: discards everything.
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn on_progress(&mut self, _state: ProgressState, _payload: ProgressPayload) {}
}
