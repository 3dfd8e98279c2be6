use maybe_sync::{MaybeSend, MaybeSync};

/// Notifies the host application that the map state has changed and must be drawn again.
pub trait Messenger: MaybeSend + MaybeSync {
    /// Request redraw of the map.
    fn request_redraw(&self);
}

/// Messenger that ignores all requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyMessenger;

impl Messenger for DummyMessenger {
    fn request_redraw(&self) {}
}
