use weighbridge_domain::ReadingListener;
use weighbridge_types::ScaleReading;

/// Subscribed reading listeners
#[derive(Default)]
pub(crate) struct Listeners {
    inner: Vec<ReadingListener>,
}

impl Listeners {
    pub(crate) fn push(&mut self, listener: ReadingListener) {
        self.inner.push(listener);
    }

    pub(crate) fn notify(&mut self, reading: &ScaleReading) {
        for listener in self.inner.iter_mut() {
            listener(reading);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.len()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners").field("count", &self.len()).finish()
    }
}
