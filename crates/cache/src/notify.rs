use tokio::sync::watch;

/// Explicit publish/subscribe contract for store changes.
///
/// A bare generation counter over a [`watch`] channel: every committed write
/// bumps it, and each live stream re-runs its query when it observes a new
/// generation. `watch` coalesces bursts (a subscriber busy querying sees one
/// wake-up for five writes), which is exactly the "latest snapshot wins"
/// behaviour the streams want. Receivers detaching never block publishers.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: watch::Sender<u64>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    /// Record a committed write. Never blocks, even with no subscribers.
    pub fn publish(&self) {
        self.tx.send_modify(|generation| *generation = generation.wrapping_add(1));
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}
