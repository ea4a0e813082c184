//! Explicit subscription interface over telemetry events.
//!
//! The platform adapter pushes events into a [`TelemetryHub`], which
//! rebuilds the snapshot and notifies the callbacks registered for that
//! event kind. Registration is explicit in both directions: a callback is
//! installed with [`TelemetryHub::subscribe`] and removed when its
//! [`Subscription`] is cancelled or dropped. The latest snapshot is always
//! replaced as a whole before any callback observes it.

use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};

use futures::Stream;
use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tracing::debug;

use crate::accessory::AccessoryIdentity;
use crate::battery::status::StatusReport;
use crate::battery::types::StatusSnapshot;
use crate::telemetry::{RawBatteryEvent, TelemetryAggregator};

/// The two kinds of telemetry event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryEvent {
    /// The host battery state changed
    HostBatteryChanged,
    /// An accessory attached, detached, or changed capabilities
    AccessoryChanged,
}

type Callback = Arc<dyn Fn(&StatusSnapshot) + Send + Sync>;

struct Listener {
    id: u64,
    event: TelemetryEvent,
    callback: Callback,
}

struct HubInner {
    listeners: Mutex<Vec<Listener>>,
    snapshot: RwLock<StatusSnapshot>,
    next_id: AtomicU64,
}

/// Dispatches telemetry events to registered subscribers and keeps the
/// latest snapshot.
pub struct TelemetryHub {
    aggregator: TelemetryAggregator,
    inner: Arc<HubInner>,
}

impl TelemetryHub {
    /// Create a hub over the given aggregator.
    ///
    /// Until the first event arrives the snapshot carries the invalid
    /// sentinel set and classifies as accessory absent.
    pub fn new(aggregator: TelemetryAggregator) -> Self {
        Self {
            aggregator,
            inner: Arc::new(HubInner {
                listeners: Mutex::new(Vec::new()),
                snapshot: RwLock::new(StatusSnapshot::default()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Register a callback for one event kind.
    ///
    /// The callback receives the freshly built snapshot each time the event
    /// fires. It stays registered until the returned [`Subscription`] is
    /// cancelled or dropped.
    pub fn subscribe<F>(&self, event: TelemetryEvent, callback: F) -> Subscription
    where
        F: Fn(&StatusSnapshot) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().push(Listener {
            id,
            event,
            callback: Arc::new(callback),
        });
        debug!(id, ?event, "registered telemetry listener");
        Subscription {
            id,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// The latest snapshot.
    pub fn snapshot(&self) -> StatusSnapshot {
        *self.inner.snapshot.read()
    }

    /// Classification of the latest snapshot.
    pub fn status(&self) -> StatusReport {
        self.snapshot().classify()
    }

    /// Identity of the attached accessory, if any.
    pub fn accessory_identity(&self) -> Option<AccessoryIdentity> {
        self.aggregator.port().identity()
    }

    /// Entry point for a host battery broadcast.
    pub fn handle_battery_event(&self, event: &RawBatteryEvent) {
        let snapshot = self.aggregator.handle_battery_event(event);
        self.publish(TelemetryEvent::HostBatteryChanged, snapshot);
    }

    /// Entry point for an accessory attach, detach, or capability change.
    ///
    /// The accessory side is re-queried (or reset to sentinels); the host
    /// side keeps its most recent reading.
    pub fn handle_accessory_changed(&self) {
        let host = self.inner.snapshot.read().host;
        let snapshot = self.aggregator.handle_accessory_changed(host);
        self.publish(TelemetryEvent::AccessoryChanged, snapshot);
    }

    /// Async stream of snapshots for one event kind.
    ///
    /// The stream ends when the hub is dropped.
    pub fn updates(&self, event: TelemetryEvent) -> SnapshotStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = self.subscribe(event, move |snapshot| {
            let _ = tx.send(*snapshot);
        });
        SnapshotStream {
            rx,
            _subscription: subscription,
        }
    }

    fn publish(&self, event: TelemetryEvent, snapshot: StatusSnapshot) {
        *self.inner.snapshot.write() = snapshot;

        // Callbacks run without the registry lock held, so a callback may
        // itself subscribe or cancel.
        let callbacks: Vec<Callback> = {
            let listeners = self.inner.listeners.lock();
            listeners
                .iter()
                .filter(|listener| listener.event == event)
                .map(|listener| Arc::clone(&listener.callback))
                .collect()
        };

        debug!(?event, subscribers = callbacks.len(), "dispatching telemetry event");
        for callback in callbacks {
            callback(&snapshot);
        }
    }
}

/// Async stream of snapshots delivered for one event kind.
///
/// Obtained from [`TelemetryHub::updates`]. Dropping the stream removes the
/// underlying subscription.
pub struct SnapshotStream {
    rx: mpsc::UnboundedReceiver<StatusSnapshot>,
    _subscription: Subscription,
}

impl Stream for SnapshotStream {
    type Item = StatusSnapshot;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// Registration handle for one callback.
///
/// The callback stays installed for the lifetime of this handle; dropping
/// it (or calling [`Subscription::cancel`]) removes the callback before
/// returning, so no event delivered afterwards can reach it.
pub struct Subscription {
    id: u64,
    hub: Weak<HubInner>,
}

impl Subscription {
    /// Remove the callback now.
    pub fn cancel(self) {
        // Dropping does the work.
    }

    fn release(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            inner.listeners.lock().retain(|listener| listener.id != self.id);
            debug!(id = self.id, "removed telemetry listener");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
