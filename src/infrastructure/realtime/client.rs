//! Process-wide realtime client
//!
//! One connection per page. Components subscribe per event name and get a
//! guard back; dropping the guard removes only that handler, so unmounting
//! one view never silences another.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;
use once_cell::unsync::OnceCell;

use super::event_source::{self, EventSourceTransport};
use super::registry::{Handler, SubscriberRegistry, SubscriptionId};
use crate::config::AppConfig;
use crate::domain::models::{RealtimeEvent, RealtimeEventKind};
use crate::shared::errors::Result;
use crate::shared::logging::{
    log_realtime_connect_error, log_realtime_connecting, log_realtime_decode_error,
    log_realtime_event, log_realtime_state, log_realtime_unknown_event,
};

/// What the transport reports, before decoding
#[derive(Debug, Clone, PartialEq)]
pub enum TransportSignal {
    Opened,
    Failed,
    Frame { event: String, data: String },
}

struct Inner {
    url: String,
    registry: RefCell<SubscriberRegistry>,
    sender: UnboundedSender<TransportSignal>,
    signals: RefCell<Option<UnboundedReceiver<TransportSignal>>>,
    transport: RefCell<Option<EventSourceTransport>>,
    connected: Cell<bool>,
    had_error: Cell<bool>,
}

#[derive(Clone)]
pub struct RealtimeClient {
    inner: Rc<Inner>,
}

impl PartialEq for RealtimeClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for RealtimeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeClient")
            .field("url", &self.inner.url)
            .field("connected", &self.inner.connected.get())
            .finish()
    }
}

thread_local! {
    static GLOBAL: OnceCell<RealtimeClient> = OnceCell::new();
}

impl RealtimeClient {
    pub fn new(url: impl Into<String>) -> Self {
        let (sender, receiver) = mpsc::unbounded();
        Self {
            inner: Rc::new(Inner {
                url: url.into(),
                registry: RefCell::new(SubscriberRegistry::default()),
                sender,
                signals: RefCell::new(Some(receiver)),
                transport: RefCell::new(None),
                connected: Cell::new(false),
                had_error: Cell::new(false),
            }),
        }
    }

    /// The page-wide client, connected on first use
    pub fn global() -> Self {
        GLOBAL.with(|cell| {
            cell.get_or_init(|| {
                let client = RealtimeClient::new(AppConfig::current().realtime_url.clone());
                if let Err(e) = client.connect() {
                    log_realtime_connect_error(&e);
                }
                client
            })
            .clone()
        })
    }

    pub fn url(&self) -> &str {
        &self.inner.url
    }

    pub fn is_connected(&self) -> bool {
        self.inner.connected.get()
    }

    /// Opens the transport once; later calls are no-ops
    pub fn connect(&self) -> Result<()> {
        if self.inner.transport.borrow().is_some() {
            return Ok(());
        }
        log_realtime_connecting(&self.inner.url);
        let transport = event_source::open(&self.inner.url, self.inner.sender.clone())?;
        *self.inner.transport.borrow_mut() = Some(transport);
        Ok(())
    }

    pub fn subscribe<F>(&self, kind: RealtimeEventKind, handler: F) -> Subscription
    where
        F: Fn(&RealtimeEvent) + 'static,
    {
        let handler: Handler = Rc::new(handler);
        let id = self.inner.registry.borrow_mut().subscribe(kind, handler);
        Subscription {
            id,
            client: Rc::downgrade(&self.inner),
        }
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.registry.borrow_mut().unsubscribe(id)
    }

    pub fn subscriber_count(&self, kind: RealtimeEventKind) -> usize {
        self.inner.registry.borrow().count(kind)
    }

    /// Receiving end of the transport channel; only the first caller gets it
    pub fn take_signals(&self) -> Option<UnboundedReceiver<TransportSignal>> {
        self.inner.signals.borrow_mut().take()
    }

    /// Drains transport signals until the channel closes. Must run on the
    /// UI runtime so handlers may write signals.
    pub async fn pump(self) {
        let Some(mut signals) = self.take_signals() else {
            tracing::debug!("Realtime pump already running");
            return;
        };
        while let Some(signal) = signals.next().await {
            self.handle(signal);
        }
    }

    /// Returns how many handlers ran
    pub fn handle(&self, signal: TransportSignal) -> usize {
        match signal {
            TransportSignal::Opened => {
                self.inner.connected.set(true);
                log_realtime_state(true);
                if self.inner.had_error.replace(false) {
                    return self.dispatch(&RealtimeEvent::Reconnected);
                }
                0
            }
            TransportSignal::Failed => {
                if self.inner.connected.replace(false) {
                    log_realtime_state(false);
                }
                self.inner.had_error.set(true);
                0
            }
            TransportSignal::Frame { event, data } => {
                let Some(kind) = RealtimeEventKind::from_wire(&event) else {
                    log_realtime_unknown_event(&event);
                    return 0;
                };
                match decode(kind, &data) {
                    Ok(decoded) => self.dispatch(&decoded),
                    Err(e) => {
                        log_realtime_decode_error(&event, &e);
                        0
                    }
                }
            }
        }
    }

    pub fn dispatch(&self, event: &RealtimeEvent) -> usize {
        // Borrow released before calling out
        let handlers = self.inner.registry.borrow().handlers_for(event.kind());
        for handler in &handlers {
            handler(event);
        }
        log_realtime_event(event.kind().as_str(), event.conversation_id(), handlers.len());
        handlers.len()
    }

    #[cfg(test)]
    pub(crate) fn sender(&self) -> UnboundedSender<TransportSignal> {
        self.inner.sender.clone()
    }
}

fn decode(kind: RealtimeEventKind, data: &str) -> Result<RealtimeEvent> {
    Ok(match kind {
        RealtimeEventKind::MessageUpdate => RealtimeEvent::MessageUpdate(serde_json::from_str(data)?),
        RealtimeEventKind::StatusUpdate => RealtimeEvent::StatusUpdate(serde_json::from_str(data)?),
        RealtimeEventKind::Reconnected => RealtimeEvent::Reconnected,
    })
}

/// Removes its handler when dropped
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: SubscriptionId,
    client: Weak<Inner>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.client.upgrade() {
            inner.registry.borrow_mut().unsubscribe(self.id);
        }
    }
}
