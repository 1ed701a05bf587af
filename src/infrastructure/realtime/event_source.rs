//! Browser `EventSource` transport
//!
//! The push server emits named SSE events (`messageUpdate`, `statusUpdate`).
//! Callbacks only forward raw frames into the client's channel; decoding and
//! fan-out happen in the drain task inside the Dioxus runtime.

use futures::channel::mpsc::UnboundedSender;

use super::client::TransportSignal;
use crate::shared::errors::Result;

#[cfg(target_arch = "wasm32")]
pub struct EventSourceTransport {
    #[allow(dead_code)]
    source: web_sys::EventSource,
}

#[cfg(target_arch = "wasm32")]
pub fn open(url: &str, signals: UnboundedSender<TransportSignal>) -> Result<EventSourceTransport> {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{EventSource, MessageEvent};

    use crate::domain::models::RealtimeEventKind;
    use crate::shared::errors::AppError;

    let source = EventSource::new(url)
        .map_err(|e| AppError::Realtime(format!("EventSource::new({}) failed: {:?}", url, e)))?;

    let tx = signals.clone();
    let onopen = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let _ = tx.unbounded_send(TransportSignal::Opened);
    }) as Box<dyn FnMut(_)>);
    source.set_onopen(Some(onopen.as_ref().unchecked_ref()));
    onopen.forget();

    let tx = signals.clone();
    let onerror = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let _ = tx.unbounded_send(TransportSignal::Failed);
    }) as Box<dyn FnMut(_)>);
    source.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    for kind in RealtimeEventKind::WIRE {
        let tx = signals.clone();
        let name = kind.as_str();
        let listener = Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Some(data) = event.data().as_string() {
                let _ = tx.unbounded_send(TransportSignal::Frame {
                    event: name.to_string(),
                    data,
                });
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        source
            .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
            .map_err(|e| AppError::Realtime(format!("listener for {} failed: {:?}", name, e)))?;
        listener.forget();
    }

    Ok(EventSourceTransport { source })
}

// Native builds (unit tests, tooling) have no EventSource
#[cfg(not(target_arch = "wasm32"))]
pub struct EventSourceTransport;

#[cfg(not(target_arch = "wasm32"))]
pub fn open(url: &str, _signals: UnboundedSender<TransportSignal>) -> Result<EventSourceTransport> {
    tracing::warn!("Realtime transport requires a browser, not connecting to {}", url);
    Ok(EventSourceTransport)
}
