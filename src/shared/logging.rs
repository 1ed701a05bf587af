//! Structured logging for the inbox
//!
//! Every network failure is absorbed at its call site, so these helpers are
//! the only trace of it. Fields are kept consistent across operations.

use crate::shared::errors::AppError;

/// Operation tag attached to every log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOperation {
    ConversationFetch,
    MessageFetch,
    MessageSubmit,
    RealtimeConnect,
    RealtimeDispatch,
    Reconcile,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::ConversationFetch => "conversation_fetch",
            LogOperation::MessageFetch => "message_fetch",
            LogOperation::MessageSubmit => "message_submit",
            LogOperation::RealtimeConnect => "realtime_connect",
            LogOperation::RealtimeDispatch => "realtime_dispatch",
            LogOperation::Reconcile => "reconcile",
        }
    }
}

pub fn log_conversations_loaded(count: usize) {
    tracing::info!(
        operation = LogOperation::ConversationFetch.as_str(),
        conversation_count = count,
        "Conversations loaded"
    );
}

pub fn log_conversations_error(error: &AppError) {
    tracing::error!(
        operation = LogOperation::ConversationFetch.as_str(),
        error = %error,
        server_error = error.is_server_error(),
        "Error fetching conversations"
    );
}

pub fn log_messages_loaded(conversation_id: &str, count: usize) {
    tracing::info!(
        operation = LogOperation::MessageFetch.as_str(),
        conversation_id = conversation_id,
        message_count = count,
        "Messages loaded"
    );
}

pub fn log_messages_error(conversation_id: &str, error: &AppError) {
    tracing::error!(
        operation = LogOperation::MessageFetch.as_str(),
        conversation_id = conversation_id,
        error = %error,
        server_error = error.is_server_error(),
        "Error fetching messages"
    );
}

/// A response arrived after the user moved on
pub fn log_stale_response(operation: LogOperation, conversation_id: Option<&str>) {
    tracing::debug!(
        operation = operation.as_str(),
        conversation_id = conversation_id.unwrap_or("-"),
        "Discarded stale response"
    );
}

pub fn log_message_submitted(conversation_id: &str, client_message_id: &str) {
    tracing::info!(
        operation = LogOperation::MessageSubmit.as_str(),
        conversation_id = conversation_id,
        client_message_id = client_message_id,
        "Message submitted"
    );
}

pub fn log_message_submit_error(conversation_id: &str, error: &AppError) {
    tracing::error!(
        operation = LogOperation::MessageSubmit.as_str(),
        conversation_id = conversation_id,
        error = %error,
        server_error = error.is_server_error(),
        "Error sending message"
    );
}

pub fn log_realtime_connecting(url: &str) {
    tracing::info!(
        operation = LogOperation::RealtimeConnect.as_str(),
        url = url,
        "Connecting to realtime channel"
    );
}

pub fn log_realtime_state(connected: bool) {
    if connected {
        tracing::info!(
            operation = LogOperation::RealtimeConnect.as_str(),
            "Realtime channel open"
        );
    } else {
        tracing::warn!(
            operation = LogOperation::RealtimeConnect.as_str(),
            "Realtime channel error, transport will retry"
        );
    }
}

pub fn log_realtime_connect_error(error: &AppError) {
    tracing::error!(
        operation = LogOperation::RealtimeConnect.as_str(),
        error = %error,
        "Failed to open realtime channel"
    );
}

pub fn log_realtime_event(event: &str, conversation_id: Option<&str>, subscribers: usize) {
    tracing::debug!(
        operation = LogOperation::RealtimeDispatch.as_str(),
        event = event,
        conversation_id = conversation_id.unwrap_or("-"),
        subscribers = subscribers,
        "Realtime event dispatched"
    );
}

pub fn log_realtime_decode_error(event: &str, error: &AppError) {
    tracing::warn!(
        operation = LogOperation::RealtimeDispatch.as_str(),
        event = event,
        error = %error,
        "Dropped undecodable realtime payload"
    );
}

pub fn log_realtime_unknown_event(event: &str) {
    tracing::trace!(
        operation = LogOperation::RealtimeDispatch.as_str(),
        event = event,
        "Ignored unknown realtime event"
    );
}

/// Optimistic entry swapped for (or dropped in favour of) the server record
pub fn log_pending_resolved(conversation_id: &str, client_message_id: &str, delivered: bool) {
    tracing::debug!(
        operation = LogOperation::Reconcile.as_str(),
        conversation_id = conversation_id,
        client_message_id = client_message_id,
        delivered = delivered,
        "Pending message resolved"
    );
}
