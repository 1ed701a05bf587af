use uuid::Uuid;

use crate::domain::models::{Conversation, OutboundMessage};

/// Turn the input box into a request body.
///
/// `None` means nothing should be sent: the draft is blank or no conversation
/// is open.
pub fn prepare_outbound(draft: &str, target: Option<&Conversation>) -> Option<OutboundMessage> {
    let body = draft.trim();
    if body.is_empty() {
        return None;
    }
    let target = target?;

    Some(OutboundMessage {
        conversation_id: target.conversation_id.clone(),
        recipient_wa_id: target.other_participant_wa_id.clone(),
        body: body.to_string(),
        client_message_id: Some(Uuid::new_v4().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Conversation {
        serde_json::from_str(
            r#"{"conversationId":"c1","otherParticipantWaId":"919999999999","lastMessage":"hi"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_blank_draft_is_not_sent() {
        assert_eq!(prepare_outbound("", Some(&target())), None);
        assert_eq!(prepare_outbound("  \n\t ", Some(&target())), None);
    }

    #[test]
    fn test_no_selection_is_not_sent() {
        assert_eq!(prepare_outbound("hello", None), None);
    }

    #[test]
    fn test_body_is_trimmed_and_addressed() {
        let outbound = prepare_outbound("  see you at 5 \n", Some(&target())).unwrap();
        assert_eq!(outbound.body, "see you at 5");
        assert_eq!(outbound.conversation_id, "c1");
        assert_eq!(outbound.recipient_wa_id, "919999999999");
        assert!(outbound.client_message_id.is_some());
    }

    #[test]
    fn test_each_submission_gets_its_own_correlation_id() {
        let a = prepare_outbound("x", Some(&target())).unwrap();
        let b = prepare_outbound("x", Some(&target())).unwrap();
        assert_ne!(a.client_message_id, b.client_message_id);
    }
}
