use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_core::{DomainError, Entity, ItemId, MessageId, UserId};

/// A message about an item, from one user to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub item_id: ItemId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// True when the message belongs to the conversation between `a` and `b`
    /// about `item_id`, in either direction.
    pub fn is_between(&self, item_id: ItemId, a: UserId, b: UserId) -> bool {
        self.item_id == item_id
            && ((self.sender_id == a && self.receiver_id == b)
                || (self.sender_id == b && self.receiver_id == a))
    }
}

impl Entity for Message {
    type Id = MessageId;

    fn id(&self) -> MessageId {
        self.id
    }
}

/// A validated outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    item_id: ItemId,
    sender_id: UserId,
    receiver_id: UserId,
    content: String,
}

impl NewMessage {
    pub fn new(
        item_id: ItemId,
        sender_id: UserId,
        receiver_id: UserId,
        content: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if !item_id.is_valid() || !sender_id.is_valid() || !receiver_id.is_valid() {
            return Err(DomainError::invalid_id(
                "item_id, sender_id and receiver_id are required",
            ));
        }
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::validation("message content is empty"));
        }
        Ok(Self {
            item_id,
            sender_id,
            receiver_id,
            content,
        })
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn sender_id(&self) -> UserId {
        self.sender_id
    }

    pub fn receiver_id(&self) -> UserId {
        self.receiver_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_message(self, id: MessageId, created_at: DateTime<Utc>) -> Message {
        Message {
            id,
            item_id: self.item_id,
            sender_id: self.sender_id,
            receiver_id: self.receiver_id,
            content: self.content,
            created_at,
        }
    }
}

/// Oldest first; ties broken by id so the order is total.
pub fn sort_conversation(messages: &mut [Message]) {
    messages.sort_by_key(|m| (m.created_at, m.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn msg(id: i64, from: i64, to: i64, at: DateTime<Utc>) -> Message {
        NewMessage::new(ItemId::new(10), UserId::new(from), UserId::new(to), "hi")
            .unwrap()
            .into_message(MessageId::new(id), at)
    }

    #[test]
    fn empty_content_is_rejected() {
        let res = NewMessage::new(ItemId::new(1), UserId::new(1), UserId::new(2), "  ");
        assert!(matches!(res, Err(DomainError::Validation(_))));
    }

    #[test]
    fn missing_ids_are_rejected() {
        let res = NewMessage::new(ItemId::new(0), UserId::new(1), UserId::new(2), "hello");
        assert!(matches!(res, Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn conversation_matches_both_directions_only_for_the_item() {
        let now = Utc::now();
        let m = msg(1, 1, 2, now);
        assert!(m.is_between(ItemId::new(10), UserId::new(1), UserId::new(2)));
        assert!(m.is_between(ItemId::new(10), UserId::new(2), UserId::new(1)));
        assert!(!m.is_between(ItemId::new(11), UserId::new(1), UserId::new(2)));
        assert!(!m.is_between(ItemId::new(10), UserId::new(1), UserId::new(3)));
    }

    #[test]
    fn conversation_sorts_by_time_then_id() {
        let now = Utc::now();
        let mut msgs = vec![
            msg(3, 2, 1, now + Duration::seconds(5)),
            msg(2, 1, 2, now),
            msg(1, 1, 2, now),
        ];
        sort_conversation(&mut msgs);
        let ids: Vec<i64> = msgs.iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    proptest! {
        #[test]
        fn sorted_conversation_is_strictly_ordered(offsets in prop::collection::vec(0i64..5, 0..20)) {
            let base = Utc::now();
            let mut msgs: Vec<Message> = offsets
                .iter()
                .enumerate()
                .map(|(i, off)| msg(i as i64 + 1, 1, 2, base + Duration::seconds(*off)))
                .collect();
            sort_conversation(&mut msgs);
            for pair in msgs.windows(2) {
                prop_assert!((pair[0].created_at, pair[0].id) < (pair[1].created_at, pair[1].id));
            }
        }
    }
}
