use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_core::{DomainError, Entity, UserId};

pub const MAX_NAME_LEN: usize = 50;
pub const MIN_AGE: i32 = 20;
pub const MAX_AGE: i32 = 80;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub age: i32,
    pub registered_at: DateTime<Utc>,
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

/// A validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    age: i32,
}

impl NewUser {
    pub fn new(name: impl Into<String>, age: i32) -> Result<Self, DomainError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("invalid name: empty"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation("invalid name: too long"));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(DomainError::validation("invalid age: out of range"));
        }
        Ok(Self {
            name: name.to_string(),
            age,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn into_user(self, id: UserId, registered_at: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            age: self.age,
            registered_at,
        }
    }
}
