use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(UserId);

/// A user as shown in the roster. Identity is `id`; the other fields are display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub display_name: String,
    pub birth_date: String,
}

impl UserRecord {
    pub fn new(id: UserId, display_name: impl Into<String>, birth_date: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            birth_date: birth_date.into(),
        }
    }

    /// Copy of this record with only the birth date replaced.
    pub fn with_birth_date(&self, birth_date: impl Into<String>) -> Self {
        Self {
            birth_date: birth_date.into(),
            ..self.clone()
        }
    }
}
