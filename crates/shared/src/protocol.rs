//! Payloads served by the remote user directory.

use serde::{Deserialize, Serialize};

use crate::domain::{UserId, UserRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_date: String,
}

impl RemoteUser {
    /// `name` when the directory provides one, otherwise "first last".
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!(
                "{} {}",
                self.first_name.as_deref().unwrap_or_default(),
                self.last_name.as_deref().unwrap_or_default()
            )
            .trim()
            .to_string(),
        }
    }

    pub fn into_record(self) -> UserRecord {
        let display_name = self.display_name();
        UserRecord {
            id: self.id,
            display_name,
            birth_date: self.birth_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<RemoteUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl UsersResponse {
    pub fn into_records(self) -> Vec<UserRecord> {
        self.users.into_iter().map(RemoteUser::into_record).collect()
    }
}
