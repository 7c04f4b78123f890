use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::dialog::DialogState;
use crate::models::profile::Profile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub conversation_id: String,
    pub profile: Profile,
    pub dialog: Option<DialogState>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Session {
    pub fn new(conversation_id: &str) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            conversation_id: conversation_id.to_string(),
            profile: Profile::default(),
            dialog: None,
            created_at: now,
            updated_at: now,
        }
    }
}
