use std::fmt;

use serde::{Deserialize, Serialize};

// handed out for every confirmed request
pub const SUPPORT_TICKET: u64 = 27081114610276727;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SupportKind {
    ServiceRequest,
    Representative,
}

impl SupportKind {
    pub fn label(&self) -> &'static str {
        match self {
            SupportKind::ServiceRequest => "Service Request",
            SupportKind::Representative => "Representative",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "Service Request" => Some(SupportKind::ServiceRequest),
            "Representative" => Some(SupportKind::Representative),
            _ => None,
        }
    }
}

impl fmt::Display for SupportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContactMethod {
    Phone,
    Email,
}

impl ContactMethod {
    pub fn label(&self) -> &'static str {
        match self {
            ContactMethod::Phone => "Phone Number",
            ContactMethod::Email => "Email",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "Phone Number" => Some(ContactMethod::Phone),
            "Email" => Some(ContactMethod::Email),
            _ => None,
        }
    }
}

// Only a confirmed summary writes here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub kind: Option<SupportKind>,
    pub genre: Option<String>,
    pub duration: Option<String>,
    pub spread: Option<String>,
    pub contact: Option<String>,
    pub time: Option<String>,
    // above 2^53, so kept as a JSON string for JavaScript clients
    #[serde(with = "ticket_string", default)]
    pub ticket: Option<u64>,
}

mod ticket_string {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(ticket: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match ticket {
            Some(n) => serializer.serialize_str(&n.to_string()),
            None => serializer.serialize_none(),
        }
    }

    // older rows stored the ticket as a number
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(n)) => Ok(Some(n)),
            Some(Raw::Text(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}
