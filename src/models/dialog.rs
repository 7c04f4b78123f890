use serde::{Deserialize, Serialize};

use crate::errors::DialogError;
use crate::models::profile::{ContactMethod, Profile, SupportKind, SUPPORT_TICKET};

// execution order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    SupportMode,
    Kind,
    Genre,
    Duration,
    Spread,
    Contact,
    Time,
    Confirm,
    Summary,
}

impl Step {
    pub const ALL: [Step; 9] = [
        Step::SupportMode,
        Step::Kind,
        Step::Genre,
        Step::Duration,
        Step::Spread,
        Step::Contact,
        Step::Time,
        Step::Confirm,
        Step::Summary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::SupportMode => "support_mode",
            Step::Kind => "kind",
            Step::Genre => "genre",
            Step::Duration => "duration",
            Step::Spread => "spread",
            Step::Contact => "contact",
            Step::Time => "time",
            Step::Confirm => "confirm",
            Step::Summary => "summary",
        }
    }

    pub fn next(&self) -> Option<Step> {
        let idx = Step::ALL.iter().position(|s| s == self)?;
        Step::ALL.get(idx + 1).copied()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Prompt {
    Text { text: String },
    Choice { text: String, choices: Vec<String> },
    Confirm { text: String },
}

impl Prompt {
    pub fn text(text: &str) -> Self {
        Prompt::Text {
            text: text.to_string(),
        }
    }

    pub fn choice(text: &str, choices: &[&str]) -> Self {
        Prompt::Choice {
            text: text.to_string(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn confirm(text: &str) -> Self {
        Prompt::Confirm {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    Started,
    // previous step passed through without asking
    Skipped,
    Text(String),
    Choice(String),
    Confirmed(bool),
}

impl StepResult {
    pub fn into_value(self, step: Step) -> Result<String, DialogError> {
        match self {
            StepResult::Text(s) | StepResult::Choice(s) => Ok(s),
            other => Err(DialogError::UnexpectedResult {
                step,
                result: format!("{other:?}"),
            }),
        }
    }

    pub fn into_confirmed(self, step: Step) -> Result<bool, DialogError> {
        match self {
            StepResult::Confirmed(yes) => Ok(yes),
            other => Err(DialogError::UnexpectedResult {
                step,
                result: format!("{other:?}"),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Answers {
    pub kind: Option<SupportKind>,
    pub genre: Option<String>,
    pub duration: Option<String>,
    pub spread: Option<String>,
    pub contact_method: Option<ContactMethod>,
    pub contact: Option<String>,
    pub time: Option<String>,
}

impl Answers {
    pub fn require_kind(&self, step: Step) -> Result<SupportKind, DialogError> {
        self.kind.ok_or(DialogError::MissingAnswer { step, field: "kind" })
    }

    // Writes nothing unless every field the kind needs is present.
    // Representative clears issue details left from an earlier run.
    pub fn commit(&self, profile: &mut Profile) -> Result<(), DialogError> {
        let step = Step::Summary;
        let kind = self.require_kind(step)?;
        let contact = required(&self.contact, step, "contact")?;
        let time = required(&self.time, step, "time")?;

        let details = match kind {
            SupportKind::ServiceRequest => Some((
                required(&self.genre, step, "genre")?,
                required(&self.duration, step, "duration")?,
                required(&self.spread, step, "spread")?,
            )),
            SupportKind::Representative => None,
        };

        profile.kind = Some(kind);
        profile.contact = Some(contact);
        profile.time = Some(time);
        profile.ticket = Some(SUPPORT_TICKET);

        match details {
            Some((genre, duration, spread)) => {
                profile.genre = Some(genre);
                profile.duration = Some(duration);
                profile.spread = Some(spread);
            }
            None => {
                profile.genre = None;
                profile.duration = None;
                profile.spread = None;
            }
        }

        Ok(())
    }
}

fn required(value: &Option<String>, step: Step, field: &'static str) -> Result<String, DialogError> {
    value
        .clone()
        .ok_or(DialogError::MissingAnswer { step, field })
}

// `step` consumes the next inbound message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DialogState {
    pub step: Step,
    pub answers: Answers,
    pub prompt: Prompt,
}
