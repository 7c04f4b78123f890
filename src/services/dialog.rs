use crate::errors::DialogError;
use crate::models::{
    Answers, ContactMethod, DialogState, Profile, Prompt, Step, StepResult, SupportKind,
};
use crate::services::prompt;

pub const WELCOME: &str = "Hello, I'm sorry to hear that you are having tech issues. I am the Service Help Bot, and I hope I can help you work things out!";
pub const MODE_PROMPT: &str = "Would you like to Create a Service Request or Talk to a Representative?";
pub const CATEGORY_PROMPT: &str = "Please choose the option that best describes your issue";
pub const DURATION_PROMPT: &str = "How long has this issue persisted?";
pub const SPREAD_PROMPT: &str = "How many others are experiencing this issue right now?";
pub const CONTACT_METHOD_PROMPT: &str = "How would you like to be contacted for support today?";
pub const PHONE_PROMPT: &str = "Please enter your phone number";
pub const EMAIL_PROMPT: &str = "Please enter your email";
pub const TIME_PROMPT: &str = "Please enter the best time to contact you";
pub const CONFIRM_PROMPT: &str = "Are you sure?";
pub const DECLINED: &str = "Ok. Your ticket will not be created.";
pub const RUN_AGAIN: &str = "Type anything to run the bot again";

pub const ISSUE_CATEGORIES: [&str; 9] = [
    "PC Desktop",
    "iMac",
    "PC Laptop",
    "Mac Laptop",
    "Linux",
    "Phone",
    "Tablet",
    "Internet",
    "TV",
];

#[derive(Debug)]
pub struct Turn {
    pub replies: Vec<String>,
    // None once the dialog has ended
    pub state: Option<DialogState>,
}

enum Outcome {
    Prompt(Prompt),
    Next(StepResult),
    End,
}

pub fn begin(profile: &mut Profile) -> Turn {
    let mut replies = Vec::new();
    let state = run_from(
        Step::SupportMode,
        Answers::default(),
        StepResult::Started,
        profile,
        &mut replies,
    );
    Turn { replies, state }
}

pub fn resume(state: DialogState, profile: &mut Profile, input: &str) -> Turn {
    let mut replies = Vec::new();

    match prompt::recognize(&state.prompt, input) {
        Some(result) => {
            let next = run_from(state.step, state.answers, result, profile, &mut replies);
            Turn {
                replies,
                state: next,
            }
        }
        None => {
            tracing::debug!(step = state.step.as_str(), "reply not recognized, asking again");
            replies.push(prompt::render(&state.prompt));
            Turn {
                replies,
                state: Some(state),
            }
        }
    }
}

fn run_from(
    mut step: Step,
    mut answers: Answers,
    mut result: StepResult,
    profile: &mut Profile,
    replies: &mut Vec<String>,
) -> Option<DialogState> {
    loop {
        match run_step(step, &mut answers, result, profile, replies) {
            Ok(Outcome::Prompt(prompt)) => {
                replies.push(prompt::render(&prompt));
                let next = step.next()?;
                return Some(DialogState {
                    step: next,
                    answers,
                    prompt,
                });
            }
            Ok(Outcome::Next(carried)) => {
                step = step.next()?;
                result = carried;
            }
            Ok(Outcome::End) => return None,
            Err(e) => {
                tracing::error!(step = e.step().as_str(), error = %e, "dialog aborted");
                replies.push(format!("Error in {} step", e.step().as_str()));
                replies.push(RUN_AGAIN.to_string());
                return None;
            }
        }
    }
}

fn run_step(
    step: Step,
    answers: &mut Answers,
    result: StepResult,
    profile: &mut Profile,
    replies: &mut Vec<String>,
) -> Result<Outcome, DialogError> {
    match step {
        Step::SupportMode => {
            replies.push(WELCOME.to_string());
            Ok(Outcome::Prompt(Prompt::choice(
                MODE_PROMPT,
                &[
                    SupportKind::ServiceRequest.label(),
                    SupportKind::Representative.label(),
                ],
            )))
        }

        Step::Kind => {
            let label = result.into_value(step)?;
            let kind = SupportKind::from_label(&label)
                .ok_or(DialogError::UnexpectedAnswer { step, value: label })?;
            answers.kind = Some(kind);

            match kind {
                SupportKind::Representative => Ok(Outcome::Next(StepResult::Skipped)),
                SupportKind::ServiceRequest => Ok(Outcome::Prompt(Prompt::choice(
                    CATEGORY_PROMPT,
                    &ISSUE_CATEGORIES,
                ))),
            }
        }

        Step::Genre => match answers.require_kind(step)? {
            SupportKind::Representative => Ok(Outcome::Next(StepResult::Skipped)),
            SupportKind::ServiceRequest => {
                answers.genre = Some(result.into_value(step)?);
                Ok(Outcome::Prompt(Prompt::text(DURATION_PROMPT)))
            }
        },

        Step::Duration => match answers.require_kind(step)? {
            SupportKind::Representative => Ok(Outcome::Next(StepResult::Skipped)),
            SupportKind::ServiceRequest => {
                answers.duration = Some(result.into_value(step)?);
                Ok(Outcome::Prompt(Prompt::text(SPREAD_PROMPT)))
            }
        },

        Step::Spread => {
            if result != StepResult::Skipped {
                answers.spread = Some(result.into_value(step)?);
            }
            Ok(Outcome::Prompt(Prompt::choice(
                CONTACT_METHOD_PROMPT,
                &[ContactMethod::Phone.label(), ContactMethod::Email.label()],
            )))
        }

        Step::Contact => {
            let label = result.into_value(step)?;
            let method = ContactMethod::from_label(&label);
            answers.contact_method = method;

            // anything other than a phone number is asked for an email
            let question = match method {
                Some(ContactMethod::Phone) => PHONE_PROMPT,
                _ => EMAIL_PROMPT,
            };
            Ok(Outcome::Prompt(Prompt::text(question)))
        }

        Step::Time => {
            answers.contact = Some(result.into_value(step)?);
            Ok(Outcome::Prompt(Prompt::text(TIME_PROMPT)))
        }

        Step::Confirm => {
            answers.time = Some(result.into_value(step)?);
            Ok(Outcome::Prompt(Prompt::confirm(CONFIRM_PROMPT)))
        }

        Step::Summary => {
            if result.into_confirmed(step)? {
                answers.commit(profile)?;
                replies.extend(summary(profile));
            } else {
                replies.push(DECLINED.to_string());
            }
            replies.push(RUN_AGAIN.to_string());
            Ok(Outcome::End)
        }
    }
}

fn summary(profile: &Profile) -> Vec<String> {
    let kind = profile.kind.map(|k| k.label()).unwrap_or_default();
    let contact = profile.contact.as_deref().unwrap_or_default();
    let time = profile.time.as_deref().unwrap_or_default();

    let mut details = String::new();
    if profile.kind == Some(SupportKind::ServiceRequest) {
        details.push_str(&format!(
            "Nature of issue: {}. Duration of issue: {}. Others affected: {}. ",
            profile.genre.as_deref().unwrap_or_default(),
            profile.duration.as_deref().unwrap_or_default(),
            profile.spread.as_deref().unwrap_or_default(),
        ));
    }
    details.push_str(&format!("Contact information: {contact}."));

    let mut messages = vec![
        format!("Support type: {kind}."),
        details,
        format!(
            "A technical support specialist has been notified and will contact you. Chosen time: {time}. A ticket has been created for this issue."
        ),
    ];
    if let Some(ticket) = profile.ticket {
        messages.push(format!("Support ticket number: {ticket}"));
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SUPPORT_TICKET;

    // every reply sent, plus the final dialog state
    fn drive(profile: &mut Profile, inputs: &[&str]) -> (Vec<String>, Option<DialogState>) {
        let turn = begin(profile);
        let mut replies = turn.replies;
        let mut state = turn.state;
        for input in inputs {
            let current = state.take().expect("dialog ended before all inputs were used");
            let turn = resume(current, profile, input);
            replies.extend(turn.replies);
            state = turn.state;
        }
        (replies, state)
    }

    #[test]
    fn begin_greets_and_asks_for_mode() {
        let mut profile = Profile::default();
        let turn = begin(&mut profile);

        assert_eq!(turn.replies.len(), 2);
        assert_eq!(turn.replies[0], WELCOME);
        assert!(turn.replies[1].starts_with(MODE_PROMPT));

        let state = turn.state.unwrap();
        assert_eq!(state.step, Step::Kind);
        assert_eq!(state.answers, Answers::default());
    }

    #[test]
    fn representative_skips_issue_questions() {
        let mut profile = Profile::default();
        let (replies, state) = drive(&mut profile, &["Representative"]);

        let last = replies.last().unwrap();
        assert!(last.starts_with(CONTACT_METHOD_PROMPT));
        let state = state.unwrap();
        assert_eq!(state.step, Step::Contact);
        assert_eq!(state.answers.kind, Some(SupportKind::Representative));
        assert_eq!(state.answers.genre, None);
        assert_eq!(state.answers.spread, None);
    }

    #[test]
    fn representative_confirmed_scenario() {
        let mut profile = Profile::default();
        let (replies, state) = drive(
            &mut profile,
            &["Representative", "Phone Number", "555-1234", "3pm", "yes"],
        );

        assert!(state.is_none());
        assert!(replies.contains(&"Support type: Representative.".to_string()));
        assert!(replies.contains(&"Contact information: 555-1234.".to_string()));
        assert!(replies.contains(&format!("Support ticket number: {SUPPORT_TICKET}")));
        assert!(!replies.iter().any(|r| r.contains("Nature of issue")));
        assert_eq!(replies.last().unwrap(), RUN_AGAIN);

        assert_eq!(profile.kind, Some(SupportKind::Representative));
        assert_eq!(profile.contact.as_deref(), Some("555-1234"));
        assert_eq!(profile.time.as_deref(), Some("3pm"));
        assert_eq!(profile.ticket, Some(27081114610276727));
        assert_eq!(profile.genre, None);
        assert_eq!(profile.duration, None);
        assert_eq!(profile.spread, None);
    }

    #[test]
    fn service_request_confirmed_includes_details() {
        let mut profile = Profile::default();
        let (replies, state) = drive(
            &mut profile,
            &[
                "Service Request",
                "PC Laptop",
                "2 days",
                "5 people",
                "Email",
                "a@b.com",
                "9am",
                "yes",
            ],
        );

        assert!(state.is_none());
        assert!(replies.contains(
            &"Nature of issue: PC Laptop. Duration of issue: 2 days. Others affected: 5 people. Contact information: a@b.com."
                .to_string()
        ));
        assert_eq!(profile.genre.as_deref(), Some("PC Laptop"));
        assert_eq!(profile.duration.as_deref(), Some("2 days"));
        assert_eq!(profile.spread.as_deref(), Some("5 people"));
        assert_eq!(profile.contact.as_deref(), Some("a@b.com"));
        assert_eq!(profile.ticket, Some(SUPPORT_TICKET));
    }

    #[test]
    fn declining_leaves_profile_untouched() {
        let mut profile = Profile::default();
        let (_, state) = drive(
            &mut profile,
            &[
                "Service Request",
                "Mac Laptop",
                "2 days",
                "5 people",
                "Email",
                "a@b.com",
                "9am",
            ],
        );
        let state = state.unwrap();
        assert_eq!(state.step, Step::Summary);
        assert_eq!(state.answers.genre.as_deref(), Some("Mac Laptop"));

        let last = resume(state, &mut profile, "no");
        assert!(last.state.is_none());
        assert_eq!(last.replies, vec![DECLINED.to_string(), RUN_AGAIN.to_string()]);
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn unrecognized_choice_repeats_prompt() {
        let mut profile = Profile::default();
        let state = begin(&mut profile).state.unwrap();

        let turn = resume(state.clone(), &mut profile, "pizza");
        assert_eq!(turn.replies.len(), 1);
        assert!(turn.replies[0].starts_with(MODE_PROMPT));
        assert_eq!(turn.state, Some(state));
    }

    #[test]
    fn contact_holds_value_not_method() {
        let mut profile = Profile::default();
        let (_, state) = drive(&mut profile, &["2", "1", "555-0000"]);

        let state = state.unwrap();
        assert_eq!(state.answers.contact_method, Some(ContactMethod::Phone));
        assert_eq!(state.answers.contact.as_deref(), Some("555-0000"));
    }

    #[test]
    fn rerun_reuses_profile_and_clears_stale_details() {
        let mut profile = Profile::default();
        drive(
            &mut profile,
            &["1", "TV", "a week", "nobody", "2", "me@x.org", "noon", "y"],
        );
        assert_eq!(profile.genre.as_deref(), Some("TV"));

        let (replies, _) = drive(&mut profile, &["2", "1", "555-9999", "5pm", "y"]);
        assert!(replies.contains(&"Support type: Representative.".to_string()));
        assert_eq!(profile.kind, Some(SupportKind::Representative));
        assert_eq!(profile.contact.as_deref(), Some("555-9999"));
        assert_eq!(profile.genre, None);
        assert_eq!(profile.duration, None);
        assert_eq!(profile.spread, None);
    }

    #[test]
    fn missing_kind_aborts_with_diagnostic() {
        let mut profile = Profile::default();
        let state = DialogState {
            step: Step::Genre,
            answers: Answers::default(),
            prompt: Prompt::choice(CATEGORY_PROMPT, &ISSUE_CATEGORIES),
        };

        let turn = resume(state, &mut profile, "TV");
        assert!(turn.state.is_none());
        assert_eq!(
            turn.replies,
            vec!["Error in genre step".to_string(), RUN_AGAIN.to_string()]
        );
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn unknown_kind_label_aborts() {
        let mut profile = Profile::default();
        let state = DialogState {
            step: Step::Kind,
            answers: Answers::default(),
            prompt: Prompt::choice(MODE_PROMPT, &["Billing"]),
        };

        let turn = resume(state, &mut profile, "Billing");
        assert!(turn.state.is_none());
        assert_eq!(turn.replies[0], "Error in kind step");
    }

    #[test]
    fn unknown_contact_method_asks_for_email() {
        let mut profile = Profile::default();
        let state = DialogState {
            step: Step::Contact,
            answers: Answers {
                kind: Some(SupportKind::Representative),
                ..Default::default()
            },
            prompt: Prompt::choice(CONTACT_METHOD_PROMPT, &["Fax"]),
        };

        let turn = resume(state, &mut profile, "Fax");
        assert_eq!(turn.replies, vec![EMAIL_PROMPT.to_string()]);
        let state = turn.state.unwrap();
        assert_eq!(state.step, Step::Time);
        assert_eq!(state.answers.contact_method, None);
    }

    #[test]
    fn incomplete_answers_do_not_commit() {
        let mut profile = Profile::default();
        let answers = Answers {
            kind: Some(SupportKind::ServiceRequest),
            contact: Some("a@b.com".to_string()),
            time: Some("9am".to_string()),
            ..Default::default()
        };

        let err = answers.commit(&mut profile).unwrap_err();
        assert_eq!(
            err,
            DialogError::MissingAnswer {
                step: Step::Summary,
                field: "genre"
            }
        );
        assert_eq!(profile, Profile::default());
    }
}
