use crate::models::{Prompt, StepResult};

const YES_WORDS: &[&str] = &["yes", "y", "yeah", "yep", "sure", "ok", "okay", "true", "1"];
const NO_WORDS: &[&str] = &["no", "n", "nope", "false", "2"];

pub fn render(prompt: &Prompt) -> String {
    match prompt {
        Prompt::Text { text } => text.clone(),
        Prompt::Choice { text, choices } => format!("{text} {}", inline_list(choices)),
        Prompt::Confirm { text } => {
            format!("{text} {}", inline_list(&["Yes".to_string(), "No".to_string()]))
        }
    }
}

// (1) A or (2) B; (1) A, (2) B, or (3) C
fn inline_list(choices: &[String]) -> String {
    let items: Vec<String> = choices
        .iter()
        .enumerate()
        .map(|(i, c)| format!("({}) {c}", i + 1))
        .collect();

    match items.len() {
        0 => String::new(),
        1 => items[0].clone(),
        2 => format!("{} or {}", items[0], items[1]),
        n => format!("{}, or {}", items[..n - 1].join(", "), items[n - 1]),
    }
}

// None means the prompt should be asked again
pub fn recognize(prompt: &Prompt, input: &str) -> Option<StepResult> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    match prompt {
        Prompt::Text { .. } => Some(StepResult::Text(input.to_string())),
        Prompt::Choice { choices, .. } => recognize_choice(choices, input).map(StepResult::Choice),
        Prompt::Confirm { .. } => recognize_confirm(input).map(StepResult::Confirmed),
    }
}

fn recognize_choice(choices: &[String], input: &str) -> Option<String> {
    let lowered = input.to_lowercase();

    if let Some(exact) = choices.iter().find(|c| c.to_lowercase() == lowered) {
        return Some(exact.clone());
    }

    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| choices.get(i)).cloned();
    }

    let mut partial = choices.iter().filter(|c| {
        let c = c.to_lowercase();
        c.contains(&lowered) || lowered.contains(&c)
    });
    match (partial.next(), partial.next()) {
        (Some(only), None) => Some(only.clone()),
        _ => None,
    }
}

fn recognize_confirm(input: &str) -> Option<bool> {
    let lowered = input
        .trim_end_matches(['.', '!'])
        .to_lowercase();
    if YES_WORDS.contains(&lowered.as_str()) {
        Some(true)
    } else if NO_WORDS.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode_prompt() -> Prompt {
        Prompt::choice("Pick one", &["Service Request", "Representative"])
    }

    #[test]
    fn renders_two_choices_with_or() {
        assert_eq!(
            render(&mode_prompt()),
            "Pick one (1) Service Request or (2) Representative"
        );
    }

    #[test]
    fn renders_longer_lists_with_commas() {
        let prompt = Prompt::choice("Issue?", &["TV", "Phone", "Linux"]);
        assert_eq!(render(&prompt), "Issue? (1) TV, (2) Phone, or (3) Linux");
    }

    #[test]
    fn renders_confirm_as_yes_no() {
        assert_eq!(
            render(&Prompt::confirm("Are you sure?")),
            "Are you sure? (1) Yes or (2) No"
        );
    }

    #[test]
    fn choice_matches_value_case_insensitively() {
        assert_eq!(
            recognize(&mode_prompt(), "  representative "),
            Some(StepResult::Choice("Representative".to_string()))
        );
    }

    #[test]
    fn choice_matches_ordinal() {
        assert_eq!(
            recognize(&mode_prompt(), "1"),
            Some(StepResult::Choice("Service Request".to_string()))
        );
        assert_eq!(recognize(&mode_prompt(), "0"), None);
        assert_eq!(recognize(&mode_prompt(), "3"), None);
    }

    #[test]
    fn choice_matches_unique_partial() {
        assert_eq!(
            recognize(&mode_prompt(), "service"),
            Some(StepResult::Choice("Service Request".to_string()))
        );
    }

    #[test]
    fn ambiguous_partial_is_rejected() {
        let prompt = Prompt::choice("Issue?", &["PC Laptop", "Mac Laptop"]);
        assert_eq!(recognize(&prompt, "laptop"), None);
        assert_eq!(
            recognize(&prompt, "mac laptop"),
            Some(StepResult::Choice("Mac Laptop".to_string()))
        );
    }

    #[test]
    fn unknown_choice_is_rejected() {
        assert_eq!(recognize(&mode_prompt(), "pizza"), None);
    }

    #[test]
    fn confirm_words() {
        let prompt = Prompt::confirm("Are you sure?");
        assert_eq!(recognize(&prompt, "Yes"), Some(StepResult::Confirmed(true)));
        assert_eq!(recognize(&prompt, "y"), Some(StepResult::Confirmed(true)));
        assert_eq!(recognize(&prompt, "ok!"), Some(StepResult::Confirmed(true)));
        assert_eq!(recognize(&prompt, "NO"), Some(StepResult::Confirmed(false)));
        assert_eq!(recognize(&prompt, "2"), Some(StepResult::Confirmed(false)));
        assert_eq!(recognize(&prompt, "maybe"), None);
    }

    #[test]
    fn text_accepts_anything_but_blank() {
        let prompt = Prompt::text("When?");
        assert_eq!(
            recognize(&prompt, " 3pm "),
            Some(StepResult::Text("3pm".to_string()))
        );
        assert_eq!(recognize(&prompt, "   "), None);
    }
}
