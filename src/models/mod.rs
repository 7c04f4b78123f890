pub mod dialog;
pub mod profile;
pub mod session;

pub use dialog::{Answers, DialogState, Prompt, Step, StepResult};
pub use profile::{ContactMethod, Profile, SupportKind, SUPPORT_TICKET};
pub use session::Session;
