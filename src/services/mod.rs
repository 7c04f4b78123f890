pub mod dialog;
pub mod messaging;
pub mod prompt;
pub mod session;
