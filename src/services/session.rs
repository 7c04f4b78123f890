use chrono::Utc;

use crate::db::queries;
use crate::models::Session;
use crate::services::dialog;
use crate::state::AppState;

pub fn process_message(
    state: &AppState,
    conversation_id: &str,
    message: &str,
) -> anyhow::Result<Vec<String>> {
    let db = state
        .db
        .lock()
        .map_err(|_| anyhow::anyhow!("session store lock poisoned"))?;

    let mut session = queries::get_session(&db, conversation_id)?
        .unwrap_or_else(|| Session::new(conversation_id));

    let turn = match session.dialog.take() {
        None => {
            tracing::info!(conversation_id, "starting support dialog");
            dialog::begin(&mut session.profile)
        }
        Some(active) => {
            tracing::info!(
                conversation_id,
                step = active.step.as_str(),
                "resuming support dialog"
            );
            dialog::resume(active, &mut session.profile, message)
        }
    };

    match &turn.state {
        Some(next) => tracing::debug!(conversation_id, waiting_on = next.step.as_str(), "dialog suspended"),
        None => tracing::info!(conversation_id, ticket = ?session.profile.ticket, "dialog ended"),
    }

    session.dialog = turn.state;
    session.updated_at = Utc::now().naive_utc();
    queries::save_session(&db, &session)?;

    Ok(turn.replies)
}
