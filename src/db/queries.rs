use anyhow::Context;
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::models::{DialogState, Profile, Session};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Sessions ──

pub fn get_session(conn: &Connection, conversation_id: &str) -> anyhow::Result<Option<Session>> {
    let mut stmt = conn.prepare(
        "SELECT conversation_id, profile, dialog, created_at, updated_at FROM sessions WHERE conversation_id = ?1",
    )?;

    let result = stmt.query_row(params![conversation_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
        ))
    });

    match result {
        Ok((conversation_id, profile_json, dialog_json, created_at_str, updated_at_str)) => {
            let profile: Profile = serde_json::from_str(&profile_json)
                .with_context(|| format!("corrupt profile for {conversation_id}"))?;

            // An unreadable dialog just means the next message starts over.
            let dialog = dialog_json.and_then(|json| {
                match serde_json::from_str::<DialogState>(&json) {
                    Ok(state) => Some(state),
                    Err(e) => {
                        tracing::warn!(conversation_id = %conversation_id, error = %e, "discarding unreadable dialog state");
                        None
                    }
                }
            });

            Ok(Some(Session {
                conversation_id,
                profile,
                dialog,
                created_at: parse_timestamp(&created_at_str),
                updated_at: parse_timestamp(&updated_at_str),
            }))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn save_session(conn: &Connection, session: &Session) -> anyhow::Result<()> {
    let profile_json = serde_json::to_string(&session.profile)?;
    let dialog_json = session
        .dialog
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    let created_at = session.created_at.format(TIMESTAMP_FORMAT).to_string();
    let updated_at = session.updated_at.format(TIMESTAMP_FORMAT).to_string();

    conn.execute(
        "INSERT INTO sessions (conversation_id, profile, dialog, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(conversation_id) DO UPDATE SET
           profile = excluded.profile,
           dialog = excluded.dialog,
           updated_at = excluded.updated_at",
        params![
            session.conversation_id,
            profile_json,
            dialog_json,
            created_at,
            updated_at
        ],
    )?;
    Ok(())
}

pub fn delete_session(conn: &Connection, conversation_id: &str) -> anyhow::Result<bool> {
    let count = conn.execute(
        "DELETE FROM sessions WHERE conversation_id = ?1",
        params![conversation_id],
    )?;
    Ok(count > 0)
}

// ── Stats ──

#[derive(Debug, Serialize)]
pub struct SessionStats {
    pub sessions: i64,
    pub active_dialogs: i64,
    pub tickets_issued: i64,
}

pub fn get_session_stats(conn: &Connection) -> anyhow::Result<SessionStats> {
    let stats = conn.query_row(
        "SELECT
            COUNT(*),
            COALESCE(SUM(dialog IS NOT NULL), 0),
            COALESCE(SUM(json_extract(profile, '$.ticket') IS NOT NULL), 0)
         FROM sessions",
        [],
        |row| {
            Ok(SessionStats {
                sessions: row.get(0)?,
                active_dialogs: row.get(1)?,
                tickets_issued: row.get(2)?,
            })
        },
    )?;
    Ok(stats)
}

fn parse_timestamp(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap_or_else(|_| Utc::now().naive_utc())
}
