use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Form;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::services::session;
use crate::state::AppState;

const FALLBACK_REPLY: &str = "Sorry, I'm having trouble right now. Please try again in a moment.";

// Twilio posts many more fields than we read (AccountSid, NumMedia, SmsSid, ...)
// and signs all of them, so the form is kept as raw pairs.
pub struct TwilioWebhookForm {
    pub params: Vec<(String, String)>,
}

impl TwilioWebhookForm {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn pairs(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

// HMAC-SHA1 over url + every key/value pair sorted by key, base64 encoded.
pub fn twilio_signature(auth_token: &str, url: &str, params: &[(&str, &str)]) -> Option<String> {
    let mut data = url.to_string();
    let mut sorted_params = params.to_vec();
    sorted_params.sort();
    for (key, value) in &sorted_params {
        data.push_str(key);
        data.push_str(value);
    }

    let mut mac = Hmac::<Sha1>::new_from_slice(auth_token.as_bytes()).ok()?;
    mac.update(data.as_bytes());
    Some(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

fn webhook_url(headers: &HeaderMap) -> String {
    let proto = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("https");
    let host = headers
        .get("x-forwarded-host")
        .or_else(|| headers.get("host"))
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("{proto}://{host}/webhook/sms")
}

#[allow(clippy::result_large_err)]
fn verify_signature(
    state: &AppState,
    headers: &HeaderMap,
    form: &TwilioWebhookForm,
) -> Result<(), Response> {
    let signature = headers
        .get("x-twilio-signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if signature.is_empty() {
        tracing::warn!("missing X-Twilio-Signature header");
        return Err((StatusCode::FORBIDDEN, "Missing signature").into_response());
    }

    let expected = twilio_signature(
        &state.config.twilio_auth_token,
        &webhook_url(headers),
        &form.pairs(),
    );

    if expected.as_deref() != Some(signature) {
        tracing::warn!("invalid Twilio signature");
        return Err((StatusCode::FORBIDDEN, "Invalid signature").into_response());
    }
    Ok(())
}

pub async fn sms_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(params): Form<Vec<(String, String)>>,
) -> Response {
    let form = TwilioWebhookForm { params };

    // Skipped when no auth token is configured (dev mode)
    if !state.config.twilio_auth_token.is_empty() {
        if let Err(rejection) = verify_signature(&state, &headers, &form) {
            return rejection;
        }
    }

    let Some(from) = form.get("From").map(|v| v.trim().to_string()) else {
        tracing::warn!("webhook without From field");
        return (StatusCode::BAD_REQUEST, "Missing From").into_response();
    };
    let body = form.get("Body").unwrap_or("").trim().to_string();

    tracing::info!(from = %from, body = %body, "incoming SMS");

    let replies = match session::process_message(&state, &from, &body) {
        Ok(replies) => replies,
        Err(e) => {
            tracing::error!(error = %e, from = %from, "dialog turn failed");
            vec![FALLBACK_REPLY.to_string()]
        }
    };

    if let Err(e) = state.messaging.send_all(&from, &replies).await {
        tracing::error!(error = %e, from = %from, "failed to deliver replies");
    }

    twiml_response()
}

fn twiml_response() -> Response {
    (
        [(header::CONTENT_TYPE, "application/xml")],
        "<Response></Response>",
    )
        .into_response()
}
