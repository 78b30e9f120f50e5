//! Live conversion over WebSocket.
//!
//! The client sends edit commands as JSON text frames:
//!
//! ```json
//! {"type": "set_amount", "amount": "12.5"}
//! {"type": "set_from", "code": "GBP"}
//! {"type": "set_to", "code": "JPY"}
//! {"type": "swap"}
//! {"type": "refresh"}
//! ```
//!
//! Each edit is debounced server-side; the client receives one
//! `converted`, `invalid` or `cleared` frame per settled input.

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tallykit_core::currency::{ConversionSession, SessionUpdate};
use tallykit_shared::{AppError, CurrencyCode};

use crate::AppState;
use crate::routes::convert::ConversionView;

/// Creates the live conversion route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/convert/live", get(upgrade))
}

/// An edit sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Replace the amount text.
    SetAmount {
        /// New amount text.
        amount: String,
    },
    /// Replace the source currency.
    SetFrom {
        /// Currency code.
        code: String,
    },
    /// Replace the target currency.
    SetTo {
        /// Currency code.
        code: String,
    },
    /// Exchange source and target.
    Swap,
    /// Convert the current input again.
    Refresh,
}

/// A frame sent to the client.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Result for the latest input.
    Converted {
        /// Input generation.
        generation: u64,
        /// The conversion.
        #[serde(flatten)]
        conversion: ConversionView,
    },
    /// The latest input is not convertible.
    Invalid {
        /// Input generation.
        generation: u64,
        /// Reason.
        message: String,
    },
    /// Drop any shown result.
    Cleared {
        /// Input generation.
        generation: u64,
    },
    /// A command was rejected without changing the session.
    Error {
        /// Error code.
        error: &'static str,
        /// Reason.
        message: String,
    },
}

impl From<SessionUpdate> for Event {
    fn from(update: SessionUpdate) -> Self {
        match update {
            SessionUpdate::Converted { generation, result } => Self::Converted {
                generation,
                conversion: ConversionView::from(&result),
            },
            SessionUpdate::Invalid { generation, error } => Self::Invalid {
                generation,
                message: error.to_string(),
            },
            SessionUpdate::Cleared { generation } => Self::Cleared { generation },
        }
    }
}

impl From<AppError> for Event {
    fn from(err: AppError) -> Self {
        Self::Error {
            error: err.error_code(),
            message: err.to_string(),
        }
    }
}

/// Applies one text frame to the session.
///
/// Returns an error event when the frame is not a valid command. A
/// rejected command leaves the session unchanged.
pub fn apply_command(session: &mut ConversionSession, text: &str) -> Result<(), Event> {
    let command: Command = serde_json::from_str(text)
        .map_err(|e| Event::from(AppError::Validation(format!("bad command: {e}"))))?;

    match command {
        Command::SetAmount { amount } => session.set_amount(amount),
        Command::SetFrom { code } => session.set_from(parse_code(&code)?),
        Command::SetTo { code } => session.set_to(parse_code(&code)?),
        Command::Swap => session.swap(),
        Command::Refresh => session.refresh(),
    }
    Ok(())
}

fn parse_code(raw: &str) -> Result<CurrencyCode, Event> {
    CurrencyCode::parse(raw).map_err(|e| Event::from(AppError::Validation(e.to_string())))
}

/// GET `/convert/live` - Upgrades to a live conversion session.
async fn upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| run_session(socket, state))
}

async fn run_session(mut socket: WebSocket, state: AppState) {
    let (mut session, mut updates) = ConversionSession::new(state.converter, state.debounce);
    tracing::debug!("Live conversion session opened");

    loop {
        tokio::select! {
            incoming = socket.recv() => {
                let text = match incoming {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    Some(Ok(_)) => continue,
                };
                if let Err(event) = apply_command(&mut session, text.as_str()) {
                    if send_event(&mut socket, &event).await.is_err() {
                        break;
                    }
                }
            }
            Some(update) = updates.recv() => {
                if send_event(&mut socket, &Event::from(update)).await.is_err() {
                    break;
                }
            }
        }
    }

    tracing::debug!("Live conversion session closed");
}

async fn send_event(socket: &mut WebSocket, event: &Event) -> Result<(), axum::Error> {
    let payload = match serde_json::to_string(event) {
        Ok(payload) => payload,
        Err(e) => {
            let err = AppError::Internal(format!("failed to encode live event: {e}"));
            tracing::error!(error = %err, "Dropping live event");
            return Ok(());
        }
    };
    socket.send(Message::Text(payload.into())).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        r#"{"type":"set_amount","amount":"12"}"#,
        Command::SetAmount { amount: "12".to_string() }
    )]
    #[case(r#"{"type":"set_from","code":"gbp"}"#, Command::SetFrom { code: "gbp".to_string() })]
    #[case(r#"{"type":"set_to","code":"JPY"}"#, Command::SetTo { code: "JPY".to_string() })]
    #[case(r#"{"type":"swap"}"#, Command::Swap)]
    #[case(r#"{"type":"refresh"}"#, Command::Refresh)]
    fn test_command_decoding(#[case] text: &str, #[case] expected: Command) {
        let command: Command = serde_json::from_str(text).unwrap();
        assert_eq!(command, expected);
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(serde_json::from_str::<Command>(r#"{"type":"launch"}"#).is_err());
    }

    #[test]
    fn test_cleared_event_encoding() {
        let event = Event::from(SessionUpdate::Cleared { generation: 4 });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json, serde_json::json!({"type": "cleared", "generation": 4}));
    }

    #[test]
    fn test_error_event_encoding() {
        let event = Event::from(AppError::Validation("bad".to_string()));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["error"], "VALIDATION_ERROR");
    }
}
