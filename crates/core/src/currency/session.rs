//! Per-client state for the live converter.

use std::sync::Arc;
use std::time::Duration;

use tallykit_shared::CurrencyCode;
use tokio::sync::mpsc;

use super::conversion::{ConversionError, ConversionRequest, ConversionResult, parse_amount};
use super::converter::CurrencyConverter;
use super::debounce::{Debouncer, Ticket};

/// Amount shown when a session starts.
pub const DEFAULT_AMOUNT: &str = "1";

/// Something the client should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// A conversion finished for the latest input.
    Converted {
        /// Generation of the input that produced this result.
        generation: u64,
        /// The conversion.
        result: ConversionResult,
    },
    /// The latest input could not be converted.
    Invalid {
        /// Generation of the rejected input.
        generation: u64,
        /// Why it was rejected.
        error: ConversionError,
    },
    /// Any previous result is no longer valid.
    Cleared {
        /// Generation at which the result was cleared.
        generation: u64,
    },
}

impl SessionUpdate {
    /// Generation this update belongs to.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        match self {
            Self::Converted { generation, .. }
            | Self::Invalid { generation, .. }
            | Self::Cleared { generation } => *generation,
        }
    }
}

/// Live conversion state: amount text plus the currency pair.
///
/// Every edit reschedules a conversion through the debouncer, so a burst of
/// keystrokes costs one rate lookup and only the last input is published.
#[derive(Debug)]
pub struct ConversionSession {
    converter: Arc<CurrencyConverter>,
    debouncer: Debouncer,
    updates: mpsc::UnboundedSender<SessionUpdate>,
    amount: String,
    from: CurrencyCode,
    to: CurrencyCode,
}

impl ConversionSession {
    /// Creates a session with the default input (1 USD to EUR).
    ///
    /// Nothing is converted until the first edit or [`Self::refresh`].
    #[must_use]
    pub fn new(
        converter: Arc<CurrencyConverter>,
        quiet: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SessionUpdate>) {
        let (updates, rx) = mpsc::unbounded_channel();
        let session = Self {
            converter,
            debouncer: Debouncer::new(quiet),
            updates,
            amount: DEFAULT_AMOUNT.to_string(),
            from: CurrencyCode::usd(),
            to: CurrencyCode::eur(),
        };
        (session, rx)
    }

    /// Current amount text.
    #[must_use]
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Current source currency.
    #[must_use]
    pub const fn from_currency(&self) -> &CurrencyCode {
        &self.from
    }

    /// Current target currency.
    #[must_use]
    pub const fn to_currency(&self) -> &CurrencyCode {
        &self.to
    }

    /// Latest generation scheduled.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.debouncer.generation()
    }

    /// Replaces the amount text.
    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
        self.schedule();
    }

    /// Replaces the source currency.
    pub fn set_from(&mut self, code: CurrencyCode) {
        self.from = code;
        self.schedule();
    }

    /// Replaces the target currency.
    pub fn set_to(&mut self, code: CurrencyCode) {
        self.to = code;
        self.schedule();
    }

    /// Exchanges source and target. The old result is cleared at once.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
        let ticket = self.debouncer.invalidate();
        self.publish(SessionUpdate::Cleared {
            generation: ticket.generation(),
        });
        self.schedule();
    }

    /// Re-runs the conversion for the current input.
    pub fn refresh(&mut self) {
        self.schedule();
    }

    fn publish(&self, update: SessionUpdate) {
        send_update(&self.updates, update);
    }

    fn schedule(&self) {
        let converter = Arc::clone(&self.converter);
        let updates = self.updates.clone();
        let amount = self.amount.clone();
        let from = self.from.clone();
        let to = self.to.clone();

        self.debouncer.schedule(move |ticket| async move {
            let update = run_conversion(&converter, &amount, from, to, &ticket).await;
            // A newer edit may have arrived while the rate was loading.
            if ticket.is_current() {
                send_update(&updates, update);
            } else {
                tracing::debug!(generation = ticket.generation(), "Dropping stale conversion");
            }
        });
    }
}

/// Sends an update, logging when the receiving side has gone away.
fn send_update(updates: &mpsc::UnboundedSender<SessionUpdate>, update: SessionUpdate) {
    let generation = update.generation();
    if updates.send(update).is_err() {
        tracing::debug!(generation, "Session receiver dropped, update discarded");
    }
}

async fn run_conversion(
    converter: &CurrencyConverter,
    amount: &str,
    from: CurrencyCode,
    to: CurrencyCode,
    ticket: &Ticket,
) -> SessionUpdate {
    let generation = ticket.generation();
    let amount = match parse_amount(amount) {
        Ok(amount) => amount,
        Err(error) => return SessionUpdate::Invalid { generation, error },
    };

    match converter
        .convert(&ConversionRequest::new(amount, from, to))
        .await
    {
        Ok(result) => SessionUpdate::Converted { generation, result },
        Err(error) => SessionUpdate::Invalid { generation, error },
    }
}
