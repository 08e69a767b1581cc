use std::sync::Arc;

use anyhow::{Context, Result};
use sentry::protocol::SpanStatus;
use sentry::types::Dsn;
use sentry::{ClientInitGuard, ClientOptions, Transaction, TransactionContext};
use tracing::{debug, info, warn};

use crate::config::SentryConfig;

/// Source of per-request telemetry spans.
pub trait TelemetrySink: Send + Sync {
    fn start_span(&self, op: &str) -> Box<dyn TelemetrySpan>;
}

/// One request's span. `finish` is called exactly once, through [`SpanGuard`].
pub trait TelemetrySpan: Send {
    fn finish(self: Box<Self>, status: u16);
}

/// Owns an open span and closes it exactly once.
///
/// A guard dropped without [`SpanGuard::finish`] (the request future was
/// cancelled, or a panic unwound through it) closes the span with 500.
pub struct SpanGuard {
    span: Option<Box<dyn TelemetrySpan>>,
}

impl SpanGuard {
    pub fn start(sink: &dyn TelemetrySink, op: &str) -> Self {
        Self {
            span: Some(sink.start_span(op)),
        }
    }

    pub fn finish(mut self, status: u16) {
        if let Some(span) = self.span.take() {
            span.finish(status);
        }
    }
}

impl Drop for SpanGuard {
    fn drop(&mut self) {
        if let Some(span) = self.span.take() {
            span.finish(500);
        }
    }
}

/// Used when no telemetry destination is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

struct NoopSpan;

impl TelemetrySink for NoopTelemetry {
    fn start_span(&self, _op: &str) -> Box<dyn TelemetrySpan> {
        Box::new(NoopSpan)
    }
}

impl TelemetrySpan for NoopSpan {
    fn finish(self: Box<Self>, _status: u16) {}
}

/// Start the Sentry client for the configured DSN.
///
/// The returned guard flushes pending events when dropped and must be held
/// for the lifetime of the process. `None` when no DSN is configured.
pub fn init(config: &SentryConfig) -> Result<Option<ClientInitGuard>> {
    let Some(raw) = config.dsn.as_deref() else {
        return Ok(None);
    };
    let dsn: Dsn = raw.parse().context("sentry.dsn is not a valid DSN")?;
    let host = dsn.host().to_string();

    let guard = sentry::init(ClientOptions {
        dsn: Some(dsn),
        release: sentry::release_name!(),
        environment: config.environment.clone().map(Into::into),
        traces_sample_rate: config.traces_sample_rate,
        ..Default::default()
    });
    if !guard.is_enabled() {
        warn!("Sentry client failed to start; telemetry will be dropped");
    }
    info!("Telemetry enabled, reporting to {}", host);
    Ok(Some(guard))
}

/// Reports each request as a Sentry transaction on the current hub.
#[derive(Debug, Default, Clone, Copy)]
pub struct SentryTelemetry;

struct SentrySpan {
    transaction: Transaction,
}

impl TelemetrySink for SentryTelemetry {
    fn start_span(&self, op: &str) -> Box<dyn TelemetrySpan> {
        let ctx = TransactionContext::new(op, "http.server");
        Box::new(SentrySpan {
            transaction: sentry::start_transaction(ctx),
        })
    }
}

impl TelemetrySpan for SentrySpan {
    fn finish(self: Box<Self>, status: u16) {
        debug!("Finishing telemetry transaction with status {}", status);
        self.transaction.set_tag("http.status_code", status);
        self.transaction.set_status(span_status(status));
        self.transaction.finish();
    }
}

fn span_status(status: u16) -> SpanStatus {
    match status {
        200..=299 => SpanStatus::Ok,
        400 => SpanStatus::InvalidArgument,
        401 => SpanStatus::Unauthenticated,
        403 => SpanStatus::PermissionDenied,
        404 => SpanStatus::NotFound,
        429 => SpanStatus::ResourceExhausted,
        500 => SpanStatus::InternalError,
        _ => SpanStatus::UnknownError,
    }
}

pub fn from_config(config: &SentryConfig) -> Arc<dyn TelemetrySink> {
    match config.dsn {
        Some(_) => Arc::new(SentryTelemetry),
        None => Arc::new(NoopTelemetry),
    }
}
