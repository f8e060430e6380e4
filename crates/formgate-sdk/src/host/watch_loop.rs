//! Debounced re-evaluation loop

use super::sink::ReportSink;
use super::watcher::FieldWatcher;
use crate::error::Result;
use crate::form_validator::FormValidator;
use formgate_runtime::{FieldValueReader, ValidationReport};
use std::sync::Arc;
use tokio::sync::{mpsc, watch as signal};
use tokio::time::{Instant, MissedTickBehavior};

/// Drives one form: polls for changes, waits for them to settle, re-evaluates
pub struct WatchLoop<R, S> {
    validator: Arc<FormValidator>,
    reader: R,
    sink: S,
    events: Option<mpsc::Receiver<String>>,
}

impl<R, S> WatchLoop<R, S>
where
    R: FieldValueReader,
    S: ReportSink,
{
    pub fn new(validator: Arc<FormValidator>, reader: R, sink: S) -> Self {
        Self {
            validator,
            reader,
            sink,
            events: None,
        }
    }

    /// Also accept change notifications pushed by the host
    ///
    /// Notifications for fields no rule reads are ignored.
    pub fn with_events(mut self, events: mpsc::Receiver<String>) -> Self {
        self.events = Some(events);
        self
    }

    /// Run until `shutdown` turns true or its sender is dropped
    pub async fn run(self, mut shutdown: signal::Receiver<bool>) -> Result<()> {
        let Self {
            validator,
            reader,
            mut sink,
            mut events,
        } = self;

        if validator.rule_count() == 0 {
            tracing::info!("No rules loaded, form is always valid");
            sink.render(&ValidationReport::default());
            return Ok(());
        }

        let watch_config = validator.config().watch.clone();
        watch_config.validate()?;

        let mut session = validator.session()?;
        let mut watcher = FieldWatcher::for_validator(&validator);
        watcher.prime(&reader);
        sink.render(session.initial(&reader));

        tracing::info!(
            fields = watcher.fields().len(),
            poll_ms = watch_config.poll_interval_ms,
            debounce_ms = watch_config.debounce_ms,
            "Watching form fields"
        );

        let mut ticker = tokio::time::interval(watch_config.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        let mut pending: Vec<String> = Vec::new();
        let mut deadline: Option<Instant> = None;

        while !*shutdown.borrow() {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let changed = watcher.poll(&reader);
                    if !changed.is_empty() {
                        merge(&mut pending, changed);
                        deadline = Some(Instant::now() + watch_config.debounce());
                    }
                }
                event = next_event(&mut events) => match event {
                    Some(field) if validator.is_participating(&field) => {
                        watcher.observe(&field, &reader);
                        merge(&mut pending, [field]);
                        deadline = Some(Instant::now() + watch_config.debounce());
                    }
                    Some(field) => {
                        tracing::trace!(field = %field, "Ignoring change to non-participating field");
                    }
                    None => events = None,
                },
                _ = settle(deadline) => {
                    deadline = None;
                    let changed = std::mem::take(&mut pending);
                    tracing::debug!(fields = ?changed, "Re-evaluating after changes settled");
                    sink.render(session.on_change(&changed, &reader));
                }
            }
        }

        tracing::info!("Form watch stopped");
        Ok(())
    }
}

/// Build and run a [`WatchLoop`] without host events
pub async fn watch<R, S>(
    validator: Arc<FormValidator>,
    reader: R,
    sink: S,
    shutdown: signal::Receiver<bool>,
) -> Result<()>
where
    R: FieldValueReader,
    S: ReportSink,
{
    WatchLoop::new(validator, reader, sink).run(shutdown).await
}

fn merge<I>(pending: &mut Vec<String>, changed: I)
where
    I: IntoIterator<Item = String>,
{
    for field in changed {
        if !pending.contains(&field) {
            pending.push(field);
        }
    }
}

async fn next_event(events: &mut Option<mpsc::Receiver<String>>) -> Option<String> {
    match events {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

async fn settle(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
