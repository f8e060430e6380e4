//! Per-form validation session

use crate::config::EvaluationMode;
use crate::error::Result;
use formgate_runtime::{
    CompiledRuleSet, EvaluationState, FieldIndex, FieldValueReader, ValidationReport,
};
use std::sync::Arc;

/// Tracks the current error state of one form
///
/// Call [`ValidationSession::initial`] once when the form opens, then
/// [`ValidationSession::on_change`] whenever participating fields change.
#[derive(Debug, Clone)]
pub struct ValidationSession {
    mode: EvaluationMode,
    state: EvaluationState,
    last: ValidationReport,
}

impl ValidationSession {
    pub(crate) fn new(
        mode: EvaluationMode,
        rules: Arc<CompiledRuleSet>,
        index: Arc<FieldIndex>,
    ) -> Result<Self> {
        Ok(Self {
            mode,
            state: EvaluationState::new(rules, index)?,
            last: ValidationReport::default(),
        })
    }

    /// Evaluate every rule against the form's current values
    pub fn initial<R>(&mut self, reader: &R) -> &ValidationReport
    where
        R: FieldValueReader + ?Sized,
    {
        self.last = self.state.refresh_all(reader);
        &self.last
    }

    /// Re-evaluate after `changed` fields took new values
    pub fn on_change<I, S, R>(&mut self, changed: I, reader: &R) -> &ValidationReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        R: FieldValueReader + ?Sized,
    {
        self.last = match self.mode {
            EvaluationMode::FullSweep => self.state.refresh_all(reader),
            EvaluationMode::Selective => self.state.refresh_fields(changed, reader),
        };
        &self.last
    }

    /// Report from the most recent pass
    pub fn report(&self) -> &ValidationReport {
        &self.last
    }

    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }
}
