//! Report rendering seam

use formgate_runtime::ValidationReport;
use tokio::sync::watch;

/// Receives every report the watch loop produces
///
/// Implementations paint error markers, tooltips and the submit control.
pub trait ReportSink {
    fn render(&mut self, report: &ValidationReport);
}

impl<F> ReportSink for F
where
    F: FnMut(&ValidationReport),
{
    fn render(&mut self, report: &ValidationReport) {
        self(report)
    }
}

/// Publishes the latest report to any number of subscribers
impl ReportSink for watch::Sender<ValidationReport> {
    fn render(&mut self, report: &ValidationReport) {
        self.send_replace(report.clone());
    }
}
