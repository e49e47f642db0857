use resiliency_core::Report;
use tracing::debug;

use crate::error::ReportError;
use crate::table::ReportRow;

/// Flattens `report` into one row per resource, in resource order.
///
/// An absent report yields no rows; that is not an error.
pub fn flatten_report(report: Option<&Report>) -> Result<Vec<ReportRow>, ReportError> {
    let Some(report) = report else {
        debug!("no resiliency report to flatten");
        return Ok(Vec::new());
    };

    let report_json = serde_json::to_string_pretty(report)?;
    let resources_json = serde_json::to_string_pretty(report.resources())?;

    let mut rows = Vec::with_capacity(report.resources().len());
    for resource in report.resources() {
        rows.push(ReportRow {
            report: report_json.clone(),
            resources: resources_json.clone(),
            features: serde_json::to_string_pretty(resource.features())?,
        });
    }

    debug!(
        customer = report.customer_name(),
        rows = rows.len(),
        "flattened resiliency report"
    );
    Ok(rows)
}
