use resiliency_core::Report;
use serde::Serialize;
use tracing::debug;

use crate::error::ReportError;
use crate::flatten::flatten_report;
use crate::table::DataTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderingType {
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rendering {
    #[serde(rename = "type")]
    pub kind: RenderingType,
}

impl Rendering {
    pub fn new(kind: RenderingType) -> Self {
        Self { kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticData {
    pub table: DataTable,
    pub rendering_properties: Rendering,
}

impl DiagnosticData {
    /// Report-rendered table built from `report`; `None` when there is no report.
    pub fn resiliency_report(report: Option<&Report>) -> Result<Option<Self>, ReportError> {
        let Some(report) = report else {
            return Ok(None);
        };

        let mut table = DataTable::resiliency();
        for row in flatten_report(Some(report))? {
            table.push_row(row);
        }

        Ok(Some(Self {
            table,
            rendering_properties: Rendering::new(RenderingType::Report),
        }))
    }
}

/// Diagnostic response that renderers consume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub dataset: Vec<DiagnosticData>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the flattened report to the dataset.
    ///
    /// Nothing is attached when `report` is absent.
    pub fn add_resiliency_report(
        &mut self,
        report: Option<&Report>,
    ) -> Result<Option<&DiagnosticData>, ReportError> {
        let Some(data) = DiagnosticData::resiliency_report(report)? else {
            debug!("skipping resiliency report attachment, no report given");
            return Ok(None);
        };
        self.dataset.push(data);
        Ok(self.dataset.last())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resiliency_core::{Resource, Weight};

    #[test]
    fn absent_report_attaches_nothing() {
        let mut response = Response::new();
        assert!(response.add_resiliency_report(None).expect("attach").is_none());
        assert!(response.dataset.is_empty());
    }

    #[test]
    fn empty_report_attaches_table_without_rows() {
        let mut response = Response::new();
        let report = Report::new("Contoso", Vec::new());
        let data = response
            .add_resiliency_report(Some(&report))
            .expect("attach")
            .expect("diagnostic data");
        assert!(data.table.rows.is_empty());
        assert_eq!(data.rendering_properties.kind, RenderingType::Report);
        assert_eq!(response.dataset.len(), 1);
    }

    #[test]
    fn attaches_one_row_per_resource() {
        let mut response = Response::new();
        let report = Report::new(
            "Contoso",
            vec![
                Resource::new("web-1", [("Backups", Weight::Important)]),
                Resource::new("web-2", [("Backups", Weight::Mandatory)]),
            ],
        );
        response
            .add_resiliency_report(Some(&report))
            .expect("attach");

        let value = serde_json::to_value(&response).expect("response json");
        assert_eq!(value["dataset"][0]["renderingProperties"]["type"], "Report");
        assert_eq!(
            value["dataset"][0]["table"]["rows"]
                .as_array()
                .map(Vec::len),
            Some(2)
        );
    }
}
