use serde::Serialize;

pub const REPORT_COLUMN: &str = "ResiliencyReport";
pub const RESOURCE_LIST_COLUMN: &str = "ResiliencyResourceList";
pub const FEATURES_LIST_COLUMN: &str = "ResiliencyFeaturesList";

pub const REPORT_COLUMNS: [&str; 3] = [REPORT_COLUMN, RESOURCE_LIST_COLUMN, FEATURES_LIST_COLUMN];

/// One flattened resource: the report and resource list blobs are shared by
/// every row of a flattening call, the features blob belongs to this row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub report: String,
    pub resources: String,
    pub features: String,
}

impl ReportRow {
    pub fn into_cells(self) -> Vec<String> {
        vec![self.report, self.resources, self.features]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataColumn {
    pub column_name: String,
    pub data_type: &'static str,
}

impl DataColumn {
    pub fn text(name: &str) -> Self {
        Self {
            column_name: name.to_string(),
            data_type: "String",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTable {
    pub table_name: String,
    pub columns: Vec<DataColumn>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Empty table with the three resiliency text columns.
    pub fn resiliency() -> Self {
        Self {
            table_name: String::new(),
            columns: REPORT_COLUMNS.iter().map(|name| DataColumn::text(name)).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: ReportRow) {
        self.rows.push(row.into_cells());
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.column_name == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }
}
