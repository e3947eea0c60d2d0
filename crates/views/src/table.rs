use shared::{
    domain::COLUMN_LABELS,
    protocol::{CellStyle, SerializedSample, TableColumn, TableSpec},
};

/// Rows shown per table page.
pub const PAGE_SIZE: usize = 8;

fn cell_style() -> CellStyle {
    CellStyle {
        text_align: "center".to_string(),
        padding_left: "10px".to_string(),
        padding_right: "10px".to_string(),
    }
}

/// Builds the paginated table for the current sample, one row per record,
/// labeled with the same lookup as the plot. Returns `None` for an empty
/// sample so the previous table stays as-is.
pub fn build_table(serialized: &SerializedSample) -> Option<TableSpec> {
    if serialized.is_empty() {
        return None;
    }

    Some(TableSpec {
        columns: COLUMN_LABELS
            .iter()
            .map(|label| TableColumn {
                id: label.id.to_string(),
                name: label.name.to_string(),
            })
            .collect(),
        rows: serialized.records(),
        page_size: PAGE_SIZE,
        cell_style: cell_style(),
    })
}
