use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{DisplayColor, Record, COLUMN_LABELS},
    error::ApiError,
};

/// Row-oriented encoding of a sample, safe to carry across the event channel
/// without recomputation. Decoding yields the same row count and values as
/// the sample that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedSample {
    pub columns: Vec<String>,
    pub rows: Vec<[f64; 2]>,
}

impl SerializedSample {
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            columns: COLUMN_LABELS
                .iter()
                .map(|label| label.id.to_string())
                .collect(),
            rows: records
                .iter()
                .map(|record| [record.eruption_time, record.waiting_time])
                .collect(),
        }
    }

    pub fn records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| Record {
                eruption_time: row[0],
                waiting_time: row[1],
            })
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

/// Scatter specification. Axis ranges are fixed to the known dataset domain
/// rather than recomputed from the sample, so a differently scaled dataset
/// would clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSpec {
    pub title: String,
    pub subtitle: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub template: String,
    pub marker_color: DisplayColor,
    pub points: Vec<PlotPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellStyle {
    pub text_align: String,
    pub padding_left: String,
    pub padding_right: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Record>,
    pub page_size: usize,
    pub cell_style: CellStyle,
}

/// A downloadable file rendered from the stored sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePayload {
    pub filename: String,
    pub content_type: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientRequest {
    SetSampleLevel { level: u8 },
    SetColor { color: DisplayColor },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerEvent {
    SessionReady { session_id: Uuid },
    SampleLabelUpdated { text: String },
    PlotUpdated { plot: PlotSpec },
    TableUpdated { table: TableSpec },
    DownloadReady { file: FilePayload },
    Error(ApiError),
}
