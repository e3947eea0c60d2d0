use std::fmt::Write as _;

use shared::protocol::{FilePayload, SerializedSample};

pub const DOWNLOAD_FILENAME: &str = "sample_download.csv";

/// Renders the stored sample as CSV, waiting time first, no index column.
/// A zero-row sample yields a header-only file; the "no sample yet" guard
/// lives in the control surface, not here.
pub fn build_download(serialized: &SerializedSample) -> FilePayload {
    let mut content = String::from("waiting_time,eruption_time\n");
    for record in serialized.records() {
        let _ = writeln!(content, "{},{}", record.waiting_time, record.eruption_time);
    }

    FilePayload {
        filename: DOWNLOAD_FILENAME.to_string(),
        content_type: "text/csv".to_string(),
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::Record;

    #[test]
    fn csv_has_header_plus_one_line_per_row() {
        let records: Vec<Record> = (0..34)
            .map(|i| Record {
                eruption_time: 2.0 + i as f64 * 0.1,
                waiting_time: 50.0 + i as f64,
            })
            .collect();
        let file = build_download(&SerializedSample::from_records(&records));

        let lines: Vec<&str> = file.content.lines().collect();
        assert_eq!(lines.len(), 35);
        assert_eq!(lines[0], "waiting_time,eruption_time");
        assert_eq!(file.filename, "sample_download.csv");
        assert_eq!(file.content_type, "text/csv");
    }

    #[test]
    fn values_are_waiting_first_without_an_index() {
        let file = build_download(&SerializedSample::from_records(&[Record {
            eruption_time: 3.6,
            waiting_time: 79.0,
        }]));
        assert_eq!(file.content, "waiting_time,eruption_time\n79,3.6\n");
    }

    #[test]
    fn empty_sample_yields_header_only_csv() {
        let file = build_download(&SerializedSample::from_records(&[]));
        assert_eq!(file.content, "waiting_time,eruption_time\n");
    }
}
