//! 행 → 레코드 변환 모듈
//!
//! 시트 그리드에서 헤더 행(0행), 마커 행(3행), 데이터 행(4행 이후)을 읽어
//! 출력 문서를 만듭니다. 마커 행 값이 정확히 `"3"`인 열만 출력에 포함됩니다.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, SheetJsonError};

/// 헤더 행 인덱스
pub const HEADER_ROW: usize = 0;
/// 마커 행 인덱스
pub const MARKER_ROW: usize = 3;
/// 첫 데이터 행 인덱스
pub const FIRST_DATA_ROW: usize = MARKER_ROW + 1;
/// 변환에 필요한 최소 행 수
pub const MIN_ROWS: usize = FIRST_DATA_ROW;
/// 열 포함 표시 값
pub const INCLUDE_MARKER: &str = "3";

/// 한 데이터 행의 필드 (소문자 헤더 → 값)
pub type Record = BTreeMap<String, String>;

/// 파일 하나의 출력 문서 (레코드 키 → 레코드)
pub type OutputDocument = BTreeMap<String, Record>;

/// 마커 값이 열 포함을 뜻하는지 확인
pub fn is_included(marker: &str) -> bool {
    marker == INCLUDE_MARKER
}

/// 셀 텍스트를 출력 값으로 변환
///
/// 소수부가 있는 숫자는 소수점 이하 4자리로 맞추고, 정수나 숫자가 아닌 값은
/// 원래 텍스트를 그대로 둡니다.
///
/// # Examples
/// ```
/// use xlsx2json::record::coerce_value;
///
/// assert_eq!(coerce_value("3.14159"), "3.1416");
/// assert_eq!(coerce_value("42"), "42");
/// assert_eq!(coerce_value("Alice"), "Alice");
/// ```
pub fn coerce_value(cell: &str) -> String {
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() != 0.0 => format!("{:.4}", value),
        _ => cell.to_string(),
    }
}

/// 키가 없는 레코드에 쓰는 위치 기반 키 (1부터 세는 시트 행 번호)
pub fn placeholder_key(row_index: usize) -> String {
    format!("-{}", row_index + 1)
}

/// 데이터 행 하나를 레코드로 변환
///
/// 포함된 열이 하나도 없으면 `None`을 반환합니다.
pub fn build_record(
    headers: &[String],
    markers: &[String],
    row: &[String],
    row_index: usize,
) -> Option<(String, Record)> {
    let mut padded = row.to_vec();
    if padded.len() < markers.len() {
        padded.resize(markers.len(), String::new());
    }

    let mut key = String::new();
    let mut record = Record::new();

    for (i, marker) in markers.iter().enumerate() {
        if i >= padded.len() || i >= headers.len() {
            continue;
        }
        if !is_included(marker) {
            continue;
        }

        let cell = &padded[i];
        if i == 0 {
            key = cell.clone();
        }
        record.insert(headers[i].to_lowercase(), coerce_value(cell));
    }

    if key.is_empty() && !record.is_empty() {
        key = placeholder_key(row_index);
    }

    if key.is_empty() && record.is_empty() {
        None
    } else {
        Some((key, record))
    }
}

/// 시트 그리드 전체를 출력 문서로 변환
///
/// 같은 키가 여러 번 나오면 뒤쪽 행이 앞쪽 행을 덮어씁니다.
pub fn build_document(file: &Path, rows: &[Vec<String>]) -> Result<OutputDocument> {
    if rows.len() < MIN_ROWS {
        return Err(SheetJsonError::Structure {
            file: file.to_path_buf(),
            required: MIN_ROWS,
            found: rows.len(),
        });
    }

    let headers = &rows[HEADER_ROW];
    let markers = &rows[MARKER_ROW];

    let mut document = OutputDocument::new();
    for (row_index, row) in rows.iter().enumerate().skip(FIRST_DATA_ROW) {
        if let Some((key, record)) = build_record(headers, markers, row, row_index) {
            document.insert(key, record);
        }
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn doc(rows: &[&[&str]]) -> OutputDocument {
        build_document(Path::new("test.xlsx"), &grid(rows)).unwrap()
    }

    #[test]
    fn test_coerce_value() {
        assert_eq!(coerce_value("42"), "42");
        assert_eq!(coerce_value("42.0"), "42.0");
        assert_eq!(coerce_value("-7"), "-7");
        assert_eq!(coerce_value("3.14159"), "3.1416");
        assert_eq!(coerce_value("10.5"), "10.5000");
        assert_eq!(coerce_value("1e-3"), "0.0010");
        assert_eq!(coerce_value("abc"), "abc");
        assert_eq!(coerce_value(""), "");
        assert_eq!(coerce_value(" 1.5"), " 1.5");
        assert_eq!(coerce_value("inf"), "inf");
        assert_eq!(coerce_value("NaN"), "NaN");
    }

    #[test]
    fn test_is_included_literal_only() {
        assert!(is_included("3"));
        assert!(!is_included("03"));
        assert!(!is_included("30"));
        assert!(!is_included(" 3"));
        assert!(!is_included(""));
    }

    #[test]
    fn test_basic_document() {
        let document = doc(&[
            &["ID", "Name", "Score"],
            &[],
            &[],
            &["3", "3", "3"],
            &["1", "Alice", "10.5"],
        ]);

        assert_eq!(document.len(), 1);
        let record = &document["1"];
        assert_eq!(record["id"], "1");
        assert_eq!(record["name"], "Alice");
        assert_eq!(record["score"], "10.5000");
    }

    #[test]
    fn test_structure_error_under_four_rows() {
        let rows = grid(&[&["ID"], &[], &[]]);
        let err = build_document(Path::new("short.xlsx"), &rows).unwrap_err();

        match err {
            SheetJsonError::Structure {
                required, found, ..
            } => {
                assert_eq!(required, 4);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_exactly_four_rows_is_empty_document() {
        let document = doc(&[&["ID"], &[], &[], &["3"]]);
        assert!(document.is_empty());
    }

    #[test]
    fn test_excluded_columns_and_markers() {
        let document = doc(&[
            &["ID", "Secret", "Name", "Note"],
            &[],
            &[],
            &["3", "03", "3", "30"],
            &["7", "hidden", "Bob", "x"],
        ]);

        let record = &document["7"];
        assert_eq!(record.len(), 2);
        assert!(record.contains_key("id"));
        assert!(record.contains_key("name"));
    }

    #[test]
    fn test_row_without_included_columns_is_skipped() {
        let document = doc(&[
            &["ID", "Name"],
            &[],
            &[],
            &["", "1"],
            &["1", "Alice"],
        ]);
        assert!(document.is_empty());
    }

    #[test]
    fn test_short_row_is_padded() {
        let document = doc(&[
            &["ID", "Name", "Score"],
            &[],
            &[],
            &["3", "3", "3"],
            &["5"],
        ]);

        let record = &document["5"];
        assert_eq!(record["name"], "");
        assert_eq!(record["score"], "");
    }

    #[test]
    fn test_placeholder_key_when_first_column_empty() {
        let document = doc(&[
            &["ID", "Name"],
            &[],
            &[],
            &["3", "3"],
            &["", "Alice"],
            &[],
        ]);

        assert_eq!(document.len(), 2);
        assert_eq!(document["-5"]["name"], "Alice");
        assert_eq!(document["-6"]["id"], "");
    }

    #[test]
    fn test_placeholder_key_when_first_column_excluded() {
        let document = doc(&[
            &["ID", "Name"],
            &[],
            &[],
            &["", "3"],
            &["9", "Carol"],
        ]);

        assert_eq!(document.len(), 1);
        let record = &document["-5"];
        assert_eq!(record.len(), 1);
        assert_eq!(record["name"], "Carol");
    }

    #[test]
    fn test_columns_beyond_marker_or_header_ignored() {
        let document = doc(&[
            &["ID", "Name"],
            &[],
            &[],
            &["3", "3", "3"],
            &["1", "Alice", "extra", "more"],
        ]);

        let record = &document["1"];
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_headers_are_lowercased_and_key_case_preserved() {
        let document = doc(&[
            &["Code", "DisplayName"],
            &[],
            &[],
            &["3", "3"],
            &["AbC", "Sword"],
        ]);

        let record = &document["AbC"];
        assert_eq!(record["code"], "AbC");
        assert_eq!(record["displayname"], "Sword");
    }

    #[test]
    fn test_duplicate_keys_later_row_wins() {
        let document = doc(&[
            &["ID", "Name"],
            &[],
            &[],
            &["3", "3"],
            &["1", "First"],
            &["1", "Second"],
        ]);

        assert_eq!(document.len(), 1);
        assert_eq!(document["1"]["name"], "Second");
    }
}
