//! 워크시트 로딩 모듈
//!
//! calamine으로 통합 문서를 열고 첫 번째 시트를 A1 기준 문자열 그리드로 펼칩니다.

use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use chrono::NaiveTime;
use std::path::Path;

use crate::error::{Result, SheetJsonError};

/// 시트 하나를 펼친 문자열 그리드
pub type Grid = Vec<Vec<String>>;

/// 첫 번째 시트를 읽어 그리드로 반환
pub fn load_first_sheet(path: &Path) -> Result<Grid> {
    let mut workbook = open_workbook_auto(path).map_err(|e| SheetJsonError::Open {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(e)) => {
            return Err(SheetJsonError::Read {
                file: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
        None => {
            return Err(SheetJsonError::Read {
                file: path.to_path_buf(),
                reason: "워크시트가 없습니다".to_string(),
            })
        }
    };

    Ok(grid_from_range(&range))
}

/// calamine 범위를 A1 기준 그리드로 변환
///
/// 사용 범위 앞쪽의 빈 행/열은 빈 셀로 채우고, 각 행 끝의 빈 셀은 잘라냅니다.
pub fn grid_from_range(range: &Range<Data>) -> Grid {
    let Some((start_row, start_col)) = range.start() else {
        return Grid::new();
    };

    let mut grid: Grid = vec![Vec::new(); start_row as usize];
    grid.reserve(range.height());

    for row in range.rows() {
        let mut cells: Vec<String> = std::iter::repeat(String::new())
            .take(start_col as usize)
            .chain(row.iter().map(cell_text))
            .collect();
        trim_trailing_empty(&mut cells);
        grid.push(cells);
    }

    grid
}

/// 셀 값을 텍스트로 변환
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(dt) => datetime_text(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
        Data::Empty => String::new(),
    }
}

/// 날짜 셀을 표시 텍스트로 변환
///
/// 자정이면 `YYYY-MM-DD`, 아니면 `YYYY-MM-DDTHH:MM:SS`로 출력합니다.
/// 날짜로 해석할 수 없으면 일련번호를 그대로 씁니다.
pub fn datetime_text(dt: &ExcelDateTime) -> String {
    match dt.as_datetime() {
        Some(ndt) if ndt.time() == NaiveTime::MIN => ndt.date().format("%Y-%m-%d").to_string(),
        Some(ndt) => ndt.format("%Y-%m-%dT%H:%M:%S").to_string(),
        None => dt.as_f64().to_string(),
    }
}

fn trim_trailing_empty(cells: &mut Vec<String>) {
    while cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
}
