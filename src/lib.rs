//! xlsx2json - EXCEL FOLDER TO JSON CONVERTER
//!
//! 폴더 아래의 엑셀 파일들을 파일별 JSON 문서로 변환하는 CLI 도구입니다.
//!
//! # 변환 규칙
//!
//! - 첫 번째 시트만 읽습니다.
//! - 1행은 헤더이며 소문자로 바뀌어 필드 이름이 됩니다.
//! - 4행은 마커 행이며 값이 정확히 `"3"`인 열만 출력됩니다.
//! - 5행부터는 데이터이며 첫 번째 열 값이 레코드 키가 됩니다.
//! - 소수부가 있는 숫자는 소수점 이하 4자리로 맞춥니다.
//! - `D/name.xlsx`의 결과는 `D/json/name.json`에 저장됩니다.
//!
//! # 예제
//!
//! ```bash
//! # 현재 폴더 전체 변환
//! xlsx2json
//!
//! # 특정 폴더, 패턴 필터
//! xlsx2json -i ./tables --pattern "item_*"
//! ```

pub mod batch;
pub mod cli;
pub mod converter;
pub mod discover;
pub mod error;
pub mod record;
pub mod sheet;
pub mod stats;

// Re-exports for convenient access
pub use batch::{run_batch, BatchReport};
pub use cli::Args;
pub use converter::{convert_file, ConvertOptions, ConvertResult};
pub use discover::Discoverer;
pub use error::{Result, SheetJsonError};
pub use record::{build_document, OutputDocument, Record};
pub use stats::{format_bytes, Statistics};
