//! 에러 타입 정의 모듈
//!
//! xlsx2json에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// xlsx2json에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum SheetJsonError {
    /// 루트 폴더를 읽을 수 없거나 탐색 중 I/O 오류 발생
    #[error("폴더 탐색 실패 ({path}): {reason}")]
    Discovery { path: PathBuf, reason: String },

    /// 처리할 파일 없음 (정보성, 실패가 아님)
    #[error("처리할 엑셀 파일이 없습니다 (.xlsx 또는 .xls)")]
    NoFilesFound,

    /// 엑셀 파일 열기 실패
    #[error("엑셀 파일을 열 수 없습니다 ({file}): {reason}")]
    Open { file: PathBuf, reason: String },

    /// 워크시트 읽기 실패
    #[error("워크시트를 읽을 수 없습니다 ({file}): {reason}")]
    Read { file: PathBuf, reason: String },

    /// 헤더/마커 행이 부족함
    #[error("행 수 부족 ({file}): 최소 {required}행이 필요하지만 {found}행만 있습니다")]
    Structure {
        file: PathBuf,
        required: usize,
        found: usize,
    },

    /// JSON 직렬화 실패
    #[error("JSON 직렬화 실패 ({file}): {reason}")]
    Serialize { file: PathBuf, reason: String },

    /// 출력 파일 쓰기 실패
    #[error("파일 쓰기 실패 ({file}): {reason}")]
    Write { file: PathBuf, reason: String },

    /// 유효하지 않은 패턴
    #[error("유효하지 않은 패턴: {pattern}")]
    InvalidPattern { pattern: String },

    /// 스레드 풀 초기화 실패
    #[error("스레드 풀 초기화 실패: {reason}")]
    ThreadPool { reason: String },
}

/// xlsx2json 결과 타입 별칭
pub type Result<T> = std::result::Result<T, SheetJsonError>;
