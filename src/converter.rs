//! 엑셀 파일 변환 모듈
//!
//! 개별 엑셀 파일의 읽기, 레코드 변환, JSON 저장을 담당합니다.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SheetJsonError};
use crate::record::{build_document, OutputDocument};
use crate::sheet::load_first_sheet;

/// 기본 출력 폴더 이름
pub const DEFAULT_OUTPUT_DIR: &str = "json";

/// 파일 변환 결과
#[derive(Debug)]
pub struct ConvertResult {
    /// 원본 엑셀 파일 경로
    pub path: PathBuf,
    /// 생성된 JSON 파일 경로 (성공 시)
    pub output: Option<PathBuf>,
    /// 에러 메시지 (실패 시)
    pub error: Option<String>,
    /// 원본 파일 크기
    pub file_size: u64,
    /// 기록한 바이트 수
    pub bytes_written: u64,
    /// 출력된 레코드 수
    pub record_count: usize,
}

impl ConvertResult {
    /// 성공 결과 생성
    pub fn success(
        path: PathBuf,
        output: PathBuf,
        file_size: u64,
        bytes_written: u64,
        record_count: usize,
    ) -> Self {
        Self {
            path,
            output: Some(output),
            error: None,
            file_size,
            bytes_written,
            record_count,
        }
    }

    /// 실패 결과 생성
    pub fn failure(path: PathBuf, error: String, file_size: u64) -> Self {
        Self {
            path,
            output: None,
            error: Some(error),
            file_size,
            bytes_written: 0,
            record_count: 0,
        }
    }

    /// 성공 여부
    pub fn is_success(&self) -> bool {
        self.output.is_some()
    }
}

/// 변환 옵션
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// 원본 파일 옆에 만들 출력 폴더 이름
    pub output_dir_name: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output_dir_name: DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}

impl ConvertOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 출력 폴더 이름 설정
    pub fn with_output_dir_name(mut self, name: impl Into<String>) -> Self {
        self.output_dir_name = name.into();
        self
    }
}

/// 원본 경로에 대응하는 JSON 출력 경로 계산
///
/// # Examples
/// ```
/// use std::path::Path;
/// use xlsx2json::converter::{output_path_for, ConvertOptions};
///
/// let out = output_path_for(Path::new("data/item.xlsx"), &ConvertOptions::new());
/// assert_eq!(out, Path::new("data/json/item.json"));
/// ```
pub fn output_path_for(path: &Path, options: &ConvertOptions) -> PathBuf {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let stem = path.file_stem().unwrap_or_default();

    let mut file_name = stem.to_os_string();
    file_name.push(".json");

    dir.join(&options.output_dir_name).join(file_name)
}

/// 단일 엑셀 파일 변환
///
/// 실패해도 패닉하지 않고 에러 메시지를 담은 `ConvertResult`를 반환합니다.
pub fn convert_file(path: PathBuf, options: &ConvertOptions) -> ConvertResult {
    let file_size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

    match convert_file_internal(&path, options) {
        Ok((output, bytes_written, record_count)) => {
            ConvertResult::success(path, output, file_size, bytes_written, record_count)
        }
        Err(e) => ConvertResult::failure(path, e.to_string(), file_size),
    }
}

/// 내부 변환 로직
fn convert_file_internal(path: &Path, options: &ConvertOptions) -> Result<(PathBuf, u64, usize)> {
    let grid = load_first_sheet(path)?;
    let document = build_document(path, &grid)?;
    let json = render_document(path, &document)?;

    let output = output_path_for(path, options);
    write_output(&output, json.as_bytes())?;

    Ok((output, json.len() as u64, document.len()))
}

/// 출력 문서를 2칸 들여쓰기 JSON으로 직렬화
pub fn render_document(path: &Path, document: &OutputDocument) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(|e| SheetJsonError::Serialize {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// 출력 폴더를 만들고 파일을 덮어쓰기
fn write_output(output: &Path, bytes: &[u8]) -> Result<()> {
    let write_error = |e: std::io::Error| SheetJsonError::Write {
        file: output.to_path_buf(),
        reason: e.to_string(),
    };

    if let Some(dir) = output.parent() {
        fs::create_dir_all(dir).map_err(write_error)?;
    }
    fs::write(output, bytes).map_err(write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    #[test]
    fn test_output_path_for() {
        let options = ConvertOptions::new();
        assert_eq!(
            output_path_for(Path::new("/a/b/monster.xls"), &options),
            PathBuf::from("/a/b/json/monster.json")
        );
        assert_eq!(
            output_path_for(Path::new("item.v2.xlsx"), &options),
            PathBuf::from("json/item.v2.json")
        );
    }

    #[test]
    fn test_output_path_custom_dir() {
        let options = ConvertOptions::new().with_output_dir_name("out");
        assert_eq!(
            output_path_for(Path::new("/data/item.xlsx"), &options),
            PathBuf::from("/data/out/item.json")
        );
    }

    #[test]
    fn test_render_document_indent() {
        let mut record = Record::new();
        record.insert("id".to_string(), "1".to_string());
        let mut document = OutputDocument::new();
        document.insert("1".to_string(), record);

        let json = render_document(Path::new("x.xlsx"), &document).unwrap();
        assert_eq!(json, "{\n  \"1\": {\n    \"id\": \"1\"\n  }\n}");
    }

    #[test]
    fn test_render_empty_document() {
        let json = render_document(Path::new("x.xlsx"), &OutputDocument::new()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_convert_missing_file_fails() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.xlsx");

        let result = convert_file(path, &ConvertOptions::new());

        assert!(!result.is_success());
        assert!(result.error.is_some());
        assert!(!temp_dir.path().join("json").exists());
    }
}
