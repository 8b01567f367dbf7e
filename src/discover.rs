//! 엑셀 파일 탐색 모듈
//!
//! 루트 폴더를 재귀적으로 탐색하여 변환 대상 엑셀 파일을 수집합니다.
//! 이름에 `~`가 들어간 파일은 엑셀이 만드는 잠금/임시 파일이므로 제외합니다.

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Result, SheetJsonError};

/// 인식하는 엑셀 확장자
pub const SPREADSHEET_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// 엑셀 확장자인지 확인 (대소문자 무시)
pub fn has_spreadsheet_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// 잠금/임시 파일인지 확인
pub fn is_lock_file(file_name: &str) -> bool {
    file_name.contains('~')
}

/// 파일 탐색기
///
/// 패턴과 최대 깊이를 빌더 방식으로 설정한 뒤 [`Discoverer::discover`]를 호출합니다.
#[derive(Debug, Clone, Default)]
pub struct Discoverer {
    pattern: Option<Pattern>,
    max_depth: Option<usize>,
}

impl Discoverer {
    /// 기본 탐색기 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 파일 이름 패턴 설정 (glob 형식)
    ///
    /// # Examples
    /// ```
    /// use xlsx2json::discover::Discoverer;
    ///
    /// assert!(Discoverer::new().with_pattern(Some("item_*")).is_ok());
    /// assert!(Discoverer::new().with_pattern(Some("[broken")).is_err());
    /// ```
    pub fn with_pattern(mut self, pattern: Option<&str>) -> Result<Self> {
        self.pattern = match pattern {
            Some(p) => Some(Pattern::new(p).map_err(|_| SheetJsonError::InvalidPattern {
                pattern: p.to_string(),
            })?),
            None => None,
        };
        Ok(self)
    }

    /// 최대 탐색 깊이 설정
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// 파일 이름이 변환 대상인지 확인
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
            return false;
        };

        if is_lock_file(file_name) || !has_spreadsheet_extension(path) {
            return false;
        }

        match &self.pattern {
            Some(p) => p.matches(file_name),
            None => true,
        }
    }

    /// 루트 아래의 엑셀 파일 경로를 수집
    ///
    /// 일치하는 파일이 없으면 빈 벡터를 반환합니다. 루트를 읽을 수 없거나
    /// 탐색 중 I/O 오류가 나면 [`SheetJsonError::Discovery`]를 반환합니다.
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut walker = WalkDir::new(root);
        if let Some(max_depth) = self.max_depth {
            walker = walker.max_depth(max_depth);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| SheetJsonError::Discovery {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf()),
                reason: e.to_string(),
            })?;

            if entry.file_type().is_file() && self.accepts(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }
}
