//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::Parser;
use std::path::PathBuf;

use crate::converter::DEFAULT_OUTPUT_DIR;

/// xlsx2json CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "xlsx2json",
    author = "YourName <your@email.com>",
    version,
    about = "EXCEL FOLDER TO JSON CONVERTER - 폴더 내 엑셀 파일들을 파일별 JSON 문서로 변환하는 CLI 도구",
    long_about = r#"
EXCEL FOLDER TO JSON CONVERTER
==============================

지정된 폴더(기본값: 현재 폴더) 아래의 모든 .xlsx / .xls 파일을 찾아
각 파일 옆의 json/ 폴더에 같은 이름의 JSON 파일을 만듭니다.

시트 규칙:
  • 1행: 헤더 (소문자로 바뀌어 필드 이름이 됨)
  • 4행: 마커 행 (값이 "3"인 열만 출력)
  • 5행부터: 데이터 (첫 번째 열 값이 레코드 키)

예제:
  xlsx2json
  xlsx2json -i ./tables
  xlsx2json -i ./tables --pattern "item_*" --verbose
  xlsx2json -i ./tables --dry-run
  xlsx2json -i ./tables --log errors.txt --pause
"#
)]
pub struct Args {
    /// 엑셀 파일을 찾을 루트 폴더 (기본값: 현재 폴더)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// 파일 이름 패턴 필터 (glob 형식, 예: "item_*", "skill?.xlsx")
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// 파일 옆에 만들 출력 폴더 이름
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub out_dir_name: String,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 실제 변환 없이 처리될 파일 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 병렬 처리 스레드 수 (기본값: CPU 코어 수)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// 최대 폴더 탐색 깊이
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// 에러 로그 파일 경로
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// 종료 전에 Enter 키 입력 대기
    #[arg(long)]
    pub pause: bool,
}

impl Args {
    /// 탐색 루트 결정 (지정이 없으면 현재 폴더)
    pub fn root(&self) -> std::io::Result<PathBuf> {
        match &self.input {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir(),
        }
    }
}
