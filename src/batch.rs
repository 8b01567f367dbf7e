//! 병렬 일괄 변환 모듈
//!
//! 파일마다 독립된 변환 작업을 rayon 풀에서 실행하고, 모든 작업이 끝난 뒤
//! 결과를 모아 반환합니다. 한 파일의 실패는 다른 파일에 영향을 주지 않습니다.

use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::converter::{convert_file, ConvertOptions, ConvertResult};
use crate::error::{Result, SheetJsonError};
use crate::stats::Statistics;

/// 일괄 변환 결과
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 원본 경로 순으로 정렬된 파일별 결과
    pub results: Vec<ConvertResult>,
}

impl BatchReport {
    /// 성공한 결과
    pub fn successes(&self) -> impl Iterator<Item = &ConvertResult> {
        self.results.iter().filter(|r| r.is_success())
    }

    /// 실패한 결과 (원본 경로, 에러 메시지)
    pub fn failures(&self) -> Vec<(PathBuf, String)> {
        self.results
            .iter()
            .filter_map(|r| r.error.as_ref().map(|e| (r.path.clone(), e.clone())))
            .collect()
    }

    /// 실패한 파일이 하나라도 있는지 확인
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| !r.is_success())
    }
}

/// 전역 rayon 스레드 풀 크기 설정
pub fn init_thread_pool(threads: usize) -> Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .map_err(|e| SheetJsonError::ThreadPool {
            reason: e.to_string(),
        })
}

/// 모든 파일을 병렬로 변환
///
/// `on_done`은 파일 하나가 끝날 때마다 작업 스레드에서 호출됩니다.
pub fn run_batch<F>(
    files: Vec<PathBuf>,
    options: &ConvertOptions,
    stats: &Statistics,
    on_done: F,
) -> BatchReport
where
    F: Fn(&ConvertResult) + Sync,
{
    let queue: Mutex<Vec<ConvertResult>> = Mutex::new(Vec::with_capacity(files.len()));

    files.into_par_iter().for_each(|path| {
        let result = convert_file(path, options);
        stats.record(&result);
        on_done(&result);
        queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(result);
    });

    let mut results = queue
        .into_inner()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    results.sort_by(|a, b| a.path.cmp(&b.path));

    BatchReport { results }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_run_batch_collects_every_failure() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let files: Vec<PathBuf> = (0..4)
            .map(|i| temp_dir.path().join(format!("missing{i}.xlsx")))
            .collect();

        let stats = Statistics::new(files.len());
        let calls = AtomicUsize::new(0);
        let report = run_batch(files, &ConvertOptions::new(), &stats, |_| {
            calls.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(report.results.len(), 4);
        assert_eq!(report.failures().len(), 4);
        assert_eq!(report.successes().count(), 0);
        assert!(report.has_failures());
        assert_eq!(calls.load(Ordering::Relaxed), 4);
        assert_eq!(stats.summary().failed, 4);
        assert!(report.results[0].path.ends_with("missing0.xlsx"));
    }

    #[test]
    fn test_run_batch_empty() {
        let stats = Statistics::new(0);
        let report = run_batch(Vec::new(), &ConvertOptions::new(), &stats, |_| {});

        assert!(report.results.is_empty());
        assert!(!report.has_failures());
    }
}
