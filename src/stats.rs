//! 변환 통계 모듈
//!
//! 작업 스레드에서 원자적으로 누적한 값을 [`Summary`] 스냅샷으로 꺼내 출력합니다.

use colored::Colorize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::converter::ConvertResult;

/// 일괄 변환 중 누적되는 통계
#[derive(Debug)]
pub struct Statistics {
    total_files: usize,
    converted: AtomicUsize,
    failed: AtomicUsize,
    records: AtomicUsize,
    bytes_read: AtomicU64,
    bytes_written: AtomicU64,
    started: Instant,
}

/// 특정 시점의 통계 값
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total_files: usize,
    pub converted: usize,
    pub failed: usize,
    pub records: usize,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub elapsed: Duration,
}

impl Statistics {
    /// 전체 파일 수로 통계 시작
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            converted: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            records: AtomicUsize::new(0),
            bytes_read: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    /// 파일 하나의 변환 결과 반영
    pub fn record(&self, result: &ConvertResult) {
        self.bytes_read.fetch_add(result.file_size, Ordering::Relaxed);

        if result.is_success() {
            self.converted.fetch_add(1, Ordering::Relaxed);
            self.records
                .fetch_add(result.record_count, Ordering::Relaxed);
            self.bytes_written
                .fetch_add(result.bytes_written, Ordering::Relaxed);
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// 현재 값 스냅샷
    pub fn summary(&self) -> Summary {
        Summary {
            total_files: self.total_files,
            converted: self.converted.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            records: self.records.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            elapsed: self.started.elapsed(),
        }
    }

    /// 통계 요약 출력
    pub fn print_summary(&self) {
        self.summary().print();
    }
}

impl Summary {
    /// 성공률 (%), 파일이 없으면 `None`
    pub fn success_rate(&self) -> Option<f64> {
        (self.total_files > 0).then(|| self.converted as f64 / self.total_files as f64 * 100.0)
    }

    fn print(&self) {
        let rule = "═".repeat(50);
        let failed = if self.failed > 0 {
            self.failed.to_string().red()
        } else {
            "0".green()
        };

        println!("\n{}", rule.bright_blue());
        println!("{}", " 📊 변환 통계".bright_white().bold());
        println!("{}", rule.bright_blue());

        let mut lines = vec![
            ("📁", "전체 파일", self.total_files.to_string().normal()),
            ("✅", "성공", self.converted.to_string().green()),
            ("❌", "실패", failed),
            ("🧾", "레코드 수", self.records.to_string().normal()),
            ("📥", "입력 용량", format_bytes(self.bytes_read).normal()),
            ("📤", "출력 용량", format_bytes(self.bytes_written).normal()),
        ];
        if let Some(rate) = self.success_rate() {
            lines.push(("📈", "성공률", format!("{:.1}%", rate).normal()));
        }
        lines.push(("⏱️", "처리 시간", format_duration(self.elapsed).normal()));

        for (icon, label, value) in lines {
            println!("  {} {:<10} {}", icon, label, value);
        }

        println!("{}", rule.bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use xlsx2json::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1536), "1.50 KB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    match secs {
        0 => format!("{}ms", duration.subsec_millis()),
        1..=59 => format!("{}.{:03}초", secs, duration.subsec_millis()),
        _ => format!("{}분 {}초", secs / 60, secs % 60),
    }
}
