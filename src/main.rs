//! xlsx2json - EXCEL FOLDER TO JSON CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use xlsx2json::{
    batch::{init_thread_pool, run_batch, BatchReport},
    cli::Args,
    converter::ConvertOptions,
    discover::Discoverer,
    error::SheetJsonError,
    stats::Statistics,
};

/// 일부 파일 변환이 실패했을 때의 종료 코드
const EXIT_PARTIAL_FAILURE: u8 = 2;

/// 실행 결과
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// 변환할 파일 없음
    NoFiles,
    /// 드라이런으로 목록만 출력
    DryRun,
    /// 모든 파일 변환 성공
    Converted,
    /// 일부 파일 변환 실패
    PartialFailure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::PartialFailure => ExitCode::from(EXIT_PARTIAL_FAILURE),
            _ => ExitCode::SUCCESS,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let code = match run(&args) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            eprintln!("{} {:#}", "❌".bright_red(), e);
            ExitCode::FAILURE
        }
    };

    if args.pause {
        wait_for_enter();
    }

    code
}

fn run(args: &Args) -> Result<Outcome> {
    if let Some(threads) = args.threads {
        init_thread_pool(threads).context("스레드 풀 초기화 실패")?;
    }

    let root = args.root().context("현재 폴더를 확인할 수 없습니다")?;

    print_header(args, &root);

    let discoverer = Discoverer::new()
        .with_pattern(args.pattern.as_deref())?
        .with_max_depth(args.max_depth);

    let files = discoverer
        .discover(&root)
        .context("엑셀 파일 탐색 실패")?;

    if files.is_empty() {
        println!("{}", format!("⚠️ {}", SheetJsonError::NoFilesFound).yellow());
        return Ok(Outcome::NoFiles);
    }

    println!(
        "  {} 발견된 파일 수: {}",
        "📋".bright_white(),
        files.len().to_string().bright_green()
    );

    if args.dry_run {
        print_dry_run(&files);
        return Ok(Outcome::DryRun);
    }

    run_conversion(args, files)
}

/// 헤더 출력
fn print_header(args: &Args, root: &Path) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        " 🚀 EXCEL FOLDER TO JSON CONVERTER".bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 입력 폴더: {:?}", "📂".bright_cyan(), root);
    println!(
        "  {} 출력 폴더: <파일 위치>/{}",
        "📄".bright_green(),
        args.out_dir_name
    );

    if let Some(ref pattern) = args.pattern {
        println!("  {} 패턴 필터: {}", "🔍".bright_magenta(), pattern);
    }

    if let Some(depth) = args.max_depth {
        println!("  {} 최대 깊이: {}", "📏".bright_white(), depth);
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 변환 없음)".yellow()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
    println!("\n{}", "📁 파일 검색 중...".bright_cyan());
}

/// 드라이런 출력
fn print_dry_run(files: &[PathBuf]) {
    println!("\n{}", "📋 처리 예정 파일 목록:".bright_cyan());
    for (i, path) in files.iter().enumerate() {
        println!("  {}. {:?}", i + 1, path);
    }
    println!(
        "\n{} 총 {} 개의 파일이 변환될 예정입니다.",
        "ℹ️".bright_blue(),
        files.len().to_string().bright_green()
    );
}

/// 변환 실행
fn run_conversion(args: &Args, files: Vec<PathBuf>) -> Result<Outcome> {
    let stats = Statistics::new(files.len());
    let pb = create_progress_bar(files.len());
    let options = ConvertOptions::new().with_output_dir_name(args.out_dir_name.clone());

    println!("\n{}", "⚡ 병렬 변환 중...".bright_cyan());

    let report = run_batch(files, &options, &stats, |_| pb.inc(1));

    pb.finish_with_message("완료!");

    print_successes(&report);

    let errors = report.failures();
    print_errors(&errors, args.verbose);

    if let Some(ref log_path) = args.log {
        write_error_log(log_path, &errors)?;
    }

    stats.print_summary();

    if report.has_failures() {
        println!(
            "\n{} {} 개의 파일 변환에 실패했습니다.\n",
            "⚠️".bright_yellow(),
            errors.len().to_string().red()
        );
        Ok(Outcome::PartialFailure)
    } else {
        println!("\n{} 모든 파일 변환 완료!\n", "✅".bright_green());
        Ok(Outcome::Converted)
    }
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

/// 성공 목록 출력
fn print_successes(report: &BatchReport) {
    println!("\n{}", "💾 변환 성공:".bright_cyan());
    for result in report.successes() {
        if let Some(ref output) = result.output {
            println!(
                "  {} {:?} → {:?} ({} 레코드)",
                "✓".green(),
                result.path.file_name().unwrap_or_default(),
                output,
                result.record_count
            );
        }
    }
}

/// 에러 목록 출력
fn print_errors(errors: &[(PathBuf, String)], verbose: bool) {
    if errors.is_empty() {
        return;
    }

    println!("\n{}", "❌ 오류 발생 파일:".bright_red());
    for (path, error) in errors {
        println!("  {} {:?}", "•".red(), path);
        if verbose {
            println!("    {}", error.dimmed());
        }
    }
}

/// 에러 로그 파일 작성
fn write_error_log(log_path: &Path, errors: &[(PathBuf, String)]) -> Result<()> {
    let mut log_file = File::create(log_path)
        .with_context(|| format!("에러 로그 파일을 만들 수 없습니다: {:?}", log_path))?;

    writeln!(log_file, "xlsx2json 에러 로그")?;
    writeln!(log_file, "생성 시간: {}", unix_now())?;
    writeln!(log_file, "총 에러 수: {}", errors.len())?;
    writeln!(log_file, "{}", "=".repeat(50))?;

    for (path, error) in errors {
        writeln!(log_file, "\n파일: {:?}", path)?;
        writeln!(log_file, "에러: {}", error)?;
    }

    println!("\n{} 에러 로그 저장: {:?}", "📝".bright_cyan(), log_path);

    Ok(())
}

/// 현재 시간 문자열 반환
fn unix_now() -> String {
    use std::time::SystemTime;
    let duration = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    format!("Unix timestamp: {}", duration.as_secs())
}

/// Enter 키 입력 대기
fn wait_for_enter() {
    println!("계속하려면 Enter 키를 누르세요...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
}
