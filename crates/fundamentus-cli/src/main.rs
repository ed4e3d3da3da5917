//! Fundamentus 조회 CLI.
//!
//! 결과는 stdout에 pretty JSON으로, 로그는 stderr로 출력됩니다.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fundamentus_core::{init_logging, AppConfig, LogConfig, LogFormat, Ticker};
use fundamentus_data::{CachePolicy, FundamentusPipeline, ResponseCache};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "fundamentus")]
#[command(about = "Fundamentus stock data fetcher", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 설정 파일 경로 (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 응답 캐시 비활성화
    #[arg(long, global = true)]
    no_cache: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// 종목 하나의 전체 정보 조회
    Ticker {
        /// 종목 코드 (예: MGLU3)
        ticker: Ticker,
    },

    /// 상장 기업 목록 조회
    Companies,

    /// 부동산 펀드(FII) 목록 조회
    PropertyFunds,

    /// 응답 캐시 비우기
    ClearCache,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // 설정 로드
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(Some(path.as_path()))
            .with_context(|| format!("설정 파일 로드 실패: {}", path.display()))?,
        None => AppConfig::load_default().context("설정 로드 실패")?,
    };
    if cli.no_cache {
        config.cache.enabled = false;
    }

    // 로깅 초기화
    let mut log_config = LogConfig::from_settings(&config.logging);
    if let Some(level) = cli.log_level {
        log_config.level = level;
    }
    if let Some(format) = cli.log_format {
        log_config.format = format;
    }
    init_logging(log_config).map_err(|e| anyhow::anyhow!(e))?;

    tracing::debug!(
        base_url = %config.http.base_url,
        cache_enabled = config.cache.enabled,
        "설정 로드 완료"
    );

    match cli.command {
        Commands::Ticker { ticker } => {
            let pipeline = FundamentusPipeline::from_config(&config)?;
            match pipeline.get_all_information(&ticker).await {
                Ok(contract) => print_json(&contract)?,
                Err(e) if e.is_unknown_ticker() => {
                    tracing::debug!(error = %e, "상세 페이지 추출 실패");
                    println!("Ticker não reconhecido: {ticker}");
                }
                Err(e) => return Err(e).context("종목 정보 조회 실패"),
            }
        }
        Commands::Companies => {
            let pipeline = FundamentusPipeline::from_config(&config)?;
            let contract = pipeline
                .list_all_companies()
                .await
                .context("기업 목록 조회 실패")?;
            print_json(&contract)?;
        }
        Commands::PropertyFunds => {
            let pipeline = FundamentusPipeline::from_config(&config)?;
            let contract = pipeline
                .list_all_property_funds()
                .await
                .context("부동산 펀드 목록 조회 실패")?;
            print_json(&contract)?;
        }
        Commands::ClearCache => {
            let cache = ResponseCache::new(CachePolicy::from_config(&config.cache));
            let removed = cache.clear().await.context("캐시 삭제 실패")?;
            tracing::info!(removed, directory = %config.cache.directory.display(), "캐시 삭제 완료");
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
