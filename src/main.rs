use clap::Parser;
use leaders_etl::domain::model::OutputFormat;
use leaders_etl::utils::{logger, validation::Validate};
use leaders_etl::{
    CliConfig, EtlEngine, IntroExtractor, LeaderApi, LeaderPipeline, LocalStorage, Session,
};
use std::io::Write;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting leaders-etl");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if config.format.is_none() {
        config.format = Some(prompt_format()?);
    }

    // 建立 session、API 客戶端與管道
    let session = Session::acquire(&config.root_url, Duration::from_secs(config.timeout_secs))?;
    let api = LeaderApi::new(session.clone(), &config.root_url);
    let intro = IntroExtractor::new(session, config.min_intro_length);
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = LeaderPipeline::new(api, intro, storage, config);

    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Scrape completed successfully!");
            println!("✅ Done! Data saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Scrape failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                leaders_etl::utils::error::ErrorSeverity::Low => 0,
                leaders_etl::utils::error::ErrorSeverity::Medium => 2,
                leaders_etl::utils::error::ErrorSeverity::High => 1,
                leaders_etl::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn prompt_format() -> std::io::Result<OutputFormat> {
    print!("Save as (J)SON or (C)SV? ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    // 除了 "c" 之外一律存成 JSON
    Ok(if line.trim().eq_ignore_ascii_case("c") {
        OutputFormat::Csv
    } else {
        OutputFormat::Json
    })
}
