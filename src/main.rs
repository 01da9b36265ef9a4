use anyhow::Context;
use clap::Parser;
use lab_summary_common::{extract_with_confidence, guard, normalize, ReferenceCatalog};
use lab_summary_rust::{cli, config, input, pipeline, summarizer};
use cli::{Cli, Commands};
use config::Config;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load()?;
    if let Some(path) = &cli.catalog {
        config.catalog_path = Some(path.clone());
    }

    match cli.command {
        Commands::Extract { data, file, ocr_confidence, output } => {
            eprintln!("🧪 lab-summary - 検査行抽出\n");

            let text = input::read_report_text(data.as_deref(), file.as_deref())?;
            let result = extract_with_confidence(&text, &config.extract_options(), ocr_confidence);
            eprintln!("✔ {}件の候補を検出 (信頼度 {:.2})", result.tests_raw.len(), result.confidence);

            write_json(&result, output.as_deref())?;
        }

        Commands::Normalize { input: input_path, output, show_rejected } => {
            eprintln!("🧪 lab-summary - 正規化\n");

            let catalog = config.load_catalog()?;
            let content = input::read_file(&input_path)?;
            let candidates = input::parse_candidates(&content)
                .with_context(|| format!("候補リストの読み込みに失敗: {}", input_path.display()))?;

            let result = normalize(&candidates, &catalog);
            eprintln!("✔ {}/{}件を正規化", result.tests.len(), candidates.len());

            if show_rejected || cli.verbose {
                for rejected in &result.rejected {
                    eprintln!("  - 除外: {} ({})", rejected.raw, rejected.reason);
                }
            }

            write_json(&result, output.as_deref())?;
        }

        Commands::Guard { input: input_path, allow } => {
            let content = input::read_file(&input_path)?;
            let guard_input = input::parse_guard_input(&content)
                .with_context(|| format!("正規化結果の読み込みに失敗: {}", input_path.display()))?;

            let allowed = if allow.is_empty() {
                guard_input.allowed_names()
            } else {
                allow
            };

            let verdict = guard(&guard_input.tests, &allowed);
            match &verdict {
                Some(_) => eprintln!("✖ 入力にない検査名があります"),
                None => eprintln!("✔ すべての検査名が入力に含まれています"),
            }
            write_json(&verdict, None)?;
        }

        Commands::Process { data, file, ocr_confidence, output } => {
            eprintln!("🚀 lab-summary - 一括処理\n");

            let text = input::read_report_text(data.as_deref(), file.as_deref())?;
            let catalog = config.load_catalog()?;
            let backend = summarizer::AiCliBackend::from_config(&config, cli.ai_provider);

            eprintln!("抽出 → 正規化 → 要約 ({}) 中...", backend.provider);
            let outcome = pipeline::process(
                &text,
                ocr_confidence,
                &catalog,
                &config.extract_options(),
                &backend,
            )
            .await;

            if outcome.is_completed() {
                eprintln!("\n✅ 完了");
            } else {
                eprintln!("\n⚠ 未処理");
            }
            write_json(&outcome, output.as_deref())?;
        }

        Commands::Catalog { json } => {
            let catalog = config.load_catalog()?;
            if json {
                write_json(&catalog.entries(), None)?;
            } else {
                print_catalog(&catalog);
            }
        }

        Commands::Config { set_catalog, set_provider, show } => {
            // --catalog の一時的な上書きを保存しないよう読み直す
            let mut config = Config::load()?;

            if let Some(path) = set_catalog {
                config.set_catalog_path(path)?;
                println!("✔ 参照表を設定しました");
            }

            if let Some(provider) = set_provider {
                config.set_ai_provider(provider)?;
                println!("✔ AIプロバイダを設定しました: {}", provider);
            }

            if show {
                println!("設定:");
                println!("  AIプロバイダ: {}", config.ai_provider);
                println!("  モデル: {}", config.model.as_deref().unwrap_or("(既定)"));
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                if let Some(path) = &config.ai_cli_path {
                    println!("  AI CLI: {}", path.display());
                }
                println!(
                    "  参照表: {}",
                    config
                        .effective_catalog_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(組み込み)".into())
                );
                println!("  厳格抽出: {}", config.strict_extraction);
                println!("  区切り文字で分割: {}", config.split_on_separators);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn write_json<T: serde::Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("書き込みに失敗: {}", path.display()))?;
            eprintln!("✔ 結果を保存: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn print_catalog(catalog: &ReferenceCatalog) {
    println!("{:<14} {:<10} {:>10} {:>10}", "検査項目", "単位", "下限", "上限");
    for entry in catalog.entries() {
        println!(
            "{:<14} {:<10} {:>10} {:>10}",
            entry.name, entry.unit, entry.low, entry.high
        );
    }
}
