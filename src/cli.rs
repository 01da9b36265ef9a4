use clap::{Parser, Subcommand};
use crate::ai_provider::AiProvider;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lab-summary")]
#[command(about = "検査報告書の抽出・正規化・要約ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AIプロバイダ (claude/codex/gemini)。省略時は設定ファイルの値
    #[arg(long, global = true)]
    pub ai_provider: Option<AiProvider>,

    /// 参照表JSONファイル（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 報告書テキストから検査行候補を抽出
    Extract {
        /// 報告書テキスト（直接指定）
        #[arg(short, long, conflicts_with = "file")]
        data: Option<String>,

        /// 報告書テキストファイル（OCR結果など）
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// OCRエンジンの信頼度（0-1 または 0-100）。OCR経由の場合のみ指定
        #[arg(long)]
        ocr_confidence: Option<f64>,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 候補リストを参照表で正規化
    Normalize {
        /// 候補リストJSON（配列 or {"tests_raw": [...]}）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 除外したセグメントを表示
        #[arg(long)]
        show_rejected: bool,
    },

    /// 正規化結果の検査名が入力に含まれるか検証
    Guard {
        /// 正規化結果JSON（{"tests": [...], "provenance": [...]})
        #[arg(required = true)]
        input: PathBuf,

        /// 許可する検査名（指定時は出所より優先、複数可）
        #[arg(short, long)]
        allow: Vec<String>,
    },

    /// 抽出から要約まで一括実行
    Process {
        /// 報告書テキスト（直接指定）
        #[arg(short, long, conflicts_with = "file")]
        data: Option<String>,

        /// 報告書テキストファイル（OCR結果など）
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// OCRエンジンの信頼度（0-1 または 0-100）
        #[arg(long)]
        ocr_confidence: Option<f64>,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 参照表を表示
    Catalog {
        /// JSON形式で出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 参照表JSONファイルを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 既定のAIプロバイダを設定
        #[arg(long)]
        set_provider: Option<AiProvider>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
