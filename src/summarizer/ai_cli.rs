//! AI CLI連携モジュール
//!
//! claude / codex / gemini のCLIを子プロセスとして起動し、
//! 要約プロンプトへの応答テキストを受け取る。

use super::SummaryBackend;
use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::{LabSummaryError, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

/// AI CLIを使う要約バックエンド
#[derive(Debug, Clone)]
pub struct AiCliBackend {
    pub provider: AiProvider,
    pub model: Option<String>,
    pub timeout: Duration,
    /// 実行ファイルの明示パス
    pub program: Option<PathBuf>,
}

impl AiCliBackend {
    pub fn new(provider: AiProvider) -> Self {
        Self {
            provider,
            model: None,
            timeout: Duration::from_secs(120),
            program: None,
        }
    }

    pub fn from_config(config: &Config, provider: Option<AiProvider>) -> Self {
        Self {
            provider: provider.unwrap_or(config.ai_provider),
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            program: config.ai_cli_path.clone(),
        }
    }

    fn program(&self) -> OsString {
        match &self.program {
            Some(path) => path.as_os_str().to_os_string(),
            None => OsString::from(self.provider.command_name()),
        }
    }

    fn command(&self, prompt: &str) -> Command {
        let args = self.provider.prompt_args(prompt, self.model.as_deref());

        // Windowsではcmd /c経由（改行は渡せないのでスペースに置換）
        #[cfg(windows)]
        let command = {
            let mut command = Command::new("cmd");
            command.arg("/c").arg(self.program());
            command.args(args.iter().map(|a| a.replace('\n', " ").replace('"', "\\\"")));
            command
        };

        #[cfg(not(windows))]
        let command = {
            let mut command = Command::new(self.program());
            command.args(&args);
            command
        };

        command
    }
}

impl SummaryBackend for AiCliBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let name = self.provider.command_name();
        tracing::info!(provider = name, prompt_len = prompt.len(), "AI CLI呼び出し");

        let mut command = self.command(prompt);
        command.kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| LabSummaryError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| LabSummaryError::CliExecution(format!("{} 実行エラー: {}", name, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LabSummaryError::CliExecution(format!(
                "{} failed (code {:?}): {}",
                name,
                output.status.code(),
                stderr.trim()
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).to_string();
        let preview: String = response.chars().take(200).collect();
        tracing::debug!(%preview, "AI CLI応答");

        Ok(response)
    }
}
