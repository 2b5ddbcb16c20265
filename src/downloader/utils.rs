// Helper functions shared by the probe and fetch paths

use std::process::{Output, Stdio};

use tokio::io::AsyncReadExt;
use tokio::process::Command as TokioCommand;
use tokio::time::{timeout, Duration};

use super::errors::DownloadError;
use super::models::NetworkConfig;

/// Run a command to completion with a wall-clock timeout, capturing
/// stdout and stderr. The child is killed on timeout.
pub async fn run_output_with_timeout(
    program: &str,
    args: &[String],
    timeout_secs: u64,
) -> Result<Output, DownloadError> {
    let mut child = TokioCommand::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| DownloadError::ToolNotFound(format!("{program}: {e}")))?;

    let mut stdout_pipe = child
        .stdout
        .take()
        .ok_or_else(|| DownloadError::ExecutionError(format!("failed to capture stdout from {program}")))?;
    let mut stderr_pipe = child
        .stderr
        .take()
        .ok_or_else(|| DownloadError::ExecutionError(format!("failed to capture stderr from {program}")))?;

    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stdout_pipe
            .read_to_end(&mut buf)
            .await
            .map_err(|e| DownloadError::ExecutionError(format!("failed to read stdout: {e}")))?;
        Ok::<Vec<u8>, DownloadError>(buf)
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stderr_pipe
            .read_to_end(&mut buf)
            .await
            .map_err(|e| DownloadError::ExecutionError(format!("failed to read stderr: {e}")))?;
        Ok::<Vec<u8>, DownloadError>(buf)
    });

    match timeout(Duration::from_secs(timeout_secs), child.wait()).await {
        Ok(status_res) => {
            let status = status_res
                .map_err(|e| DownloadError::ExecutionError(format!("failed to wait for {program}: {e}")))?;
            let stdout = stdout_task
                .await
                .map_err(|e| DownloadError::ExecutionError(format!("stdout task failed: {e}")))??;
            let stderr = stderr_task
                .await
                .map_err(|e| DownloadError::ExecutionError(format!("stderr task failed: {e}")))??;
            Ok(Output {
                status,
                stdout,
                stderr,
            })
        }
        Err(_) => {
            let _ = child.kill().await;
            stdout_task.abort();
            stderr_task.abort();
            Err(DownloadError::NetworkTimeout)
        }
    }
}

/// Network flags forwarded to every yt-dlp invocation.
pub fn network_args(config: &NetworkConfig) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(timeout) = config.timeout {
        args.push("--socket-timeout".to_string());
        args.push(timeout.to_string());
    }

    if let Some(proxy) = &config.proxy {
        args.push("--proxy".to_string());
        args.push(proxy.clone());
    }

    args
}

/// Wall-clock budget for one yt-dlp metadata probe: twice the socket
/// timeout, so a single retry inside yt-dlp still fits.
pub fn probe_timeout_secs(config: &NetworkConfig) -> u64 {
    u64::from(config.timeout.unwrap_or(30)) * 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_args_include_timeout_and_proxy() {
        let config = NetworkConfig::default().with_proxy(Some("socks5://127.0.0.1:1080".into()));
        let args = network_args(&config);
        assert_eq!(
            args,
            vec!["--socket-timeout", "30", "--proxy", "socks5://127.0.0.1:1080"]
        );
    }

    #[test]
    fn network_args_empty_without_options() {
        let config = NetworkConfig {
            proxy: None,
            timeout: None,
        };
        assert!(network_args(&config).is_empty());
    }

    #[tokio::test]
    async fn timeout_kills_the_child() {
        let err = run_output_with_timeout("sleep", &["5".to_string()], 1)
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::NetworkTimeout));
    }

    #[tokio::test]
    async fn captures_stdout() {
        let out = run_output_with_timeout("echo", &["hello".to_string()], 5)
            .await
            .unwrap();
        assert!(out.status.success());
        assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "hello");
    }
}
