//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures passed between the planner, the
//! execution engine and the reporters: the resolved per-pass configuration,
//! the pass state machine, pass results and typed pass failures.
//!
//! 此模块定义了在计划器、执行引擎和报告器之间传递的数据结构：
//! 解析后的每轮配置、轮次状态机、轮次结果以及类型化的失败。

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use crate::core::config::Variant;
use crate::infra::t;

/// The resolved configuration for one variant pass.
/// Created once per variant by the planner and never mutated afterwards.
///
/// 单个变体轮次的解析后配置。
/// 由计划器为每个变体创建一次，之后不再修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// The server executable under test.
    /// 被测服务器可执行文件。
    pub server: PathBuf,
    /// Startup arguments for the server (the concurrency hint).
    /// 服务器启动参数（并发提示）。
    pub server_args: Vec<OsString>,
    /// The external test-runner script.
    /// 外部测试脚本。
    pub test_runner: PathBuf,
    /// Whether `--fast` is appended to the test-runner command line.
    /// 是否在测试脚本命令行末尾追加 `--fast`。
    pub fast: bool,
    /// The variant this pass exercises.
    /// 此轮测试的变体。
    pub variant: Variant,
}

/// States of a single variant pass.
///
/// `ServerStopping` and `ServerStopped` follow every state once a server
/// handle exists, so they are always the last two transitions of a pass that
/// got past `ServerStarting`.
///
/// 单个变体轮次的状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassState {
    NotStarted,
    ServerStarting,
    ServerRunning,
    TestRunning,
    TestPassed,
    TestFailed,
    ServerStopping,
    ServerStopped,
}

/// Enumerates the possible reasons for a failed pass.
/// 枚举轮次失败的可能原因。
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FailureReason {
    /// The server or the test-runner could not be started.
    /// 服务器或测试脚本无法启动。
    Spawn,
    /// The test-runner exited with a non-zero status.
    /// 测试脚本以非零状态退出。
    TestFailed,
    /// An operator interrupt stopped the pass.
    /// 操作员中断停止了此轮。
    Interrupted,
    /// Any other error while coordinating the processes.
    /// 协调进程时发生的其他错误。
    Fault,
}

impl FailureReason {
    /// Localised label used in failure banners.
    pub fn label(&self, locale: &str) -> String {
        match self {
            FailureReason::Spawn => t!("report.reason_spawn", locale = locale),
            FailureReason::TestFailed => t!("report.reason_test_failed", locale = locale),
            FailureReason::Interrupted => t!("report.reason_interrupted", locale = locale),
            FailureReason::Fault => t!("report.reason_fault", locale = locale),
        }
        .to_string()
    }
}

/// The error a failed pass resolves to. It is either the error itself
/// (`TestFailed`, `Interrupted`) or the outermost context wrapped around the
/// underlying I/O error (`Spawn`, `Fault`). Either way callers can
/// `downcast_ref::<PassFailure>()` to learn which variant failed and why.
///
/// 失败轮次对应的错误。它要么就是错误本身（`TestFailed`、`Interrupted`），
/// 要么是包裹底层 I/O 错误的最外层上下文（`Spawn`、`Fault`）。
/// 两种情况下调用方都可以通过 `downcast_ref::<PassFailure>()` 获知失败的变体与原因。
#[derive(Debug)]
pub struct PassFailure {
    /// Name of the variant that failed.
    /// 失败的变体名称。
    pub variant: &'static str,
    /// Why the pass failed.
    /// 失败原因。
    pub reason: FailureReason,
    /// Exit status of the test-runner, for `TestFailed`.
    /// 测试脚本的退出状态（仅用于 `TestFailed`）。
    pub status: Option<ExitStatus>,
}

impl PassFailure {
    pub fn new(variant: &'static str, reason: FailureReason) -> Self {
        Self {
            variant,
            reason,
            status: None,
        }
    }

    pub fn test_failed(variant: &'static str, status: ExitStatus) -> Self {
        Self {
            variant,
            reason: FailureReason::TestFailed,
            status: Some(status),
        }
    }
}

impl fmt::Display for PassFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.reason, self.status) {
            (FailureReason::TestFailed, Some(status)) => write!(
                f,
                "{}",
                t!("error.test_failed", name = self.variant, status = status)
            ),
            (FailureReason::Interrupted, _) => {
                write!(f, "{}", t!("error.interrupted", name = self.variant))
            }
            (reason, _) => write!(
                f,
                "{}",
                t!(
                    "report.failure_line",
                    name = self.variant,
                    reason = reason.label(&rust_i18n::locale())
                )
            ),
        }
    }
}

impl std::error::Error for PassFailure {}

/// The record of a pass that completed successfully.
///
/// 成功完成的轮次记录。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassResult {
    /// Name of the variant.
    /// 变体名称。
    pub variant: &'static str,
    /// The test-runner command line that was executed.
    /// 执行的测试脚本命令行。
    pub command_line: Vec<OsString>,
    /// Wall time from server spawn to server reaped.
    /// 从服务器启动到服务器回收的耗时。
    pub duration: Duration,
}
