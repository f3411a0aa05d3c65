//! # Pass Execution Engine Module / 轮次执行引擎模块
//!
//! This module runs the matrix. A pass spawns the server, runs the
//! test-runner against it and then terminates and reaps the server on every
//! exit path. Passes run strictly one after another and the first failure
//! stops the matrix.
//!
//! 此模块负责运行矩阵。每一轮会启动服务器、针对其运行测试脚本，
//! 并在任何退出路径上终止并回收服务器。各轮严格依次运行，
//! 第一个失败即停止整个矩阵。

use anyhow::{Context, Result};
use std::io;
use std::process::ExitStatus;
use std::time::{Duration, Instant};
use tokio::process::Child;
use tokio_util::sync::CancellationToken;

use crate::{
    core::models::{FailureReason, PassFailure, PassResult, PassState, RunConfig},
    infra::{
        command::{self, Waited},
        t,
    },
};

/// Observer of pass lifecycle events. The console reporter prints them;
/// tests record them.
///
/// 轮次生命周期事件的观察者。控制台报告器负责打印，测试负责记录。
pub trait PassListener {
    /// Called on every state change of a pass.
    /// 在轮次每次状态变化时调用。
    fn transition(&mut self, config: &RunConfig, state: PassState);

    /// Called when stopping the server failed after the test-runner had
    /// already failed. The test failure is what the pass reports.
    /// 在测试脚本已经失败之后，停止服务器也失败时调用。
    fn cleanup_failed(&mut self, _config: &RunConfig, _error: &io::Error) {}
}

/// A live server owned by exactly one pass.
///
/// Normal and error paths call [`ServerProcess::shutdown`], which terminates
/// the server and waits for it. If the guard is dropped without that (a
/// panic, or the pass future being dropped), the child is killed on drop.
///
/// 由单个轮次独占的运行中服务器。
/// 正常路径和错误路径都会调用 [`ServerProcess::shutdown`]，终止服务器并等待其退出。
/// 如果守卫在未调用该方法的情况下被丢弃，子进程会在丢弃时被终止。
#[derive(Debug)]
pub struct ServerProcess {
    child: Child,
}

impl ServerProcess {
    /// Spawns the server for `config`. Does not wait for it to listen.
    pub fn spawn(config: &RunConfig) -> io::Result<Self> {
        let child = command::spawn(&config.server_command_line())?;
        Ok(Self { child })
    }

    /// OS process id of the server, while it has not been reaped.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Terminates the server and waits until it has exited.
    pub async fn shutdown(mut self) -> io::Result<ExitStatus> {
        command::terminate(&mut self.child).await
    }
}

/// Runs one variant pass: spawn the server, run the test-runner, stop the
/// server.
///
/// # Arguments
/// * `config` - The resolved configuration of this pass
/// * `listener` - Receives every state transition
/// * `cancel` - Fires on operator interrupt
///
/// # Returns
/// A `PassResult` on success. On failure the error carries a `PassFailure`
/// naming the variant and the reason; it is returned only after the server
/// has been reaped.
pub async fn run_variant(
    config: &RunConfig,
    listener: &mut dyn PassListener,
    cancel: &CancellationToken,
) -> Result<PassResult> {
    let name = config.variant.name;
    listener.transition(config, PassState::NotStarted);

    if cancel.is_cancelled() {
        return Err(PassFailure::new(name, FailureReason::Interrupted).into());
    }

    let start_time = Instant::now();
    listener.transition(config, PassState::ServerStarting);

    let server = ServerProcess::spawn(config)
        .with_context(|| t!("error.spawn_server", path = config.server.display()).to_string())
        .context(PassFailure::new(name, FailureReason::Spawn))?;
    listener.transition(config, PassState::ServerRunning);

    let outcome = run_test_runner(config, listener, cancel).await;

    listener.transition(config, PassState::ServerStopping);
    let stopped = server.shutdown().await;
    if stopped.is_ok() {
        listener.transition(config, PassState::ServerStopped);
    }

    settle_pass(config, listener, outcome, stopped, start_time.elapsed())
}

/// Combines the test-runner outcome with the outcome of stopping the server.
///
/// A cleanup error never replaces a test failure: when both fail, the test
/// failure is returned and the cleanup error goes to
/// [`PassListener::cleanup_failed`]. A cleanup error after a passing test
/// fails the pass with `Fault`.
///
/// 合并测试脚本的结果与停止服务器的结果。清理错误绝不会取代测试失败。
pub fn settle_pass(
    config: &RunConfig,
    listener: &mut dyn PassListener,
    outcome: Result<()>,
    stopped: io::Result<ExitStatus>,
    duration: Duration,
) -> Result<PassResult> {
    let name = config.variant.name;
    match (outcome, stopped) {
        (Ok(()), Ok(_)) => Ok(PassResult {
            variant: name,
            command_line: config.test_runner_command_line(),
            duration,
        }),
        (Ok(()), Err(e)) => Err(anyhow::Error::new(e)
            .context(t!("error.stop_server").to_string())
            .context(PassFailure::new(name, FailureReason::Fault))),
        (Err(e), Ok(_)) => Err(e),
        (Err(e), Err(cleanup)) => {
            listener.cleanup_failed(config, &cleanup);
            Err(e)
        }
    }
}

/// Runs the test-runner for `config` against the already running server.
async fn run_test_runner(
    config: &RunConfig,
    listener: &mut dyn PassListener,
    cancel: &CancellationToken,
) -> Result<()> {
    let name = config.variant.name;
    let cmdline = config.test_runner_command_line();

    listener.transition(config, PassState::TestRunning);
    let child = command::spawn(&cmdline)
        .with_context(|| {
            t!("error.spawn_test_runner", path = config.test_runner.display()).to_string()
        })
        .context(PassFailure::new(name, FailureReason::Spawn))?;

    let waited = command::wait_or_cancel(child, cancel)
        .await
        .with_context(|| t!("error.wait_test_runner").to_string())
        .context(PassFailure::new(name, FailureReason::Fault))?;

    match waited {
        Waited::Exited(status) if status.success() => {
            listener.transition(config, PassState::TestPassed);
            Ok(())
        }
        Waited::Exited(status) => {
            listener.transition(config, PassState::TestFailed);
            Err(PassFailure::test_failed(name, status).into())
        }
        Waited::Cancelled => {
            listener.transition(config, PassState::TestFailed);
            Err(PassFailure::new(name, FailureReason::Interrupted).into())
        }
    }
}

/// Runs every pass in order. The first failure is returned immediately and
/// the remaining variants are not started.
pub async fn run_all(
    configs: &[RunConfig],
    listener: &mut dyn PassListener,
    cancel: &CancellationToken,
) -> Result<Vec<PassResult>> {
    let mut results = Vec::with_capacity(configs.len());
    for config in configs {
        results.push(run_variant(config, listener, cancel).await?);
    }
    Ok(results)
}
