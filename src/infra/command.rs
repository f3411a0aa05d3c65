//! # Command Module / 命令模块
//!
//! Helpers for building, spawning and awaiting child processes.
//! Children inherit the harness's stdio; nothing is captured.
//!
//! 用于构建、启动和等待子进程的辅助函数。
//! 子进程继承本程序的标准输入输出，不做任何捕获。

use std::ffi::OsString;
use std::io;
use std::process::ExitStatus;

use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;

/// How waiting on a child ended.
/// 等待子进程的结束方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waited {
    /// The child exited on its own.
    /// 子进程自行退出。
    Exited(ExitStatus),
    /// The token fired first; the child has been killed and reaped.
    /// 取消令牌先触发；子进程已被终止并回收。
    Cancelled,
}

/// Builds a `Command` from a full command line (program first).
/// The child is killed if its handle is dropped while still running.
/// An empty command line fails at spawn time with `NotFound`.
///
/// 根据完整命令行（第一个元素为程序）构建 `Command`。
/// 如果句柄在子进程仍运行时被丢弃，子进程会被终止。
pub fn build_command(cmdline: &[OsString]) -> Command {
    let (program, args) = match cmdline.split_first() {
        Some((program, args)) => (program.as_os_str(), args),
        None => (std::ffi::OsStr::new(""), &[][..]),
    };

    let mut cmd = Command::new(program);
    cmd.args(args).kill_on_drop(true);
    cmd
}

/// Spawns the given command line. Returns immediately with the child handle.
///
/// 启动给定的命令行，并立即返回子进程句柄。
pub fn spawn(cmdline: &[OsString]) -> io::Result<Child> {
    build_command(cmdline).spawn()
}

/// Waits for `child` to exit unless `cancel` fires first, in which case the
/// child is killed and reaped before returning `Waited::Cancelled`.
///
/// 等待 `child` 退出；如果 `cancel` 先触发，则在返回 `Waited::Cancelled`
/// 之前终止并回收子进程。
pub async fn wait_or_cancel(mut child: Child, cancel: &CancellationToken) -> io::Result<Waited> {
    tokio::select! {
        biased;
        status = child.wait() => status.map(Waited::Exited),
        _ = cancel.cancelled() => {
            child.kill().await?;
            Ok(Waited::Cancelled)
        }
    }
}

/// Asks `child` to terminate and waits until it has been reaped.
/// On unix this sends SIGTERM so the child can shut down cleanly; it is not
/// escalated to SIGKILL. A child that already exited is simply reaped.
///
/// 请求 `child` 终止并等待其被回收。在 unix 上发送 SIGTERM，
/// 让子进程可以正常关闭，且不会升级为 SIGKILL。已经退出的子进程只会被回收。
pub async fn terminate(child: &mut Child) -> io::Result<ExitStatus> {
    if let Some(status) = child.try_wait()? {
        return Ok(status);
    }
    request_termination(child)?;
    child.wait().await
}

/// Sends SIGTERM. The child has not been reaped yet, so its pid is still ours.
#[cfg(unix)]
fn request_termination(child: &mut Child) -> io::Result<()> {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let Some(id) = child.id() else {
        return Ok(());
    };
    let pid = i32::try_from(id).map_err(io::Error::other)?;
    kill(Pid::from_raw(pid), Signal::SIGTERM).map_err(io::Error::from)
}

#[cfg(not(unix))]
fn request_termination(child: &mut Child) -> io::Result<()> {
    child.start_kill()
}

/// Renders a command line for display, quoting arguments as a POSIX shell
/// would need them.
///
/// 以 POSIX shell 所需的引号形式渲染命令行，用于显示。
pub fn display_command(cmdline: &[OsString]) -> String {
    let parts: Vec<String> = cmdline
        .iter()
        .map(|part| part.to_string_lossy().into_owned())
        .collect();

    shlex::try_join(parts.iter().map(String::as_str)).unwrap_or_else(|_| parts.join(" "))
}
