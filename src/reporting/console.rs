//! # Console Reporting Module / 控制台报告模块
//!
//! This module handles everything the harness prints: lifecycle lines around
//! each pass, the summary table after a successful matrix and the banner for
//! a failed one.
//!
//! 此模块处理测试工具打印的所有内容：每轮前后的生命周期信息、
//! 矩阵成功后的摘要表以及失败时的横幅。

use colored::*;
use std::io;

use crate::core::execution::PassListener;
use crate::core::models::{PassFailure, PassResult, PassState, RunConfig};
use crate::infra::command::display_command;
use crate::infra::t;

/// Prints pass lifecycle events as they happen.
///
/// 在轮次生命周期事件发生时打印它们。
#[derive(Debug, Clone)]
pub struct ConsoleListener {
    locale: String,
}

impl ConsoleListener {
    pub fn new(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
        }
    }
}

impl PassListener for ConsoleListener {
    fn transition(&mut self, config: &RunConfig, state: PassState) {
        let locale = self.locale.as_str();
        match state {
            PassState::ServerStarting => println!(
                "\n{}",
                t!("run.variant_banner", locale = locale, name = config.variant.name).bold()
            ),
            PassState::ServerRunning => {
                println!("{}", t!("run.server_started", locale = locale).blue())
            }
            PassState::TestRunning => println!(
                "{}",
                t!(
                    "run.running_command",
                    locale = locale,
                    command = display_command(&config.test_runner_command_line())
                )
                .blue()
            ),
            PassState::ServerStopping => {
                println!("{}", t!("run.killing_server", locale = locale).blue())
            }
            PassState::ServerStopped => {
                println!("{}", t!("run.server_killed", locale = locale).blue())
            }
            PassState::NotStarted | PassState::TestPassed | PassState::TestFailed => {}
        }
    }

    fn cleanup_failed(&mut self, _config: &RunConfig, error: &io::Error) {
        eprintln!(
            "{}",
            t!("run.cleanup_failed", locale = &self.locale, error = error).yellow()
        );
    }
}

/// Prints a formatted summary of the completed passes.
///
/// # Output Format / 输出格式
/// ```text
/// --- Matrix Summary ---
///   - Passed   | default          |      3.21s
///   - Passed   | udp              |      2.87s
/// ```
pub fn print_summary(results: &[PassResult], locale: &str) {
    println!("\n{}", t!("report.summary_banner", locale = locale).bold());

    for result in results {
        let status = t!("report.status_passed", locale = locale).to_string();
        println!(
            "  - {:<10} | {:<16} | {:>10}",
            status.green(),
            result.variant,
            format!("{:.2?}", result.duration)
        );
    }

    println!("\n{}", t!("report.all_passed", locale = locale).green().bold());
}

/// Prints the banner for a failed matrix. Only the first failure exists,
/// since the matrix stops there.
///
/// 打印矩阵失败的横幅。由于矩阵在第一个失败处停止，因此只有一个失败。
pub fn print_failure(error: &anyhow::Error, locale: &str) {
    println!("\n{}", t!("report.failure_banner", locale = locale).red().bold());
    println!("{}", "-".repeat(80));

    if let Some(failure) = error.downcast_ref::<PassFailure>() {
        println!(
            "  - {:<10} | {:<16} | {}",
            t!("report.status_failed", locale = locale).to_string().red(),
            failure.variant,
            failure.reason.label(locale)
        );
    }
}
