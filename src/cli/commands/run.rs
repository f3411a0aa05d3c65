//! # Run Command Module / 运行命令模块
//!
//! This module implements the command that resolves the settings, plans the
//! variant matrix and runs it against the server under test.
//!
//! 此模块实现了解析设置、规划变体矩阵并针对被测服务器运行矩阵的命令。

use anyhow::{Context, Result};
use colored::*;
use std::io;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    cli::RunArgs,
    core::{
        config::{DEFAULT_SMP, Settings, VARIANTS},
        execution::run_all,
        models::PassResult,
        planner::{self, MatrixSettings},
    },
    infra::{fs, t},
    reporting::console::{ConsoleListener, print_failure, print_summary},
};

/// Executes the matrix with the provided arguments.
///
/// # Arguments
/// * `args` - Validated command-line flags
/// * `settings` - Values from the optional settings file
/// * `locale` - Language for console output
///
/// # Returns
/// The results of all passes, or the first failure
pub async fn execute(args: RunArgs, settings: Settings, locale: &str) -> Result<Vec<PassResult>> {
    let matrix_settings = resolve_settings(args, settings)?;
    let configs = planner::plan_matrix(&matrix_settings, VARIANTS)?;

    println!(
        "{}",
        t!(
            "run.matrix_banner",
            locale = locale,
            count = configs.len(),
            server = matrix_settings.server.display()
        )
        .cyan()
    );

    let stop_token = setup_signal_handler(locale)?;
    let mut listener = ConsoleListener::new(locale);

    match run_all(&configs, &mut listener, &stop_token).await {
        Ok(results) => {
            print_summary(&results, locale);
            Ok(results)
        }
        Err(e) => {
            print_failure(&e, locale);
            Err(e)
        }
    }
}

/// Merges command-line flags over the settings file.
/// Flags win; the settings file fills the gaps; built-in defaults come last.
///
/// Paths given as flags are used exactly as given, so a bad `--memcached`
/// only shows up when the server is spawned. Only the settings-file
/// `test_runner` goes through `~`/variable expansion.
pub fn resolve_settings(args: RunArgs, settings: Settings) -> Result<MatrixSettings> {
    let test_runner = match (args.test_runner, settings.test_runner) {
        (Some(path), _) => path,
        (None, Some(path)) => fs::expand_path(&path)?,
        (None, None) => fs::default_test_runner()?,
    };

    Ok(MatrixSettings {
        server: args.memcached,
        test_runner,
        smp: args.smp.or(settings.smp).unwrap_or(DEFAULT_SMP),
        fast: args.fast || settings.fast,
    })
}

/// Installs the Ctrl-C listener and returns the token it cancels.
///
/// The listener is registered before this returns, so an interrupt that
/// arrives while the first server is starting is already routed through the
/// token. It stays installed for the whole run; repeated interrupts only
/// cancel the same token again.
fn setup_signal_handler(locale: &str) -> Result<CancellationToken> {
    let mut interrupts =
        listen_for_interrupts().with_context(|| t!("run.signal_failed").to_string())?;
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        while interrupts.recv().await.is_some() {
            println!("\n{}", t!("run.interrupted", locale = &locale).yellow());
            token_clone.cancel();
        }
    });

    Ok(token)
}

#[cfg(unix)]
fn listen_for_interrupts() -> io::Result<signal::unix::Signal> {
    signal::unix::signal(signal::unix::SignalKind::interrupt())
}

#[cfg(windows)]
fn listen_for_interrupts() -> io::Result<signal::windows::CtrlC> {
    signal::windows::ctrl_c()
}
