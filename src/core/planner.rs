// src/core/planner.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::config::Variant;
use crate::core::models::RunConfig;
use crate::infra::t;

/// Global inputs shared by every pass of the matrix.
#[derive(Debug, Clone)]
pub struct MatrixSettings {
    pub server: PathBuf,
    pub test_runner: PathBuf,
    pub smp: u32,
    pub fast: bool,
}

/// The server command line: executable followed by its startup arguments.
pub fn server_command_line(server: &Path, server_args: &[OsString]) -> Vec<OsString> {
    let mut cmdline = vec![server.as_os_str().to_os_string()];
    cmdline.extend(server_args.iter().cloned());
    cmdline
}

/// The test-runner command line: script, then the variant arguments, then
/// `--fast` when requested.
pub fn test_runner_command_line(test_runner: &Path, variant_args: &[&str], fast: bool) -> Vec<OsString> {
    let mut cmdline = vec![test_runner.as_os_str().to_os_string()];
    cmdline.extend(variant_args.iter().map(OsString::from));
    if fast {
        cmdline.push(OsString::from("--fast"));
    }
    cmdline
}

/// Startup arguments carrying the concurrency hint.
pub fn server_args(smp: u32) -> Vec<OsString> {
    vec![OsString::from(format!("--smp={smp}"))]
}

/// Builds one `RunConfig` per variant, keeping the declared order.
pub fn plan_matrix(settings: &MatrixSettings, variants: &[Variant]) -> Result<Vec<RunConfig>> {
    if variants.is_empty() {
        anyhow::bail!("{}", t!("no_variants"));
    }

    Ok(variants
        .iter()
        .map(|variant| RunConfig {
            server: settings.server.clone(),
            server_args: server_args(settings.smp),
            test_runner: settings.test_runner.clone(),
            fast: settings.fast,
            variant: *variant,
        })
        .collect())
}

impl RunConfig {
    pub fn server_command_line(&self) -> Vec<OsString> {
        server_command_line(&self.server, &self.server_args)
    }

    pub fn test_runner_command_line(&self) -> Vec<OsString> {
        test_runner_command_line(&self.test_runner, self.variant.args, self.fast)
    }
}
