//! # File System Operations Module / 文件系统操作模块
//!
//! Path helpers: shell-style expansion of paths from the settings file and
//! the default location of the test-runner script. Command-line paths have
//! already been through the operator's shell and are used as given.
//!
//! 路径辅助函数：对设置文件中的路径进行 shell 风格展开，以及测试脚本的默认位置。
//! 命令行路径已经由操作者的 shell 处理过，按原样使用。

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use crate::core::config::DEFAULT_TEST_RUNNER;
use crate::infra::t;

/// Expands `~` and environment variables in a path read from the settings
/// file. The path is not required to exist. A path that is not valid UTF-8
/// is returned unchanged.
///
/// # Arguments
/// * `path` - The path as written in the settings file
///
/// # Returns
/// The expanded path, or an error naming the path if a variable is undefined
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let Some(raw) = path.to_str() else {
        return Ok(path.to_path_buf());
    };
    let expanded = shellexpand::full(raw)
        .with_context(|| t!("path_expand_failed", path = path.display()).to_string())?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// The test-runner script that ships next to the harness executable.
pub fn default_test_runner() -> Result<PathBuf> {
    let exe = env::current_exe().with_context(|| t!("current_exe_failed").to_string())?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(DEFAULT_TEST_RUNNER))
}
