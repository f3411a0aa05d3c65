//! # Configuration Module / 配置模块
//!
//! Defines the fixed variant table and the optional settings file.
//!
//! 定义固定的变体表以及可选的设置文件。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::infra::t;

/// Default concurrency hint handed to the server.
pub const DEFAULT_SMP: u32 = 2;

/// File name of the test-runner script looked up next to the harness binary.
pub const DEFAULT_TEST_RUNNER: &str = "test_memcached.py";

/// A named matrix configuration selecting a transport mode.
/// `args` are appended to the test-runner command line, before `--fast`.
///
/// 一个命名的矩阵配置，用于选择传输模式。
/// `args` 会被追加到测试脚本命令行中，位于 `--fast` 之前。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    /// Name used in console output and summaries.
    /// 用于控制台输出和摘要的名称。
    pub name: &'static str,
    /// Extra arguments selecting the transport.
    /// 选择传输方式的额外参数。
    pub args: &'static [&'static str],
}

/// The matrix, in execution order. Adding a transport is a new row here.
///
/// 矩阵，按执行顺序排列。添加一种传输方式只需在此处新增一行。
pub const VARIANTS: &[Variant] = &[
    Variant {
        name: "default",
        args: &[],
    },
    Variant {
        name: "udp",
        args: &["-U"],
    },
];

/// Settings read from an optional TOML file. Every field may be omitted;
/// command-line flags take precedence over anything set here.
///
/// 从可选 TOML 文件读取的设置。每个字段都可以省略；
/// 命令行参数优先于此处的设置。
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Output language (e.g. "en", "zh-CN").
    /// 输出语言（例如 "en", "zh-CN"）。
    #[serde(default)]
    pub language: Option<String>,
    /// Path of the test-runner script.
    /// 测试脚本路径。
    #[serde(default)]
    pub test_runner: Option<PathBuf>,
    /// Concurrency hint for the server.
    /// 服务器的并发提示。
    #[serde(default)]
    pub smp: Option<u32>,
    /// Run only the fast subset of tests.
    /// 仅运行快速测试子集。
    #[serde(default)]
    pub fast: bool,
}

impl Settings {
    /// Parses settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Loads the settings file at `path`.
///
/// 加载位于 `path` 的设置文件。
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| t!("config_read_failed", path = path.display()).to_string())?;
    Settings::from_toml(&content)
        .with_context(|| t!("config_parse_failed", path = path.display()).to_string())
}
