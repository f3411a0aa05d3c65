//! # Memcached Matrix Library / Memcached 矩阵库
//!
//! This library drives the memcached test suite across a small, fixed matrix of
//! transport variants. For every variant it spawns the server under test, runs
//! the external test-runner against it and always terminates the server again,
//! whatever the outcome of the tests.
//!
//! 此库针对一组固定的传输变体运行 memcached 测试套件。
//! 对于每个变体，它都会启动被测服务器、运行外部测试脚本，
//! 并且无论测试结果如何都会终止服务器。
//!
//! ## Modules / 模块
//!
//! - `core` - Variants, settings, planning and the pass execution engine
//! - `infra` - Process and path helpers
//! - `reporting` - Console output for lifecycle events and summaries
//! - `cli` - Command-line interface and the `run` command
//!
//! - `core` - 变体、设置、计划以及执行引擎
//! - `infra` - 进程与路径辅助工具
//! - `reporting` - 生命周期事件与摘要的控制台输出
//! - `cli` - 命令行接口与 `run` 命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use self::core::config;
pub use self::core::execution;
pub use self::core::models;

/// Picks the output language and activates it for `t!`.
///
/// An explicit choice wins. Otherwise the system locale is used, first as a
/// full tag (e.g. "zh-CN"), then as a bare language code (e.g. "en" from
/// "en-US"), and finally the default language ("en").
pub fn init(explicit: Option<&str>) -> String {
    let requested = explicit
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());

    let lang = resolve_locale(&requested);
    rust_i18n::set_locale(&lang);
    lang
}

/// Maps a requested locale onto one of the bundled translations.
pub fn resolve_locale(requested: &str) -> String {
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&requested) {
        return requested.to_string();
    }
    requested
        .split(['-', '_'])
        .next()
        .and_then(|code| available_locales.iter().find(|l| l.split('-').next() == Some(code)))
        .map(|l| l.to_string())
        .unwrap_or_else(|| "en".to_string())
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
