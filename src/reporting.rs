//! # Reporting Module / 报告模块
//!
//! This module prints pass lifecycle events and the final matrix summary to
//! the console, with colour and internationalization support.
//!
//! 此模块将轮次生命周期事件和最终矩阵摘要打印到控制台，支持颜色与国际化。

pub mod console;

// Re-export common reporting functions
pub use console::{ConsoleListener, print_failure, print_summary};
