//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the harness,
//! including child-process handling, path resolution, and i18n support.
//!
//! 此模块为测试工具提供基础设施服务，
//! 包括子进程处理、路径解析和国际化支持。

pub mod command;
pub mod fs;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
