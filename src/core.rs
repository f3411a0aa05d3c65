//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the harness:
//! the variant table and settings, data models, planning of the matrix and
//! the execution of each pass.
//!
//! 此模块包含测试工具的核心功能：
//! 变体表与设置、数据模型、矩阵计划以及每一轮的执行。

pub mod config;
pub mod execution;
pub mod models;
pub mod planner;

// Re-exports
pub use config::{Settings, VARIANTS, Variant};
pub use execution::{run_all, run_variant};
pub use models::{PassResult, RunConfig};
