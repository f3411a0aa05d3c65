//! # Build Script for Locale Validation / 本地化校验构建脚本
//!
//! Parses every `.toml` file under `locales/` and checks that each one defines
//! exactly the keys of the base language file (`en.toml`). Nested tables are
//! flattened into dotted keys, the same way `rust-i18n` resolves them, so a
//! missing `run.server_started` in any translation fails the build instead of
//! silently falling back at runtime.
//!
//! 解析 `locales/` 下的每个 `.toml` 文件，并检查每个文件是否与基础语言文件
//! （`en.toml`）定义完全相同的键。嵌套表会被展开为点分隔的键。

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Represents the structure of a translation file.
/// 表示翻译文件的结构。
#[derive(Debug, Deserialize)]
struct Translations(toml::Table);

/// Collects every leaf key of a translation table as a dotted path.
///
/// 将翻译表的每个叶子键收集为点分隔路径。
fn flatten_keys(prefix: &str, table: &toml::Table, keys: &mut BTreeSet<String>) {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::Table(nested) => flatten_keys(&full_key, nested, keys),
            _ => {
                keys.insert(full_key);
            }
        }
    }
}

fn load_keys(path: &Path) -> BTreeSet<String> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e));
    let translations: Translations = toml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse {:?}: {}", path, e));

    let mut keys = BTreeSet::new();
    flatten_keys("", &translations.0, &mut keys);
    keys
}

fn main() -> std::io::Result<()> {
    let locales_dir = Path::new("locales");

    let lang_files: Vec<PathBuf> = fs::read_dir(locales_dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml"))
        .collect();

    let base_keys = load_keys(&locales_dir.join("en.toml"));

    let mut problems = Vec::new();
    for path in &lang_files {
        let keys = load_keys(path);
        for missing in base_keys.difference(&keys) {
            problems.push(format!("{}: missing key '{}'", path.display(), missing));
        }
        for extra in keys.difference(&base_keys) {
            problems.push(format!("{}: key '{}' not present in en.toml", path.display(), extra));
        }
    }

    if !problems.is_empty() {
        panic!("Locale files are out of sync:\n  {}", problems.join("\n  "));
    }

    println!("cargo:rerun-if-changed=locales/");
    Ok(())
}
