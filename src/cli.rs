// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::core::config::{self, Settings};
use crate::core::models::PassResult;
use crate::infra::t;

pub mod commands;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
pub fn pre_parse_language(args: &[String]) -> Option<String> {
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang="))
        .map(str::to_string)
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("memcached-matrix")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("memcached")
                .long("memcached")
                .help(t!("arg_memcached", locale = locale).to_string())
                .value_name("PATH")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("fast")
                .long("fast")
                .help(t!("arg_fast", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("test-runner")
                .long("test-runner")
                .help(t!("arg_test_runner", locale = locale).to_string())
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("smp")
                .long("smp")
                .help(t!("arg_smp", locale = locale).to_string())
                .value_name("N")
                .value_parser(clap::value_parser!(u32).range(1..))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("arg_config", locale = locale).to_string())
                .value_name("CONFIG")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
}

/// Flags of the `run` command after clap has validated them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    pub memcached: PathBuf,
    pub fast: bool,
    pub test_runner: Option<PathBuf>,
    pub smp: Option<u32>,
    pub config: Option<PathBuf>,
}

impl RunArgs {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            memcached: matches
                .get_one::<PathBuf>("memcached")
                .cloned()
                .unwrap_or_default(), // Required; clap rejects its absence
            fast: matches.get_flag("fast"),
            test_runner: matches.get_one::<PathBuf>("test-runner").cloned(),
            smp: matches.get_one::<u32>("smp").copied(),
            config: matches.get_one::<PathBuf>("config").cloned(),
        }
    }
}

pub async fn run() -> Result<Vec<PassResult>> {
    // Pre-parse language so help and usage errors are already localised.
    let raw_args: Vec<String> = env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let language = crate::init(pre_parse_language(&raw_args).as_deref());

    let matches = build_cli(&language).get_matches();
    let args = RunArgs::from_matches(&matches);

    let settings = match &args.config {
        Some(path) => config::load_settings(path)?,
        None => Settings::default(),
    };

    // A language from the settings file applies only when none was given.
    let language = match (matches.get_one::<String>("lang"), &settings.language) {
        (None, Some(lang)) => crate::init(Some(lang)),
        _ => language,
    };

    commands::run::execute(args, settings, &language).await
}
