// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use memcached_matrix::core::execution::PassListener;
use memcached_matrix::models::{PassState, RunConfig};
use tempfile::{TempDir, tempdir};

/// Writes an executable shell script into `dir`.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
    let mut perms = fs::metadata(&path).expect("Failed to stat script").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to chmod script");
    path
}

/// A fixture directory holding a fake server and a fake test-runner.
///
/// The server records its pid and arguments, then sleeps until killed.
/// The test-runner records its arguments (one line per invocation) and exits
/// with the status chosen by the fixture.
pub struct Fixture {
    pub dir: TempDir,
    pub server: PathBuf,
    pub test_runner: PathBuf,
}

impl Fixture {
    /// Test-runner exits 0 for every variant.
    pub fn passing() -> Self {
        Self::with_runner_body("exit 0")
    }

    /// Test-runner exits 1 for every variant.
    pub fn failing() -> Self {
        Self::with_runner_body("exit 1")
    }

    /// Test-runner exits 1 only for the UDP variant.
    pub fn failing_on_udp() -> Self {
        Self::with_runner_body("case \" $* \" in *\" -U \"*) exit 1 ;; esac\nexit 0")
    }

    /// Test-runner blocks until killed.
    pub fn hanging() -> Self {
        Self::with_runner_body("exec sleep 30")
    }

    /// Test-runner exits 0; the server traps SIGTERM, writes a `graceful`
    /// marker and exits 0.
    pub fn graceful_server() -> Self {
        Self::new(
            "trap 'echo term > \"$(dirname \"$0\")/graceful\"; exit 0' TERM\n\
             while true; do sleep 0.05; done",
            "exit 0",
        )
    }

    pub fn with_runner_body(body: &str) -> Self {
        Self::new("exec sleep 600", body)
    }

    /// `server_body` runs after the server has recorded its pid and
    /// arguments; `runner_body` runs once the runner has seen its server.
    pub fn new(server_body: &str, runner_body: &str) -> Self {
        let dir = tempdir().expect("Failed to create temporary directory");
        let root = dir.path().display().to_string();

        let server = write_script(
            dir.path(),
            "fake-memcached",
            &format!(
                "echo $$ >> '{root}/server.pids'\necho \"$*\" >> '{root}/server.args'\n{server_body}"
            ),
        );
        // The runner waits (up to ~5s) until the server of its own pass has
        // recorded its pid, so assertions on pids never race the spawn.
        let test_runner = write_script(
            dir.path(),
            "test_memcached.py",
            &format!(
                "echo \"$*\" >> '{root}/runner.args'\n\
                 n=$(wc -l < '{root}/runner.args')\n\
                 i=0\n\
                 while [ \"$(cat '{root}/server.pids' 2>/dev/null | wc -l)\" -lt \"$n\" ] && [ $i -lt 100 ]; do sleep 0.05; i=$((i+1)); done\n\
                 {runner_body}"
            ),
        );

        Self {
            dir,
            server,
            test_runner,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// True once a server has handled SIGTERM (see [`Fixture::graceful_server`]).
    pub fn server_shut_down_gracefully(&self) -> bool {
        self.path().join("graceful").exists()
    }

    /// Pids of every server the harness spawned, in spawn order.
    pub fn server_pids(&self) -> Vec<u32> {
        read_lines(&self.path().join("server.pids"))
            .iter()
            .map(|line| line.trim().parse().expect("pid"))
            .collect()
    }

    /// Arguments the server was started with, one entry per spawn.
    pub fn server_args(&self) -> Vec<String> {
        read_lines(&self.path().join("server.args"))
    }

    /// Arguments the test-runner received, one entry per invocation.
    pub fn runner_args(&self) -> Vec<String> {
        read_lines(&self.path().join("runner.args"))
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => content.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}

/// True if a process with this pid still exists (zombies included).
pub fn process_exists(pid: u32) -> bool {
    Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// True if the pid names a process that has not exited yet. Zombies count
/// as exited; this reads `/proc` where available.
pub fn process_running(pid: u32) -> bool {
    match fs::read_to_string(format!("/proc/{pid}/stat")) {
        Ok(stat) => stat
            .rsplit_once(')')
            .and_then(|(_, rest)| rest.trim_start().chars().next())
            .map(|state| state != 'Z' && state != 'X')
            .unwrap_or(false),
        Err(_) if Path::new("/proc/self").exists() => false,
        Err(_) => process_exists(pid),
    }
}

/// Records every lifecycle event of every pass.
#[derive(Debug, Default)]
pub struct RecordingListener {
    pub events: Vec<(&'static str, PassState)>,
    pub cleanup_failures: usize,
}

impl RecordingListener {
    pub fn count(&self, state: PassState) -> usize {
        self.events.iter().filter(|(_, s)| *s == state).count()
    }

    pub fn states_for(&self, variant: &str) -> Vec<PassState> {
        self.events
            .iter()
            .filter(|(name, _)| *name == variant)
            .map(|(_, state)| *state)
            .collect()
    }

    pub fn variants_started(&self) -> Vec<&'static str> {
        self.events
            .iter()
            .filter(|(_, state)| *state == PassState::ServerStarting)
            .map(|(name, _)| *name)
            .collect()
    }
}

impl PassListener for RecordingListener {
    fn transition(&mut self, config: &RunConfig, state: PassState) {
        self.events.push((config.variant.name, state));
    }

    fn cleanup_failed(&mut self, _config: &RunConfig, _error: &std::io::Error) {
        self.cleanup_failures += 1;
    }
}
