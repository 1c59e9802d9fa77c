use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use ssil_config::LockedProfile;
use ssil_core::SsilError;
use ssil_runtime::run_engine_paths;
use tracing::debug;

/// File name of the engine binary, without platform suffix.
pub const ENGINE_BIN: &str = "ssil";

/// One engine invocation: `trace` in, `out` written, parameters fixed by `profile`.
pub trait EngineRunner {
    /// Checks that must pass before any directory is touched.
    fn preflight(&self) -> Result<(), SsilError> {
        Ok(())
    }

    fn run(&self, trace: &Path, out: &Path, profile: &LockedProfile) -> Result<(), SsilError>;

    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Separate OS process per run
// ---------------------------------------------------------------------------

/// Runs the `ssil` engine binary as a child process with a pinned locale and
/// timezone. Only the profile's flags are passed.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    pub exe: PathBuf,
}

impl ProcessRunner {
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into() }
    }

    /// The engine binary installed next to the current executable.
    pub fn sibling_of_current_exe() -> Result<Self, SsilError> {
        let me = std::env::current_exe()
            .map_err(|e| SsilError::failure(format!("locate current executable: {e}")))?;
        let dir = me
            .parent()
            .ok_or_else(|| SsilError::failure(format!("no parent dir for {}", me.display())))?;
        Ok(Self::new(dir.join(format!("{ENGINE_BIN}{}", std::env::consts::EXE_SUFFIX))))
    }

    fn command(&self, trace: &Path, out: &Path, profile: &LockedProfile) -> Command {
        let mut cmd = Command::new(&self.exe);
        cmd.arg("run")
            .arg("--in")
            .arg(trace)
            .arg("--out")
            .arg(out)
            .args(profile.overrides.to_cli_args())
            .env("LC_ALL", "C")
            .env("LANG", "C")
            .env("TZ", "UTC");
        cmd
    }
}

impl EngineRunner for ProcessRunner {
    fn preflight(&self) -> Result<(), SsilError> {
        if self.exe.exists() {
            Ok(())
        } else {
            Err(SsilError::MissingFile(self.exe.clone()))
        }
    }

    fn run(&self, trace: &Path, out: &Path, profile: &LockedProfile) -> Result<(), SsilError> {
        let mut cmd = self.command(trace, out, profile);
        debug!(exe = %self.exe.display(), out = %out.display(), "spawning engine");

        let output = cmd.output().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                SsilError::MissingFile(self.exe.clone())
            } else {
                SsilError::failure(format!("spawn '{}': {e}", self.exe.display()))
            }
        })?;

        if !output.status.success() {
            // Surface the engine's own diagnostics; stdout stays reserved for the result line.
            let mut err = io::stderr().lock();
            let _ = err.write_all(&output.stdout);
            let _ = err.write_all(&output.stderr);
            return Err(SsilError::failure(format!(
                "engine subprocess failed ({}): {} run --out {}",
                output.status,
                self.exe.display(),
                out.display()
            )));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "process"
    }
}

// ---------------------------------------------------------------------------
// Same process
// ---------------------------------------------------------------------------

/// Calls the engine pipeline directly. Isolation is by output directory only.
#[derive(Debug, Clone, Copy, Default)]
pub struct InProcessRunner;

impl EngineRunner for InProcessRunner {
    fn run(&self, trace: &Path, out: &Path, profile: &LockedProfile) -> Result<(), SsilError> {
        run_engine_paths(trace, out, &profile.params()).map(|_| ())
    }

    fn name(&self) -> &'static str {
        "in-process"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_command_carries_only_locked_flags_and_pinned_env() {
        let r = ProcessRunner::new("/opt/bin/ssil");
        let cmd = r.command(Path::new("t.csv"), Path::new("o.csv"), &LockedProfile::CAPSULE_V1);

        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(&args[..5], ["run", "--in", "t.csv", "--out", "o.csv"]);
        assert_eq!(args.len(), 5 + 18);
        assert!(!args.iter().any(|a| a == "--eta"));

        let envs: Vec<(String, String)> = cmd
            .get_envs()
            .filter_map(|(k, v)| Some((k.to_string_lossy().into_owned(), v?.to_string_lossy().into_owned())))
            .collect();
        assert!(envs.contains(&("LC_ALL".into(), "C".into())));
        assert!(envs.contains(&("LANG".into(), "C".into())));
        assert!(envs.contains(&("TZ".into(), "UTC".into())));
    }

    #[test]
    fn missing_engine_binary_is_missing_file() {
        let r = ProcessRunner::new("/definitely/not/here/ssil");
        assert_eq!(r.preflight().unwrap_err().exit_code(), 3);
    }
}
