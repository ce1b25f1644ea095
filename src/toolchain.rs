#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use tokio::time::timeout;
use tracing::warn;
use uuid::Uuid;

use crate::{constants::COMPILE_TIMEOUT, language::Language, process::run_collect};

/// Captured result of one toolchain run over a submission.
///
/// A failed compile is a normal negative result, not an error: `succeeded`
/// is false and `stderr` carries the diagnostics (or a synthetic timeout
/// message).
#[derive(Debug, Clone)]
pub struct CompileOutcome {
    /// Whether the toolchain exited successfully.
    pub succeeded: bool,
    /// Contents of stdout, lossily decoded.
    pub stdout: String,
    /// Contents of stderr, lossily decoded.
    pub stderr: String,
}

/// Errors that prevent a toolchain from being invoked at all.
///
/// Timeouts and non-zero exits are *not* represented here; they are reported
/// through [`CompileOutcome`].
#[derive(thiserror::Error, Debug)]
pub enum ToolchainError {
    /// The toolchain binary could not be resolved or the process could not
    /// be spawned or awaited.
    #[error("could not invoke the {language} toolchain: {cause}")]
    Invocation {
        /// Language whose toolchain failed.
        language: Language,
        /// Underlying resolution or spawn failure.
        cause: anyhow::Error,
    },
    /// The scratch file for the submission could not be staged.
    #[error("could not stage a scratch file for {language}: {cause}")]
    Scratch {
        /// Language being staged.
        language: Language,
        /// Underlying filesystem failure.
        cause: std::io::Error,
    },
}

/// A per-call scratch directory holding the submission source and any
/// artifacts the toolchain produces.
///
/// The directory name embeds a fresh UUID so concurrent calls never share
/// paths. Everything under it is deleted on drop, on every exit path.
struct ScratchSpace {
    /// The scratch directory itself.
    dir: PathBuf,
    /// Path of the staged source file inside `dir`.
    source: PathBuf,
    /// Path where a compiled binary artifact should land inside `dir`.
    artifact: PathBuf,
}

impl ScratchSpace {
    /// Stages `code` into a freshly created scratch directory.
    fn stage(code: &str, language: Language) -> std::io::Result<Self> {
        let dir = std::env::temp_dir().join(format!("ddx-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir)?;

        let source = dir.join(format!("snippet{}", language.suffix()));
        let artifact = dir.join("snippet.out");
        fs::write(&source, code)?;

        Ok(Self {
            dir,
            source,
            artifact,
        })
    }

    /// Path of the staged source file.
    fn source(&self) -> &Path {
        &self.source
    }

    /// Path where the compiled binary artifact should land.
    fn artifact(&self) -> &Path {
        &self.artifact
    }

    /// The scratch directory, used as the toolchain working directory.
    fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Drop for ScratchSpace {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_dir_all(&self.dir) {
            warn!(dir = %self.dir.display(), %err, "failed to clean up scratch directory");
        }
    }
}

/// Runs the toolchain for `language` over `code` once, bounded by
/// [`COMPILE_TIMEOUT`].
///
/// The submission is written to a uniquely named scratch file which is
/// deleted before this function returns, along with any produced artifact.
/// A timeout is reported as `succeeded = false` with a synthetic message.
/// No retries are attempted.
pub async fn compile(code: &str, language: Language) -> Result<CompileOutcome, ToolchainError> {
    let program = language
        .toolchain_path()
        .map_err(|cause| ToolchainError::Invocation { language, cause })?;

    let scratch = ScratchSpace::stage(code, language)
        .map_err(|cause| ToolchainError::Scratch { language, cause })?;

    let args = language.command_args(scratch.source(), scratch.artifact());

    match timeout(COMPILE_TIMEOUT, run_collect(&program, &args, Some(scratch.dir()))).await {
        Ok(Ok(collected)) => Ok(CompileOutcome {
            succeeded: collected.status.success(),
            stdout: String::from_utf8_lossy(&collected.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&collected.stderr).into_owned(),
        }),
        Ok(Err(cause)) => Err(ToolchainError::Invocation { language, cause }),
        Err(_elapsed) => {
            warn!(%language, "toolchain run exceeded {}s", COMPILE_TIMEOUT.as_secs());
            Ok(CompileOutcome {
                succeeded: false,
                stdout: String::new(),
                stderr: format!(
                    "toolchain timed out after {} seconds",
                    COMPILE_TIMEOUT.as_secs()
                ),
            })
        }
    }
}
