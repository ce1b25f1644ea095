#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    ffi::OsString,
    fmt::{self, Display},
    path::Path,
    str::FromStr,
};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{
    pipeline::AnalysisError,
    util::{gcc_path, gxx_path, javac_path, python_path},
};

/// The closed set of languages the pipeline accepts.
///
/// Each variant carries its own toolchain command, source-file suffix, and
/// diagnostic grammar selection; anything else is rejected as
/// [`AnalysisError::UnsupportedLanguage`] before a process is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// C++, compiled with g++.
    Cpp,
    /// C, compiled with gcc.
    C,
    /// Python, syntax-checked with `python -m py_compile`.
    Python,
    /// Java, compiled with javac.
    Java,
}

impl Language {
    /// Every supported language, in display order.
    pub const ALL: [Language; 4] = [Language::Cpp, Language::C, Language::Python, Language::Java];

    /// The canonical tag callers use to name this language.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Python => "python",
            Language::Java => "java",
        }
    }

    /// Source-file suffix, including the dot.
    pub fn suffix(&self) -> &'static str {
        match self {
            Language::Cpp => ".cpp",
            Language::C => ".c",
            Language::Python => ".py",
            Language::Java => ".java",
        }
    }

    /// Resolves the toolchain binary for this language from the PATH.
    pub fn toolchain_path(&self) -> Result<OsString> {
        match self {
            Language::Cpp => gxx_path(),
            Language::C => gcc_path(),
            Language::Python => python_path(),
            Language::Java => javac_path(),
        }
    }

    /// Whether diagnostics come from an interpreter traceback rather than
    /// `path:line:column:` compiler lines.
    pub fn interpreted(&self) -> bool {
        matches!(self, Language::Python)
    }

    /// Arguments for one toolchain invocation over `source`.
    ///
    /// `artifact` is where the compiled binary lands for the C family; Java
    /// class files go next to the source, Python produces no artifact.
    pub(crate) fn command_args(&self, source: &Path, artifact: &Path) -> Vec<OsString> {
        match self {
            Language::Cpp => vec![
                OsString::from("-Wall"),
                OsString::from("-Wextra"),
                OsString::from("-std=c++17"),
                source.as_os_str().to_owned(),
                OsString::from("-o"),
                artifact.as_os_str().to_owned(),
            ],
            Language::C => vec![
                OsString::from("-Wall"),
                OsString::from("-Wextra"),
                source.as_os_str().to_owned(),
                OsString::from("-o"),
                artifact.as_os_str().to_owned(),
            ],
            Language::Python => vec![
                OsString::from("-m"),
                OsString::from("py_compile"),
                source.as_os_str().to_owned(),
            ],
            Language::Java => {
                let out_dir = source
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| source.to_path_buf());
                vec![
                    OsString::from("-d"),
                    out_dir.into_os_string(),
                    source.as_os_str().to_owned(),
                ]
            }
        }
    }
}

impl FromStr for Language {
    type Err = AnalysisError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "cpp" | "c++" | "cxx" => Ok(Language::Cpp),
            "c" => Ok(Language::C),
            "python" | "py" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            other => Err(AnalysisError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
