//! Ahead-of-time compiler invocation.

use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use tracing::debug;

use crate::error::CompileError;

/// One compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    /// Compiler configuration to build with.
    pub tsconfig: PathBuf,
    /// Directory that receives the compiled JavaScript.
    pub out_dir: PathBuf,
    /// Directory the compiler runs in (the project directory).
    pub working_dir: PathBuf,
}

/// Location of compiled output, ready for bundling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledOutput {
    pub dir: PathBuf,
}

/// Compiles an app ahead of time, before any bundling begins.
pub trait Compiler: Send + Sync {
    fn compile(&self, request: &CompileRequest) -> Result<CompiledOutput, CompileError>;
}

/// Runs the Angular `ngc` executable as a blocking child process.
///
/// There is no timeout: a hanging compiler blocks the run.
#[derive(Debug, Clone)]
pub struct NgcCompiler {
    executable: PathBuf,
}

impl NgcCompiler {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

impl Compiler for NgcCompiler {
    fn compile(&self, request: &CompileRequest) -> Result<CompiledOutput, CompileError> {
        let program = resolve_tool(&self.executable, &request.working_dir);
        debug!(program = %program.display(), tsconfig = %request.tsconfig.display(), "spawning compiler");

        let output = Command::new(&program)
            .arg("-p")
            .arg(&request.tsconfig)
            .arg("--outDir")
            .arg(&request.out_dir)
            .current_dir(&request.working_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CompileError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(CompileError::Failed {
                program,
                tsconfig: request.tsconfig.clone(),
                status: output.status,
                output: format!("{}{}", stdout, stderr),
            });
        }

        if !stdout.trim().is_empty() {
            debug!("{}", stdout.trim_end());
        }

        Ok(CompiledOutput {
            dir: request.out_dir.clone(),
        })
    }
}

/// Resolve a tool path against the project directory.
///
/// Bare names (`ngc`) are left alone so the OS looks them up on `PATH`;
/// anything with a directory part is taken relative to `working_dir`.
pub(crate) fn resolve_tool(tool: &Path, working_dir: &Path) -> PathBuf {
    if tool.is_absolute() || tool.components().count() == 1 {
        tool.to_path_buf()
    } else {
        working_dir.join(tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_tool() {
        let base = Path::new("/project");
        assert_eq!(resolve_tool(Path::new("ngc"), base), PathBuf::from("ngc"));
        assert_eq!(
            resolve_tool(Path::new("node_modules/.bin/ngc"), base),
            PathBuf::from("/project/node_modules/.bin/ngc")
        );
        assert_eq!(
            resolve_tool(Path::new("/usr/bin/ngc"), base),
            PathBuf::from("/usr/bin/ngc")
        );
    }

    #[test]
    fn test_missing_executable_is_spawn_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let compiler = NgcCompiler::new("node_modules/.bin/ngc");
        let request = CompileRequest {
            tsconfig: temp.path().join("src/tsconfig.worker.json"),
            out_dir: temp.path().join("_build/src"),
            working_dir: temp.path().to_path_buf(),
        };

        let err = compiler.compile(&request).unwrap_err();

        assert!(matches!(err, CompileError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_failure() {
        let temp = tempfile::TempDir::new().unwrap();
        let compiler = NgcCompiler::new("false");
        let request = CompileRequest {
            tsconfig: temp.path().join("src/tsconfig.worker.json"),
            out_dir: temp.path().join("_build/src"),
            working_dir: temp.path().to_path_buf(),
        };

        let err = compiler.compile(&request).unwrap_err();

        let CompileError::Failed {
            status, tsconfig, ..
        } = err
        else {
            panic!("expected compile failure");
        };
        assert!(!status.success());
        assert_eq!(tsconfig, request.tsconfig);
    }

    #[cfg(unix)]
    #[test]
    fn test_zero_exit_reports_out_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let compiler = NgcCompiler::new("true");
        let request = CompileRequest {
            tsconfig: PathBuf::from("src/tsconfig.worker.json"),
            out_dir: PathBuf::from("_build/src"),
            working_dir: temp.path().to_path_buf(),
        };

        let output = compiler.compile(&request).unwrap();

        assert_eq!(output.dir, PathBuf::from("_build/src"));
    }
}
