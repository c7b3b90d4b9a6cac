//! Generation library backed by an external program
//!
//! The program receives the [`GenerationCall`] as JSON on stdin and prints the
//! artifact path as its last non-empty stdout line.

use crate::error::GenerationError;
use crate::library::{GenerationCall, GenerationLibrary};
use async_trait::async_trait;
use duet_core::GeneratorConfig;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

// Keeps error bodies readable when a generator dumps a traceback
const MAX_STDERR_CHARS: usize = 2000;

pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    /// Whether the program can be resolved, either as a path or on `PATH`
    pub fn is_available(&self) -> bool {
        let program = Path::new(&self.program);
        if program.components().count() > 1 {
            return program.is_file();
        }

        std::env::var_os("PATH")
            .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
            .unwrap_or(false)
    }
}

fn truncate(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX_STDERR_CHARS {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(MAX_STDERR_CHARS).collect();
    out.push_str("...");
    out
}

#[async_trait]
impl GenerationLibrary for CommandGenerator {
    async fn generate(&self, call: GenerationCall) -> Result<PathBuf, GenerationError> {
        let payload = serde_json::to_vec(&call)?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Scoped to the child so concurrent calls never share a temp dir
        if let Some(temp_dir) = &call.temp_dir {
            cmd.env("TMPDIR", temp_dir);
        }

        debug!(program = %self.program, operation = call.operation(), "Spawning generator");
        let mut child = cmd.spawn().map_err(|source| GenerationError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        // Drain stdout and stderr while the payload is written; a child that
        // logs before reading stdin blocks once its pipe buffer is full
        let stdin = child.stdin.take();
        let write_payload = async move {
            if let Some(mut stdin) = stdin {
                // A generator may exit without reading its input
                if let Err(e) = stdin.write_all(&payload).await {
                    if e.kind() != std::io::ErrorKind::BrokenPipe {
                        return Err(e);
                    }
                }
            }
            Ok(())
        };

        let (written, output) = tokio::join!(write_payload, child.wait_with_output());
        let output = output?;
        written?;

        if !output.status.success() {
            let stderr = truncate(&String::from_utf8_lossy(&output.stderr));
            warn!(program = %self.program, status = %output.status, "Generator failed");
            return Err(GenerationError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .map(PathBuf::from)
            .ok_or(GenerationError::EmptyOutput)
    }

    fn name(&self) -> &str {
        &self.program
    }
}
