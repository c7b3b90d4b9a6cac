//! Artifact directories for transcripts and audio

use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ArtifactStorage {
    transcripts_dir: PathBuf,
    audio_dir: PathBuf,
}

impl ArtifactStorage {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            transcripts_dir: data_dir.join("transcripts"),
            audio_dir: data_dir.join("audio"),
        }
    }

    /// Create both artifact directories; safe to call repeatedly
    pub fn ensure(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.transcripts_dir)?;
        std::fs::create_dir_all(&self.audio_dir)?;
        Ok(())
    }

    pub fn transcripts_dir(&self) -> &Path {
        &self.transcripts_dir
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    pub fn audio_temp_dir(&self) -> PathBuf {
        self.audio_dir.join("tmp")
    }

    /// Create the audio scratch directory if needed and return it
    pub async fn ensure_audio_temp_dir(&self) -> io::Result<PathBuf> {
        let dir = self.audio_temp_dir();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(dir)
    }
}
