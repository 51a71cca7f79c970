use crate::config::Config;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge une configuration depuis un support.
    fn load(&self) -> anyhow::Result<Config>;
    /// Sauvegarde de manière atomique.
    fn save(&self, config: &Config) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Config> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let config: Config = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn save(&self, config: &Config) -> anyhow::Result<()> {
        config.validate()?;
        let json = serde_json::to_vec_pretty(config)?;
        write_atomic(&self.path, &json)
    }
}

/// Écrit via un fichier temporaire voisin puis renomme.
pub fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}
