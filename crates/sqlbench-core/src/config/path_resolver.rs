use anyhow::Context;
use std::path::{Path, PathBuf};

pub const SCHEMA_FILE: &str = "setup.sql";
pub const SEED_FILE: &str = "setupData.sql";
pub const CONFIG_FILE: &str = "config.json";
pub const DATABASE_FILE: &str = "aidb.sqlite";

/// Resolves the run's input and output files against one base directory.
#[derive(Clone, Debug)]
pub struct PathResolver {
    base_dir: PathBuf,
}

impl PathResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Base directory of the running executable.
    pub fn program_dir() -> anyhow::Result<Self> {
        let exe = std::env::current_exe().context("failed to locate executable")?;
        let dir = exe.parent().unwrap_or(Path::new(".")).to_path_buf();
        Ok(Self::new(dir))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn schema(&self) -> PathBuf {
        self.resolve(SCHEMA_FILE)
    }

    pub fn seed(&self) -> PathBuf {
        self.resolve(SEED_FILE)
    }

    pub fn config(&self) -> PathBuf {
        self.resolve(CONFIG_FILE)
    }

    pub fn database(&self) -> PathBuf {
        self.resolve(DATABASE_FILE)
    }

    /// Absolute paths pass through, relative ones are joined to the base.
    pub fn resolve(&self, p: impl AsRef<Path>) -> PathBuf {
        let p = p.as_ref();
        if p.is_absolute() {
            return p.to_path_buf();
        }
        self.join_clean(p)
    }

    fn join_clean(&self, rel: &Path) -> PathBuf {
        let joined = self.base_dir.join(rel);

        let mut out = PathBuf::new();
        for c in joined.components() {
            use std::path::Component::*;
            match c {
                CurDir => {}
                ParentDir => {
                    out.pop();
                }
                RootDir | Prefix(_) | Normal(_) => out.push(c.as_os_str()),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_fixed_names_under_base() {
        let r = PathResolver::new("/srv/bench");
        assert_eq!(r.schema(), PathBuf::from("/srv/bench/setup.sql"));
        assert_eq!(r.seed(), PathBuf::from("/srv/bench/setupData.sql"));
        assert_eq!(r.config(), PathBuf::from("/srv/bench/config.json"));
        assert_eq!(r.database(), PathBuf::from("/srv/bench/aidb.sqlite"));
    }

    #[test]
    fn cleans_dot_segments() {
        let r = PathResolver::new("/srv/bench/bin");
        assert_eq!(r.resolve("../data/./x.sql"), PathBuf::from("/srv/bench/data/x.sql"));
        assert_eq!(r.resolve("/abs/y.sql"), PathBuf::from("/abs/y.sql"));
    }
}
