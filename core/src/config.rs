use std::fmt;
use std::str::FromStr;

/// How similarity rows are served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    /// Materialize the full n x n matrix at setup.
    #[default]
    Dense,
    /// Keep an inverted index and score one row per query.
    Inverted,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(Backend::Dense),
            "inverted" => Ok(Backend::Inverted),
            other => Err(format!("unknown backend '{other}' (expected dense or inverted)")),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Dense => f.write_str("dense"),
            Backend::Inverted => f.write_str("inverted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub backend: Backend,
    /// Compute dense matrix rows on the rayon pool.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { backend: Backend::Dense, parallel: true }
    }
}
