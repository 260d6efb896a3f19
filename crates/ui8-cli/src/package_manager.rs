//! Detection of the consumer project's JavaScript package manager.

use std::fmt;
use std::path::Path;

use anyhow::{Context, bail};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Bun,
    Pnpm,
    Yarn,
    Npm,
}

/// Lockfiles in detection priority order.
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("package-lock.json", PackageManager::Npm),
];

impl PackageManager {
    /// First lockfile match in `root`, npm when there is none.
    #[must_use]
    pub fn detect(root: &Path) -> Self {
        LOCKFILES
            .iter()
            .find(|(file, _)| root.join(file).is_file())
            .map_or(Self::Npm, |(_, pm)| *pm)
    }

    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Bun => "bun",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Npm => "npm",
        }
    }

    /// Arguments that add `packages` to the project.
    #[must_use]
    pub fn install_args(self, packages: &[String]) -> Vec<String> {
        let verb = match self {
            Self::Npm => "install",
            Self::Bun | Self::Pnpm | Self::Yarn => "add",
        };
        std::iter::once(verb.to_string())
            .chain(packages.iter().cloned())
            .collect()
    }

    /// Run the install in `root`. An empty package list is a no-op.
    pub async fn install(self, root: &Path, packages: &[String]) -> anyhow::Result<()> {
        if packages.is_empty() {
            return Ok(());
        }
        let args = self.install_args(packages);
        info!(manager = %self, packages = packages.len(), "installing dependencies");
        let status = tokio::process::Command::new(self.program())
            .args(&args)
            .current_dir(root)
            .status()
            .await
            .with_context(|| format!("failed to run {}", self.program()))?;
        if !status.success() {
            bail!("{} {} exited with {status}", self.program(), args.join(" "));
        }
        Ok(())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}
