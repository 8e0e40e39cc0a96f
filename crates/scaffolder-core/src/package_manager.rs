//! Package manager detection for the post-create instructions

use std::fmt;

/// Environment variable npm-compatible clients set for child processes
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// Parse a user agent such as `pnpm/9.1.0 npm/? node/v20.11.0 linux x64`
    pub fn from_user_agent(user_agent: &str) -> Option<Self> {
        let spec = user_agent.split_whitespace().next()?;
        let name = spec.split('/').next()?;
        match name {
            "npm" => Some(Self::Npm),
            "yarn" => Some(Self::Yarn),
            "pnpm" => Some(Self::Pnpm),
            "bun" => Some(Self::Bun),
            _ => None,
        }
    }

    /// Detect from the environment, defaulting to npm
    pub fn detect() -> Self {
        std::env::var(USER_AGENT_ENV)
            .ok()
            .and_then(|ua| Self::from_user_agent(&ua))
            .unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
        }
    }

    pub fn install_command(&self) -> &'static str {
        match self {
            Self::Npm => "npm install",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm install",
            Self::Bun => "bun install",
        }
    }

    pub fn dev_command(&self) -> &'static str {
        match self {
            Self::Npm => "npm run dev",
            Self::Yarn => "yarn dev",
            Self::Pnpm => "pnpm dev",
            Self::Bun => "bun run dev",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
