use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "warden")]
#[command(about = "Warden CLI: check credentials against the internal users store")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (defaults to warden.toml)
    #[arg(short, long, global = true, env = "WARDEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Internal users file (overrides internal_users.path)
    #[arg(short, long, global = true, env = "WARDEN_USERS")]
    pub users: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authenticate an identity; the secret is read from stdin
    Check(IdentityArgs),
    /// Check whether an identity is known and show its roles
    Exists(IdentityArgs),
    /// Resolve roles for an already authenticated identity (record key only)
    Roles(IdentityArgs),
    /// Parse the internal users file and report what it contains
    Validate,
}

#[derive(clap::Args)]
pub struct IdentityArgs {
    /// Identity name (record key or username field)
    pub identity: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_with_overrides() {
        let cli = Cli::try_parse_from([
            "warden",
            "--users",
            "/tmp/users.toml",
            "--format",
            "json",
            "check",
            "alice",
        ])
        .unwrap();

        assert_eq!(cli.users, Some(PathBuf::from("/tmp/users.toml")));
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
        match cli.command {
            Commands::Check(args) => assert_eq!(args.identity, "alice"),
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn test_identity_is_required() {
        assert!(Cli::try_parse_from(["warden", "exists"]).is_err());
    }
}
