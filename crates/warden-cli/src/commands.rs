use std::io::{BufRead, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use warden_auth::{
    AuthCredentials, AuthenticationBackend, AuthorizationBackend, InternalAuthenticationBackend,
    User,
};
use warden_config::FileIdentityProvider;
use zeroize::Zeroize;

use crate::cli::OutputFormat;
use crate::output;

type Backend = InternalAuthenticationBackend<FileIdentityProvider>;

fn open_backend(users: &Path) -> Result<Backend> {
    let provider = FileIdentityProvider::open(users)
        .with_context(|| format!("failed to load internal users from {}", users.display()))?;
    Ok(InternalAuthenticationBackend::new(provider))
}

pub fn check(users: &Path, identity: &str, format: OutputFormat) -> Result<()> {
    let backend = open_backend(users)?;
    let secret = read_secret()?;
    let mut credentials = AuthCredentials::new(identity, secret);

    match backend.authenticate(&mut credentials) {
        Ok(user) => {
            tracing::debug!(user = %user.name, "Credentials accepted");
            output::print_user(&user, format)
        }
        Err(e) => bail!("{} ({})", e, e.category()),
    }
}

pub fn exists(users: &Path, identity: &str, format: OutputFormat) -> Result<()> {
    let backend = open_backend(users)?;
    let mut user = User::new(identity);
    let found = backend.exists(&mut user);
    output::print_exists(&user, found, format)?;
    if !found {
        std::process::exit(1);
    }
    Ok(())
}

pub fn roles(users: &Path, identity: &str, format: OutputFormat) -> Result<()> {
    let backend = open_backend(users)?;
    let mut user = User::new(identity);
    let credentials = AuthCredentials::new(identity, Vec::<u8>::new());
    backend.fill_roles(&mut user, &credentials)?;
    output::print_user(&user, format)
}

pub fn validate(users: &Path, format: OutputFormat) -> Result<()> {
    let store = warden_config::load_users(users)
        .with_context(|| format!("invalid internal users file {}", users.display()))?;
    let without_hash = store.iter().filter(|(_, r)| !r.has_hash()).count();
    output::print_summary(&users.display().to_string(), store.len(), without_hash, format)
}

/// Reads one line from stdin as the secret, without the line terminator.
///
/// The terminator bytes are wiped before the buffer is shortened, so no part
/// of the line lingers past the returned length.
fn read_secret() -> Result<Vec<u8>> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprint!("{} ", "Password:".cyan());
    }

    let mut buf = Vec::with_capacity(256);
    stdin
        .lock()
        .read_until(b'\n', &mut buf)
        .context("failed to read secret from stdin")?;

    let len = buf
        .iter()
        .rposition(|b| *b != b'\n' && *b != b'\r')
        .map_or(0, |i| i + 1);
    buf[len..].zeroize();
    buf.truncate(len);
    Ok(buf)
}
