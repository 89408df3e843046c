use clap::Parser;
use config::DEFAULT_LOG_FILTER;
use errors::Result;
use git::GitCliImpl;
use review::{client_builder, HttpStatusSource};
use std::sync::Arc;

mod config;
mod core;
mod errors;
mod git;
mod review;

/// Print the local branches whose code review has been closed.
///
/// Each branch is looked up through its `branch.<name>.rietveldserver` and
/// `branch.<name>.rietveldissue` git config keys.
#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "git-closed-branches", version)]
struct Cli {
    /// Extra arguments are accepted and ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    _rest: Vec<String>,
}

fn list_closed_branches() -> Result<()> {
    let git = Arc::new(GitCliImpl::new());
    let source = Arc::new(HttpStatusSource::new(client_builder().build()?));

    let stdout = std::io::stdout();
    let closed = crate::core::run(git, source, &mut stdout.lock())?;
    log::debug!("{} closed branches", closed.len());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    let _args = Cli::parse();

    if let Err(e) = list_closed_branches() {
        log::error!("{}", e);
        std::process::exit(1);
    }
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
    fn test_extra_arguments_are_ignored() {
        assert!(Cli::try_parse_from(["git-closed-branches"]).is_ok());
        assert!(Cli::try_parse_from(["git-closed-branches", "origin", "main"]).is_ok());
        assert!(Cli::try_parse_from(["git-closed-branches", "--all", "-v"]).is_ok());
    }
}
