//! Command dispatch logic for npm-rank

use super::{InitArgs, PackagesArgs, UserArgs, ValidateArgs, init_config, process_packages, process_user, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "npm-rank", version, author, long_about = None)]
#[command(about = "Rank npm packages by their recent downloads")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: RankSubcommand,
}

#[derive(Subcommand, Debug)]
enum RankSubcommand {
    /// Rank the packages maintained by an npm user
    User(Box<UserArgs>),
    /// Rank a list of packages
    Packages(Box<PackagesArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        RankSubcommand::User(user_args) => process_user(host, user_args).await,
        RankSubcommand::Packages(packages_args) => process_packages(host, packages_args).await,
        RankSubcommand::Init(init_args) => init_config(host, init_args),
        RankSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::Window;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_user_defaults_to_month() {
        let RankSubcommand::User(args) = parse(&["npm-rank", "user", "alice"]).command else {
            panic!("expected user subcommand");
        };
        assert_eq!(args.user, "alice");
        assert_eq!(args.common.window.window(), Window::Month);
        assert!(args.common.json.is_none());
    }

    #[test]
    fn test_parse_window_flags() {
        let RankSubcommand::User(args) = parse(&["npm-rank", "user", "alice", "--week"]).command else {
            panic!("expected user subcommand");
        };
        assert_eq!(args.common.window.window(), Window::Week);

        let RankSubcommand::User(args) = parse(&["npm-rank", "user", "alice", "--day"]).command else {
            panic!("expected user subcommand");
        };
        assert_eq!(args.common.window.window(), Window::Day);

        let RankSubcommand::User(args) = parse(&["npm-rank", "user", "alice", "--window", "week"]).command else {
            panic!("expected user subcommand");
        };
        assert_eq!(args.common.window.window(), Window::Week);
    }

    #[test]
    fn test_window_flags_conflict() {
        assert!(Cli::try_parse_from(["npm-rank", "user", "alice", "--day", "--week"]).is_err());
        assert!(Cli::try_parse_from(["npm-rank", "user", "alice", "--day", "--window", "month"]).is_err());
    }

    #[test]
    fn test_parse_packages() {
        let RankSubcommand::Packages(args) = parse(&["npm-rank", "packages", "left-pad", "is-odd", "--json", "out.json"]).command else {
            panic!("expected packages subcommand");
        };
        assert_eq!(args.packages, ["left-pad", "is-odd"]);
        assert_eq!(args.common.json.as_deref().map(|p| p.as_str()), Some("out.json"));
    }

    #[test]
    fn test_packages_requires_names() {
        assert!(Cli::try_parse_from(["npm-rank", "packages"]).is_err());
    }

    #[test]
    fn test_parse_invalid_window() {
        assert!(Cli::try_parse_from(["npm-rank", "user", "alice", "--window", "year"]).is_err());
    }
}
