//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--quiet` / `-q`: Minimal output; implies --no-interactive
//! - `--no-interactive`: Disable prompts
//! - `--debug`: Enable debug logging

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// ccd - Operator CLI for the Canary deployment platform
#[derive(Parser, Debug)]
#[command(name = "ccd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Interactive unless `--no-interactive` or `--quiet` was given,
    /// and stdin is a terminal.
    pub fn interactive(&self) -> bool {
        !self.no_interactive && !self.quiet && std::io::stdin().is_terminal()
    }
}

/// Shells supported by the completion command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Available command groups.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configure this CLI
    #[command(
        subcommand,
        long_about = "Configure this CLI.\n\n\
            The CLI keeps a small local configuration file with the platform \
            URL and the API key used for every call. The file is created with \
            defaults on first run.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Point the CLI at your platform
    ccd cli set API_URL https://deploy.example.com
    ccd cli set API_KEY <your-key>

    # Inspect the current settings
    ccd cli list"
    )]
    Cli(CliAction),

    /// Manage platform configuration
    #[command(subcommand)]
    Config(ConfigAction),

    /// Manage authentication keys
    #[command(subcommand)]
    Auth(AuthAction),

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectAction),

    /// Manage environments and their variables (scoped to a project)
    #[command(subcommand)]
    Env(EnvAction),

    /// Manage static pages
    #[command(subcommand)]
    Page(PageAction),

    /// Manage redirects
    #[command(subcommand)]
    Redirect(RedirectAction),

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Local CLI configuration actions.
#[derive(Subcommand, Debug)]
pub enum CliAction {
    /// List CLI configuration
    List,
    /// Set a CLI configuration value
    Set { key: String, value: String },
}

/// Remote platform configuration actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// List platform configuration
    List,
    /// Set a platform configuration value
    Set { key: String, value: String },
    /// Remove a platform configuration value
    Unset { key: String },
}

/// Authentication key actions.
#[derive(Subcommand, Debug)]
pub enum AuthAction {
    /// List authentication keys
    List {
        /// Narrow the listing to names matching this filter
        filter: Option<String>,
    },

    /// Show key details
    View { name: String },

    /// Create a key
    #[command(
        long_about = "Create an authentication key.\n\n\
            A key authenticates the platform against your git host when it \
            clones project remotes. Keys are either SSH key pairs (the \
            platform can generate one and hand you the public half) or \
            personal access tokens.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Let the platform generate an SSH key, print the public half
    ccd auth create deploy --ssh

    # Import an existing private key; the file name becomes the key name
    ccd auth create --import ~/.ssh/id_ed25519

    # Store a personal access token
    ccd auth create ci --pat ghp_xxxx

    # No flags: pick the method interactively
    ccd auth create deploy"
    )]
    Create {
        /// Key name (spaces become underscores)
        name: Option<String>,

        /// Create an SSH key pair on the platform
        #[arg(long, conflicts_with_all = ["pat", "import"])]
        ssh: bool,

        /// Store a personal access token
        #[arg(long, value_name = "TOKEN", conflicts_with = "import")]
        pat: Option<String>,

        /// Import private key material from a file
        #[arg(long, value_name = "FILE")]
        import: Option<PathBuf>,
    },

    /// Delete a key
    Delete {
        /// Key name; selected interactively when omitted
        name: Option<String>,
    },
}

/// Project actions.
#[derive(Subcommand, Debug)]
pub enum ProjectAction {
    /// List projects
    List {
        /// Narrow the listing to names matching this filter
        filter: Option<String>,
    },

    /// Show project details
    View {
        name: String,

        /// Show the project's secrets instead of its metadata
        #[arg(long)]
        secrets: bool,

        /// Open the platform in a browser
        #[arg(long)]
        web: bool,
    },

    /// Create a project
    #[command(
        long_about = "Create a project.\n\n\
            A project is a git-backed deployable unit. The remote can be a \
            local checkout (its origin URL is used), a user/repo[@branch] \
            spec (canonicalized to an SSH URL), or a full remote URL.",
        after_help = "\
WORKFLOW EXAMPLES:
    # From the current checkout, named after the directory
    ccd project create . --remote .

    # From a GitHub spec with an embedded branch
    ccd project create myapp --remote org/repo@dev

    # Explicit branch wins over the embedded one
    ccd project create myapp --remote org/repo@dev --branch main"
    )]
    Create {
        /// Project name ('.' names it after the current directory)
        name: Option<String>,

        /// Git remote: a directory, a user/repo[@branch] spec, or a URL
        #[arg(long)]
        remote: Option<String>,

        /// Branch to deploy
        #[arg(long)]
        branch: Option<String>,

        /// Auth key to clone with; selected interactively when omitted
        #[arg(long)]
        key: Option<String>,
    },

    /// Update a project
    #[command(
        long_about = "Update a project.\n\n\
            Metadata (remote, branch, key) is updated in one call; secrets \
            are pushed or removed one call per item, each reported as it \
            completes. Malformed --set pairs are skipped with a warning, \
            the remaining items are still attempted.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Change the deployed branch
    ccd project update myapp --branch main

    # Push secrets (keys are upper-cased)
    ccd project update myapp --set db_url=postgres://... --set PORT=8080

    # Import a whole env file
    ccd project update myapp --import-env .env.production"
    )]
    Update {
        name: String,

        /// Git remote: a directory, a user/repo[@branch] spec, or a URL
        #[arg(long)]
        remote: Option<String>,

        /// Branch to deploy
        #[arg(long)]
        branch: Option<String>,

        /// Auth key to clone with
        #[arg(long)]
        key: Option<String>,

        /// Push a secret (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Remove a secret (repeatable)
        #[arg(long = "unset", value_name = "KEY")]
        unset: Vec<String>,

        /// Import secrets from an env file
        #[arg(long = "import-env", value_name = "FILE")]
        import_env: Option<PathBuf>,
    },

    /// Delete a project
    Delete {
        /// Project name; selected interactively when omitted
        name: Option<String>,
    },

    /// Run deployment actions for a project
    Deploy {
        name: String,

        /// Start the deployment (default action)
        #[arg(long)]
        start: bool,

        /// Stop the deployment
        #[arg(long, conflicts_with = "start")]
        stop: bool,

        /// Show deployment status
        #[arg(long)]
        status: bool,

        /// Show deployment logs
        #[arg(long)]
        logs: bool,
    },

    /// Show deployment status and logs
    Status { name: String },

    /// Regenerate the deploy token
    ///
    /// The previous token stops working immediately.
    RefreshToken { name: String },
}

/// Environment and variable actions, scoped under a project.
#[derive(Subcommand, Debug)]
pub enum EnvAction {
    /// List a project's environments
    List { project: String },

    /// Create an environment
    Create {
        project: String,
        name: String,

        /// Branch this environment deploys
        #[arg(long)]
        branch: Option<String>,
    },

    /// Show an environment's variables
    View { project: String, environment: String },

    /// Delete an environment
    Delete { project: String, environment: String },

    /// Set a variable (key is upper-cased)
    Set {
        project: String,
        environment: String,
        key: String,
        value: String,
    },

    /// Remove a variable
    Unset {
        project: String,
        environment: String,
        key: String,
    },

    /// Import variables from an env file
    #[command(
        long_about = "Import variables from an env file.\n\n\
            Standard KEY=value lines; later duplicates overwrite earlier \
            ones. One update is issued per key, each reported as it \
            completes, with key casing preserved as written."
    )]
    Import {
        project: String,
        environment: String,
        file: PathBuf,
    },
}

/// Static page actions.
#[derive(Subcommand, Debug)]
pub enum PageAction {
    /// List pages
    List,

    /// Show page details
    View { fqdn: String },

    /// Create a page
    Create {
        fqdn: String,

        /// Allowed CORS host (repeatable)
        #[arg(long = "cors", value_name = "HOST")]
        cors_hosts: Vec<String>,

        /// Create a redirect from this source to the new page (repeatable)
        #[arg(long = "redirect", value_name = "SOURCE")]
        redirects: Vec<String>,
    },

    /// Delete a page
    Delete {
        /// Page FQDN; selected interactively when omitted
        fqdn: Option<String>,
    },

    /// Regenerate the page's deploy token
    RefreshToken { fqdn: String },

    /// Deploy an artifact to a page
    #[command(after_help = "\
WORKFLOW EXAMPLES:
    # Deploy a prebuilt archive and open the page
    tar cf payload.tar dist/
    ccd page deploy example.com payload.tar --view")]
    Deploy {
        fqdn: String,

        /// Artifact to upload (a regular file, not a directory)
        path: PathBuf,

        /// Open the page in a browser after deploying
        #[arg(long)]
        view: bool,
    },
}

/// Redirect actions.
#[derive(Subcommand, Debug)]
pub enum RedirectAction {
    /// List redirects
    List,

    /// Create a redirect
    Create {
        /// Source FQDN
        source: String,
        /// Destination FQDN (must name an existing page)
        destination: String,
    },

    /// Update a redirect's destination
    Update {
        /// Source FQDN
        source: String,
        /// New destination FQDN
        destination: String,
    },

    /// Delete a redirect
    Delete {
        /// Source FQDN
        source: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn env_set_parses_positionals() {
        let cli = Cli::try_parse_from(["ccd", "env", "set", "proj", "dev", "port", "8080"])
            .unwrap();
        match cli.command {
            Command::Env(EnvAction::Set {
                project,
                environment,
                key,
                value,
            }) => {
                assert_eq!(project, "proj");
                assert_eq!(environment, "dev");
                assert_eq!(key, "port");
                assert_eq!(value, "8080");
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn auth_create_flags_conflict() {
        assert!(Cli::try_parse_from(["ccd", "auth", "create", "k", "--ssh", "--pat", "x"])
            .is_err());
        assert!(
            Cli::try_parse_from(["ccd", "auth", "create", "--ssh", "--import", "f"]).is_err()
        );
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["ccd", "project"]).is_err());
        assert!(Cli::try_parse_from(["ccd"]).is_err());
    }

    #[test]
    fn quiet_disables_interactive() {
        let cli = Cli::try_parse_from(["ccd", "--quiet", "page", "list"]).unwrap();
        assert!(!cli.interactive());
    }
}
