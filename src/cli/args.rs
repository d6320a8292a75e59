//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Build and scaffold tool for Figma plugins
///
/// Running `figpack` without a subcommand builds the project,
/// so `figpack --watch` is the same as `figpack build --watch`.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: figpack.toml, searched upward)
    #[arg(short = 'C', long, global = true, default_value = "figpack.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub build_args: BuildArgs,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scaffold a new plugin project
    #[command(visible_alias = "i")]
    Init {
        /// Project directory name/path (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Skip the iframe UI (src/ui.ts, ui.html)
        #[arg(long)]
        no_ui: bool,

        /// Print the generated figpack.toml instead of writing files
        #[arg(long)]
        dry: bool,
    },

    /// Bundle the plugin (default command)
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },
}

/// Build arguments, accepted both at top level and by `build`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Keep rebuilding on source changes until interrupted
    #[arg(short, long)]
    pub watch: bool,

    /// Minify the bundles
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Emit inline sourcemaps
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sourcemap: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Build arguments of this invocation, `None` for `init`.
    pub fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Some(Commands::Build { build_args }) => Some(build_args),
            Some(Commands::Init { .. }) => None,
            None => Some(&self.build_args),
        }
    }

    /// Whether the watch flag is present.
    pub fn is_watch(&self) -> bool {
        self.build_args().is_some_and(|args| args.watch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one_shot_build() {
        let cli = Cli::parse_from(["figpack"]);
        assert!(cli.command.is_none());
        assert!(!cli.is_watch());
        assert!(cli.build_args().is_some());
    }

    #[test]
    fn test_top_level_watch_flag() {
        let cli = Cli::parse_from(["figpack", "--watch"]);
        assert!(cli.is_watch());
    }

    #[test]
    fn test_build_subcommand_watch() {
        let cli = Cli::parse_from(["figpack", "build", "-w", "--minify"]);
        assert!(cli.is_watch());
        assert_eq!(cli.build_args().and_then(|a| a.minify), Some(true));
    }

    #[test]
    fn test_init_args() {
        let cli = Cli::parse_from(["figpack", "init", "my-plugin", "--no-ui"]);
        assert!(cli.build_args().is_none());
        match cli.command {
            Some(Commands::Init { name, no_ui, dry }) => {
                assert_eq!(name, Some(PathBuf::from("my-plugin")));
                assert!(no_ui);
                assert!(!dry);
            }
            _ => panic!("expected init"),
        }
    }

    #[test]
    fn test_global_config_path() {
        let cli = Cli::parse_from(["figpack", "build", "-C", "other.toml"]);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
    }

    #[test]
    fn test_cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
