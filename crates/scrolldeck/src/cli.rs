use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use scrolldeck::nav::{ControllerOptions, fragment};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scrolldeck")]
#[command(author, version, about)]
#[command(long_about = "Present a markdown deck as full-screen slides in a scrolling container.\n\n\
    Navigate with arrow keys, Space, Page Up/Down, Home/End, the mouse wheel,\n\
    touch swipes or the dot navigation.\n\n\
    Examples:\n  \
    scrolldeck talk.md                   Present fullscreen\n  \
    scrolldeck talk.md --windowed        Present in a window\n  \
    scrolldeck talk.md --fragment '#slide-4'   Open on slide 4\n  \
    scrolldeck config show               Print the configuration")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Markdown file to present
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(
        long,
        conflicts_with = "fragment",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub slide: Option<usize>,

    /// Start from a location fragment such as '#slide-3'
    #[arg(long)]
    pub fragment: Option<String>,

    /// Do not show the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Do not show dot navigation
    #[arg(long)]
    pub no_dots: bool,

    /// Do not show the slide counter
    #[arg(long)]
    pub no_number: bool,

    /// Do not show the keyboard hint
    #[arg(long)]
    pub no_keyboard_hint: bool,

    /// Do not show the fullscreen button
    #[arg(long)]
    pub no_fullscreen_button: bool,

    /// Show an "All Slides" link pointing at this URL
    #[arg(long, value_name = "URL")]
    pub back_link: Option<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell (bash, zsh, fish, powershell, elvish)
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, navigation.show_dots)
        key: String,

        /// Value to set
        value: String,
    },
}

/// Everything the presentation window needs to start.
#[derive(Debug, Clone)]
pub struct Launch {
    pub file: PathBuf,
    pub windowed: bool,
    pub fragment: Option<String>,
    pub options: ControllerOptions,
    pub theme: String,
}

impl Cli {
    /// Layer the widget flags on top of configured options.
    pub fn apply_overrides(&self, options: &mut ControllerOptions) {
        if self.no_progress {
            options.show_progress = false;
        }
        if self.no_dots {
            options.show_dots = false;
        }
        if self.no_number {
            options.show_number = false;
        }
        if self.no_keyboard_hint {
            options.show_keyboard_hint = false;
        }
        if self.no_fullscreen_button {
            options.show_fullscreen_button = false;
        }
        if let Some(link) = &self.back_link {
            options.back_link = Some(link.clone());
        }
    }

    /// Initial location fragment from `--slide` or `--fragment`.
    pub fn initial_fragment(&self) -> Option<String> {
        match (self.slide, &self.fragment) {
            (Some(n), _) => Some(fragment::format(n.saturating_sub(1))),
            (None, Some(f)) if f.starts_with('#') => Some(f.clone()),
            (None, Some(f)) => Some(format!("#{f}")),
            (None, None) => None,
        }
    }

    pub fn run(mut self) -> anyhow::Result<()> {
        match self.command.take() {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::version::run();
                Ok(())
            }
            None => {
                let Some(file) = self.file.clone() else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    return Ok(());
                };
                if !file.exists() {
                    anyhow::bail!("File not found: {}", file.display());
                }

                let config = crate::config::Config::load_or_default();
                let mut options = config.controller_options();
                self.apply_overrides(&mut options);

                crate::app::run(Launch {
                    file,
                    windowed: self.windowed || config.windowed(),
                    fragment: self.initial_fragment(),
                    options,
                    theme: config.theme().to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("scrolldeck").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_widget_flags_override_options() {
        let cli = parse(&["talk.md", "--no-dots", "--no-number", "--back-link", "../index.html"]);
        let mut options = ControllerOptions::default();
        cli.apply_overrides(&mut options);
        assert!(!options.show_dots);
        assert!(!options.show_number);
        assert!(options.show_progress);
        assert_eq!(options.back_link.as_deref(), Some("../index.html"));
    }

    #[test]
    fn test_initial_fragment_from_slide() {
        let cli = parse(&["talk.md", "--slide", "3"]);
        assert_eq!(cli.initial_fragment().as_deref(), Some("#slide-3"));
    }

    #[test]
    fn test_initial_fragment_adds_hash() {
        let cli = parse(&["talk.md", "--fragment", "slide-2"]);
        assert_eq!(cli.initial_fragment().as_deref(), Some("#slide-2"));
        let cli = parse(&["talk.md", "--fragment", "#slide-5"]);
        assert_eq!(cli.initial_fragment().as_deref(), Some("#slide-5"));
        assert_eq!(parse(&["talk.md"]).initial_fragment(), None);
    }

    #[test]
    fn test_slide_zero_is_rejected() {
        assert!(Cli::try_parse_from(["scrolldeck", "a.md", "--slide", "0"]).is_err());
        assert_eq!(
            parse(&["a.md", "--slide", "1"]).initial_fragment().as_deref(),
            Some("#slide-1")
        );
    }

    #[test]
    fn test_slide_conflicts_with_fragment() {
        let result = Cli::try_parse_from(["scrolldeck", "a.md", "--slide", "2", "--fragment", "#slide-3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_subcommand() {
        let cli = parse(&["config", "set", "navigation.show_dots", "false"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommands::Set { .. }
            })
        ));
    }
}
