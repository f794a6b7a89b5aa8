use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weather-report")]
#[command(about = "Generate a PDF weather report with statistics and charts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide the progress spinner")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Configuration file [default: weather_report.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    #[arg(long, help = "Preferred Excel input [default: sample_data.xlsx]")]
    pub excel: Option<PathBuf>,

    #[arg(long, help = "Fallback CSV input [default: sample_data.csv]")]
    pub csv: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Load data, render charts and write the PDF report (default)
    Generate {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, help = "Logo image for the page header [default: logo.png]")]
        logo: Option<PathBuf>,

        #[arg(short, long, help = "Directory for charts and report [default: .]")]
        output_dir: Option<PathBuf>,
    },

    /// Print summary statistics and the temperature distribution without writing files
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Check that the input data loads and matches the expected columns
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Generate {
            input: InputArgs::default(),
            logo: None,
            output_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["weather-report"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::try_parse_from([
            "weather-report",
            "generate",
            "--csv",
            "obs.csv",
            "--output-dir",
            "out",
            "--quiet",
        ])
        .unwrap();

        assert!(cli.quiet);
        match cli.command {
            Some(Commands::Generate {
                input, output_dir, ..
            }) => {
                assert_eq!(input.csv, Some(PathBuf::from("obs.csv")));
                assert_eq!(input.excel, None);
                assert_eq!(output_dir, Some(PathBuf::from("out")));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
