use chrono::Local;

use crate::cli::args::{Cli, Commands, InputArgs};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::pipeline;
use crate::readers::LoadedData;
use crate::utils::{init_logging, ProgressReporter};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = ReportConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or_default() {
        Commands::Generate {
            input,
            logo,
            output_dir,
        } => {
            let config = with_input(config, input).with_outputs(logo, output_dir);
            let progress = ProgressReporter::new_spinner("Loading data...", cli.quiet);

            let data = pipeline::load(&config)?;
            progress.println(&loaded_message(&data));

            let artifacts =
                pipeline::render_report(&config, &data, Local::now().naive_local(), &progress)?;
            progress.finish_and_clear();

            println!(
                "✅ Report generated as '{}' ({} page{})",
                artifacts.document.path.display(),
                artifacts.document.pages,
                if artifacts.document.pages == 1 { "" } else { "s" }
            );
        }

        Commands::Summary { input } => {
            let config = with_input(config, input);
            let data = pipeline::load(&config)?;
            println!("{}", loaded_message(&data));

            let (statistics, distribution) = pipeline::analyze(&data);
            println!("\n{}", statistics.detailed_summary());
            println!("{}", distribution.summary());
        }

        Commands::Validate { input } => {
            let config = with_input(config, input);
            let data = pipeline::load(&config)?;
            println!("{}", loaded_message(&data));
            println!(
                "✅ {} rows match the expected columns (Datetime, Temperature, Humidity, Wind Speed)",
                data.table.len()
            );
        }
    }

    Ok(())
}

fn with_input(config: ReportConfig, input: InputArgs) -> ReportConfig {
    config.with_inputs(input.excel, input.csv)
}

fn loaded_message(data: &LoadedData) -> String {
    format!(
        "✅ Loaded data from {} ({})",
        data.source.format_name(),
        data.source.path().display()
    )
}
