//! Terminal rendering for command results.

use crate::cli::OutputFormat;
use crate::commands::CommandOutput;
use crate::error::CliError;

pub fn render(output: &CommandOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => {
            println!("{}", output.table.trim_end());
        }
        OutputFormat::Json => {
            let rendered = if pretty {
                serde_json::to_string_pretty(&output.data)?
            } else {
                serde_json::to_string(&output.data)?
            };
            println!("{rendered}");
        }
    }

    Ok(())
}
