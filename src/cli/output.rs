//! Output formatting utilities

use console::style;
use miette::{IntoDiagnostic, Result};
use std::io::Write;

use crate::cli::helpers::truncate_str;
use crate::cli::OutputFormat;
use crate::core::manifest::encode;
use crate::core::registry::PushItems;

/// Determine the effective output format based on context
///
/// Listings default to a table, registries handed on to other tools default
/// to manifest text (`None`).
pub fn effective_format(format: OutputFormat, is_list: bool) -> Option<OutputFormat> {
    match format {
        OutputFormat::Auto if is_list => Some(OutputFormat::Table),
        OutputFormat::Auto => None,
        other => Some(other),
    }
}

/// Print a registry in the requested format, or as manifest text
pub fn print_items(items: &PushItems, format: OutputFormat, is_list: bool) -> Result<()> {
    let Some(format) = effective_format(format, is_list) else {
        print!("{}", encode(items));
        return Ok(());
    };

    let summaries: Vec<_> = items.iter().map(|i| i.to_summary()).collect();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summaries).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&summaries).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for summary in &summaries {
                writer.serialize(summary).into_diagnostic()?;
            }
            writer.flush().into_diagnostic()?;
        }
        OutputFormat::Path => {
            let mut out = std::io::stdout().lock();
            for item in items {
                writeln!(out, "{}", item.path).into_diagnostic()?;
            }
        }
        OutputFormat::Table | OutputFormat::Auto => print_table(items),
    }
    Ok(())
}

fn print_table(items: &PushItems) {
    if items.is_empty() {
        println!("No push items.");
        return;
    }

    println!(
        "{:<40} {:<18} {:<20} {}",
        style("PATH").bold(),
        style("CATEGORY").bold(),
        style("STATUS").bold(),
        style("URL").bold()
    );
    println!("{}", "-".repeat(100));

    for item in items {
        let status = item.status.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "{:<40} {:<18} {:<20} {}",
            style(truncate_str(item.path.as_str(), 40)).cyan(),
            truncate_str(item.category.display_name(), 18),
            style(status).yellow(),
            style(&item.url).dim()
        );
    }

    println!();
    println!("{} push item(s)", style(items.len()).cyan());
}
