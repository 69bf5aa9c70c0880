//! Output rendering and formatting

use bitcheck_check::{BatchReport, ExportEntry, ToolStatus};
use bitcheck_library::ImportSummary;
use bitcheck_types::{ColorChoice, Item, OutputFormat};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use std::io;

/// Result of one command, ready to render
#[derive(Debug)]
pub enum CommandOutput {
    Report(BatchReport),
    Export(Vec<ExportEntry>),
    Tools(Vec<ToolStatus>),
    Imported(ImportSummary),
    Items(Vec<Item>),
}

impl CommandOutput {
    /// Process exit status for this result
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Report(report) => report.exit_code(),
            _ => bitcheck_check::EXIT_SUCCESS,
        }
    }
}

/// Output renderer for CLI results
///
/// Per-file report lines go to stderr; summaries, exports and listings go
/// to stdout.
#[derive(Clone)]
pub struct OutputRenderer {
    format: OutputFormat,
    colors: bool,
    quiet: bool,
}

impl OutputRenderer {
    pub fn new(format: OutputFormat, color_choice: ColorChoice, quiet: bool) -> Self {
        let colors = match color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => Term::stderr().features().colors_supported(),
        };
        Self {
            format,
            colors,
            quiet,
        }
    }

    pub fn render(&self, output: &CommandOutput) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            return self.render_json(output);
        }

        match output {
            CommandOutput::Report(report) => self.render_report(report),
            CommandOutput::Export(entries) => {
                for entry in entries {
                    println!("{entry}");
                }
            }
            CommandOutput::Tools(tools) => {
                for tool in tools {
                    println!("{tool}");
                }
            }
            CommandOutput::Imported(summary) => {
                if !self.quiet {
                    println!(
                        "Imported {} files ({} already in library)",
                        summary.added, summary.skipped
                    );
                }
                if summary.rejected > 0 {
                    eprintln!(
                        "{}",
                        self.style_line(&format!(
                            "WARNING {} files skipped: path is not valid UTF-8",
                            summary.rejected
                        ))
                    );
                }
            }
            CommandOutput::Items(items) => self.render_items(items),
        }
        Ok(())
    }

    fn render_json(&self, output: &CommandOutput) -> io::Result<()> {
        let value = match output {
            CommandOutput::Report(report) => serde_json::to_value(report),
            CommandOutput::Export(entries) => serde_json::to_value(entries),
            CommandOutput::Tools(tools) => serde_json::to_value(tools),
            CommandOutput::Imported(summary) => Ok(serde_json::json!({
                "added": summary.added,
                "skipped": summary.skipped,
                "rejected": summary.rejected,
            })),
            CommandOutput::Items(items) => serde_json::to_value(items),
        }
        .map_err(io::Error::other)?;

        let json = serde_json::to_string_pretty(&value).map_err(io::Error::other)?;
        println!("{json}");
        Ok(())
    }

    fn render_report(&self, report: &BatchReport) {
        for line in report.lines() {
            eprintln!("{}", self.style_line(&line));
        }
        if self.quiet {
            return;
        }
        if let Some(summary) = report.summary() {
            println!("{summary}");
        }
    }

    fn render_items(&self, items: &[Item]) {
        if self.format == OutputFormat::Plain {
            for item in items {
                println!(
                    "{}\t{}\t{}",
                    item.path.display(),
                    item.media_type,
                    item.checksum.as_deref().unwrap_or("-")
                );
            }
            return;
        }

        if items.is_empty() {
            println!("No items in library.");
            return;
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Path").add_attribute(Attribute::Bold),
            Cell::new("Type").add_attribute(Attribute::Bold),
            Cell::new("Checksum").add_attribute(Attribute::Bold),
        ]);

        for item in items {
            let checksum_cell = match &item.checksum {
                Some(checksum) => Cell::new(short_checksum(checksum)),
                None => Cell::new("-").fg(Color::DarkGrey),
            };
            table.add_row(vec![
                Cell::new(item.path.display()),
                Cell::new(item.media_type),
                checksum_cell,
            ]);
        }

        println!("{table}");
    }

    fn style_line(&self, line: &str) -> String {
        let style = if line.starts_with("FAILED") || line.starts_with("ERROR") {
            Style::new().red()
        } else {
            Style::new().yellow()
        };
        style.force_styling(self.colors).apply_to(line).to_string()
    }
}

fn short_checksum(checksum: &str) -> &str {
    checksum.get(..16).unwrap_or(checksum)
}
