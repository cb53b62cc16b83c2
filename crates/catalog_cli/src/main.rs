use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use catalog_core::catalog_api::CatalogDocument;
use catalog_core::convert::{ConversionReport, convert};
use catalog_core::section::SectionKind;
use catalog_render::{PopulateReport, contact_message, render_sections, theme_for};
use clap::{ArgAction, Parser, Subcommand};
use serde_json::{Value as JsonValue, json};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Log more (-v info, -vv debug). Ignored when RUST_LOG is set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a legacy catalog into the normalized document.
    Convert {
        #[arg(value_name = "LEGACY.json")]
        path: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
        /// List records whose category could not be inferred.
        #[arg(long)]
        report: bool,
    },
    /// Render the cards of a normalized document.
    Render {
        #[arg(value_name = "DOCUMENT.json")]
        path: PathBuf,
        #[arg(long, value_parser = parse_section)]
        section: Option<SectionKind>,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the contact text for an item.
    Contact {
        #[arg(value_name = "NAME")]
        name: String,
        #[arg(long, value_parser = parse_section)]
        section: Option<SectionKind>,
    },
    /// Print the theme of a section.
    Theme {
        #[arg(value_name = "SECTION", value_parser = parse_section)]
        section: SectionKind,
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Convert {
            path,
            output,
            report,
        } => run_convert(&path, output.as_deref(), report),
        Command::Render {
            path,
            section,
            json,
            output,
        } => run_render(&path, section, json, output.as_deref()),
        Command::Contact { name, section } => {
            let message = contact_message(&name, section);
            println!("{}", message.title);
            println!();
            println!("{}", message.body);
        }
        Command::Theme { section, json } => run_theme(section, json),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    // RUST_LOG, when set, wins over -v.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn run_convert(path: &Path, output: Option<&Path>, print_report: bool) {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", path.display());
        process::exit(1);
    });
    let legacy: JsonValue = serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing legacy catalog: {}", path.display());
        eprintln!("  {e}");
        process::exit(1);
    });
    let (document, report) = convert(&legacy).unwrap_or_else(|e| {
        eprintln!("Error converting {}: {e}", path.display());
        process::exit(1);
    });
    info!(
        records = report.records,
        fallbacks = report.fallback_categories.len(),
        "converted legacy catalog"
    );

    let rendered = document.to_json_pretty().unwrap_or_else(|e| {
        eprintln!("Error rendering JSON output: {e}");
        process::exit(1);
    });

    match output {
        Some(out_path) => {
            write_output(out_path, &rendered);
            println!(
                "Wrote {} records to {}",
                report.records,
                out_path.display()
            );
        }
        None => println!("{rendered}"),
    }

    if print_report {
        print_conversion_report(&report);
    }
}

fn print_conversion_report(report: &ConversionReport) {
    eprintln!(
        "{} records converted, {} with a fallback category",
        report.records,
        report.fallback_categories.len()
    );
    for fallback in &report.fallback_categories {
        eprintln!(
            "  {}.{} {} '{}' -> {}",
            fallback.section,
            fallback.subcategory,
            fallback.id,
            fallback.name.as_deref().unwrap_or("?"),
            fallback.category
        );
    }
}

fn run_render(path: &Path, section: Option<SectionKind>, as_json: bool, output: Option<&Path>) {
    let bytes = fs::read(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", path.display());
        process::exit(1);
    });
    let document = CatalogDocument::from_json_bytes(&bytes).unwrap_or_else(|e| {
        eprintln!("Error parsing catalog document: {}", path.display());
        eprintln!("  {e}");
        process::exit(1);
    });

    let mut report = PopulateReport::default();
    let containers = render_sections(&document, section, &mut report);

    let rendered = if as_json {
        let payload = json!({ "containers": containers, "report": report });
        serde_json::to_string_pretty(&payload).unwrap_or_else(|e| {
            eprintln!("Error rendering JSON output: {e}");
            process::exit(1);
        })
    } else {
        let mut out = String::new();
        for container in &containers {
            out.push_str(&format!("<!-- {} -->\n{}\n", container.key, container.html));
        }
        out
    };

    match output {
        Some(out_path) => {
            write_output(out_path, &rendered);
            println!(
                "Wrote {} cards to {}",
                report.rendered_cards,
                out_path.display()
            );
        }
        None => print!("{rendered}"),
    }
}

fn run_theme(section: SectionKind, as_json: bool) {
    let theme = theme_for(section);
    if as_json {
        let rendered = serde_json::to_string_pretty(&theme).unwrap_or_else(|e| {
            eprintln!("Error rendering JSON output: {e}");
            process::exit(1);
        });
        println!("{rendered}");
        return;
    }

    println!("title={}", theme.title);
    println!("subtitle={}", theme.subtitle);
    println!("page_title={}", theme.page_title);
    for (name, value) in &theme.css_variables {
        println!("{name}={value}");
    }
    println!("discord={}", theme.footer.discord);
    println!("ingame={}", theme.footer.ingame);
}

fn write_output(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap_or_else(|e| {
        eprintln!("Error writing {}: {e}", path.display());
        process::exit(1);
    });
}

fn parse_section(value: &str) -> Result<SectionKind, String> {
    value.parse::<SectionKind>().map_err(|e| e.message)
}
