//! Command-line interface for promptmark
//! Inspects prompt template files and contrast result dumps from the shell.
//!
//! Usage:
//!   promptmark marks `<path>` --mark `<name>` [--format json|summary]
//!   promptmark extract `<path>` --mark `<name>`
//!   promptmark records `<path>`

use clap::{Arg, Command};
use serde::Serialize;

use promptmark::contrast::{experiment_contrast_to_record_items, ItemResult};
use promptmark::template::{AttrMap, MarkRangeInfo, ParserRegistry, TemplateDocument};

fn main() {
    let matches = Command::new("promptmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting prompt template markers and contrast records")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("marks")
                .about("Scan a template file for matched marker pairs")
                .arg(Arg::new("path").help("Path to the template file").required(true))
                .arg(
                    Arg::new("mark")
                        .long("mark")
                        .short('m')
                        .help("Mark name, e.g. 'LibraryBlock' or 'InputSlot'")
                        .required(true),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: json or summary")
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("extract")
                .about("Print a template with its marker syntax stripped")
                .arg(Arg::new("path").help("Path to the template file").required(true))
                .arg(
                    Arg::new("mark")
                        .long("mark")
                        .short('m')
                        .help("Mark name whose markers to strip")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("records")
                .about("Flatten a contrast API response JSON into row records")
                .arg(
                    Arg::new("path")
                        .help("Path to a JSON file holding an array of item results")
                        .required(true),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("marks", sub)) => {
            let path = sub.get_one::<String>("path").expect("path is required");
            let mark = sub.get_one::<String>("mark").expect("mark is required");
            let format = sub.get_one::<String>("format").expect("format has a default");
            handle_marks_command(path, mark, format);
        }
        Some(("extract", sub)) => {
            let path = sub.get_one::<String>("path").expect("path is required");
            let mark = sub.get_one::<String>("mark").expect("mark is required");
            handle_extract_command(path, mark);
        }
        Some(("records", sub)) => {
            let path = sub.get_one::<String>("path").expect("path is required");
            handle_records_command(path);
        }
        _ => unreachable!("subcommand required"),
    }
}

/// One scanned mark plus its parsed attributes, for JSON output.
#[derive(Serialize)]
struct MarkReport {
    #[serde(flatten)]
    mark: MarkRangeInfo,
    attrs: Option<AttrMap>,
    content: String,
}

fn read_file(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    })
}

fn handle_marks_command(path: &str, mark: &str, format: &str) {
    let text = read_file(path);
    let doc = TemplateDocument::new(text);
    let mut registry = ParserRegistry::new();
    let parser = registry.get_or_create(mark);

    let reports: Vec<MarkReport> = parser
        .get_all_marks(&doc)
        .into_iter()
        .map(|info| MarkReport {
            attrs: parser.get_data(doc.slice(info.open.from, info.open.to)),
            content: doc.slice(info.open.to, info.close.from).to_string(),
            mark: info,
        })
        .collect();

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&reports).unwrap_or_else(|e| {
                eprintln!("Error formatting marks: {}", e);
                std::process::exit(1);
            });
            println!("{}", json);
        }
        "summary" => {
            for report in &reports {
                println!(
                    "{}..{} open {}..{} close {}..{} content {:?}",
                    report.mark.from,
                    report.mark.to,
                    report.mark.open.from,
                    report.mark.open.to,
                    report.mark.close.from,
                    report.mark.close.to,
                    report.content,
                );
            }
            println!("{} mark(s)", reports.len());
        }
        other => {
            eprintln!("Unknown format: {}", other);
            eprintln!("Available formats: json, summary");
            std::process::exit(1);
        }
    }
}

fn handle_extract_command(path: &str, mark: &str) {
    let text = read_file(path);
    let mut registry = ParserRegistry::new();
    let parser = registry.get_or_create(mark);
    print!("{}", parser.extract_template_content(&text));
}

fn handle_records_command(path: &str) {
    let text = read_file(path);
    let items: Vec<ItemResult> = serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing {}: {}", path, e);
        std::process::exit(1);
    });
    let records = experiment_contrast_to_record_items(&items);
    let json = serde_json::to_string_pretty(&records).unwrap_or_else(|e| {
        eprintln!("Error formatting records: {}", e);
        std::process::exit(1);
    });
    println!("{}", json);
}
