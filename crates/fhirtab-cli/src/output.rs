use colored::Colorize;
use fhirtab_core::DisplayRow;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;

pub fn print_rows(names: &[&str], rows: &[DisplayRow], format: OutputFormat) {
    match format {
        OutputFormat::Pipe => {
            for line in fhirtab_core::render(rows) {
                println!("{line}");
            }
        }
        OutputFormat::Table => print_table(names, rows),
        OutputFormat::Json => print_json(names, rows),
    }
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

fn print_table(names: &[&str], rows: &[DisplayRow]) {
    if rows.is_empty() {
        println!("No resources found.");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(names.iter().copied());
    for row in rows {
        builder.push_record(row.fields().iter().map(String::as_str));
    }
    let table = builder.build().with(Style::rounded()).to_string();
    println!("{table}");
    println!("Total: {}", rows.len());
}

fn print_json(names: &[&str], rows: &[DisplayRow]) {
    let objects: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            names
                .iter()
                .zip(row.fields())
                .map(|(name, field)| ((*name).to_string(), serde_json::Value::from(field.clone())))
                .collect::<serde_json::Map<_, _>>()
                .into()
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::Value::Array(objects)).unwrap()
    );
}
