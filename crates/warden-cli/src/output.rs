use colored::Colorize;
use serde_json::{Value, json};
use warden_auth::User;

use crate::cli::OutputFormat;

pub fn print_user(user: &User, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(&serde_json::to_value(user)?)?,
        OutputFormat::Text => {
            println!("{}: {}", "User".cyan(), user.name);
            println!("{}: {}", "Roles".cyan(), join_or_none(user.roles.iter()));
            if !user.attributes.is_empty() {
                println!("{}:", "Attributes".cyan());
                for (name, value) in &user.attributes {
                    println!("  {name} = {value}");
                }
            }
        }
    }
    Ok(())
}

pub fn print_exists(user: &User, exists: bool, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "name": user.name,
            "exists": exists,
            "roles": user.roles,
        }))?,
        OutputFormat::Text if exists => {
            print_success(&format!("{} exists", user.name));
            println!("{}: {}", "Roles".cyan(), join_or_none(user.roles.iter()));
        }
        OutputFormat::Text => print_error(&format!("{} not found", user.name)),
    }
    Ok(())
}

pub fn print_summary(
    path: &str,
    records: usize,
    without_hash: usize,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "path": path,
            "records": records,
            "without_hash": without_hash,
        }))?,
        OutputFormat::Text => {
            print_success(&format!("{path}: {records} records"));
            if without_hash > 0 {
                println!(
                    "{} {without_hash} record(s) have no hash and cannot log in by password",
                    "!".yellow()
                );
            }
        }
    }
    Ok(())
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn join_or_none<'a>(items: impl Iterator<Item = &'a String>) -> String {
    let joined = items.map(String::as_str).collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "(none)".to_string()
    } else {
        joined
    }
}
