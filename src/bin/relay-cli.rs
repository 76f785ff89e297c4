use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::fs;

use events_relay::mapping::{EntryMap, OutboundPayload};
use events_relay::relay::Submission;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Operator CLI for the form submission relay", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a relay is up
    Health {
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Post a submission to a relay
    Submit {
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,

        #[arg(short, long, env = "EVENTS_WEBHOOK_SECRET", hide_env_values = true)]
        secret: String,

        /// Submitted field as `Label=Value`, repeatable
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Print the form body a submission would be relayed as, without sending it
    Preview {
        /// Entry map JSON, or `@path` to read it from a file
        #[arg(short, long, env = "FORM_ENTRY_MAP_JSON")]
        entry_map: String,

        /// Submitted field as `Label=Value`, repeatable
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(label, value)| (label.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected Label=Value, got '{raw}'"))
}

fn fields_to_object(fields: Vec<(String, String)>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(label, value)| (label, Value::String(value)))
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Health { url } => {
            let res = reqwest::Client::new().get(&url).send().await?;
            print_response(res).await?;
        }
        Commands::Submit { url, secret, fields } => {
            let mut body = fields_to_object(fields);
            body.insert("secret".to_string(), Value::String(secret));

            let res = reqwest::Client::new().post(&url).json(&body).send().await?;
            print_response(res).await?;
        }
        Commands::Preview { entry_map, fields } => {
            let raw = match entry_map.strip_prefix('@') {
                Some(path) => fs::read_to_string(path)?,
                None => entry_map,
            };
            let map = EntryMap::from_json(&raw)?;
            let submission = Submission::from(fields_to_object(fields));
            let payload = OutboundPayload::build(&map, &submission);

            for (key, value) in payload.iter() {
                println!("{key} = {value}");
            }
            println!();
            println!("{}", payload.encode());
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}\n{}", status, serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}\n{}", status, text),
    }

    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
    }
    Ok(())
}
