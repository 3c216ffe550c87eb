// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::Parser;

use eventflux_window::core::config::stream_config::{FlatConfig, PropertySource};
use eventflux_window::core::config::{load_toml_config, ExternalTimeWindowConfig};
use eventflux_window::core::event::stream::{ComplexEventChunk, StreamEvent};
use eventflux_window::core::event::value::AttributeValue;
use eventflux_window::core::query::processor::stream::window::create_window_processor;
use eventflux_window::core::query::processor::{ProcessingMode, Processor};
use eventflux_window::query_api::definition::StreamDefinition;

#[derive(Parser, Debug)]
#[command(
    about = "Replay a JSON Lines event file through an externalTime window",
    author,
    version
)]
struct Cli {
    /// JSON Lines file, one array of attribute values per line
    events: PathBuf,

    /// Window configuration file (TOML)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// `[windows.<name>]` section to use; also the stream id
    #[arg(long, short = 'w', default_value = "Replay")]
    window: String,

    /// Stream schema, e.g. "symbol:string,price:double,ts:long"
    #[arg(long, short = 's')]
    schema: String,

    /// Override window properties (can be used multiple times)
    ///
    /// Examples:
    ///   --set timestamp=ts
    ///   --set window.time="5 sec"
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,
}

/// Prints every event it receives.
#[derive(Debug)]
struct PrintingProcessor {
    batches: Arc<Mutex<usize>>,
}

impl Processor for PrintingProcessor {
    fn process(&self, complex_event_chunk: ComplexEventChunk<StreamEvent>) {
        let mut batches = self
            .batches
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *batches += 1;
        for event in complex_event_chunk.iter() {
            let data: Vec<String> = event
                .before_window_data
                .iter()
                .map(ToString::to_string)
                .collect();
            println!(
                "#{:<5} {:<8} {:>14}  [{}]",
                *batches,
                event.event_type.to_string(),
                event.timestamp,
                data.join(", ")
            );
        }
    }

    fn next_processor(&self) -> Option<Arc<Mutex<dyn Processor>>> {
        None
    }

    fn set_next_processor(&mut self, _next: Option<Arc<Mutex<dyn Processor>>>) {}

    fn clone_processor(&self) -> Box<dyn Processor> {
        Box::new(PrintingProcessor {
            batches: Arc::new(Mutex::new(0)),
        })
    }

    fn get_query_name(&self) -> &str {
        "replay-printer"
    }

    fn get_processing_mode(&self) -> ProcessingMode {
        ProcessingMode::DEFAULT
    }

    fn is_stateful(&self) -> bool {
        false
    }
}

fn window_config(cli: &Cli) -> Result<FlatConfig, String> {
    let mut config = match &cli.config {
        Some(path) => load_toml_config(path)?
            .window(&cli.window)
            .cloned()
            .ok_or_else(|| format!("No [windows.{}] section in {}", cli.window, path.display()))?,
        None => FlatConfig::new(),
    };
    for entry in &cli.overrides {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| format!("Invalid override '{entry}', expected KEY=VALUE"))?;
        config.set(key.trim(), value.trim(), PropertySource::Programmatic);
    }
    Ok(config)
}

fn parse_line(definition: &StreamDefinition, line: &str) -> Result<Vec<AttributeValue>, String> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(line).map_err(|e| format!("not a JSON array: {e}"))?;
    let attributes = definition.get_attribute_list();
    if values.len() != attributes.len() {
        return Err(format!(
            "expected {} values, found {}",
            attributes.len(),
            values.len()
        ));
    }
    values
        .iter()
        .zip(attributes)
        .map(|(value, attribute)| AttributeValue::from_json(value, *attribute.get_type()))
        .collect()
}

fn run(cli: Cli) -> Result<(), String> {
    let definition = StreamDefinition::from_schema(&cli.window, &cli.schema)?;
    let config = window_config(&cli)?;
    let timestamp_index = ExternalTimeWindowConfig::from_flat_config(&config)
        .ok()
        .and_then(|c| definition.find_attribute(&c.timestamp_attribute))
        .map(|(index, _)| index);

    let mut window = create_window_processor(&definition, &config, &cli.window)
        .map_err(|e| format!("Failed to create window: {e}"))?;
    window.set_next_processor(Some(Arc::new(Mutex::new(PrintingProcessor {
        batches: Arc::new(Mutex::new(0)),
    }))));
    window.start();

    let file = File::open(&cli.events)
        .map_err(|e| format!("Failed to open {}: {e}", cli.events.display()))?;
    let mut replayed = 0usize;
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read {}: {e}", cli.events.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let data = parse_line(&definition, &line)
            .map_err(|e| format!("{}:{}: {e}", cli.events.display(), line_no + 1))?;
        let timestamp = timestamp_index
            .and_then(|i| data.get(i))
            .and_then(AttributeValue::as_i64)
            .unwrap_or_default();
        window.process(ComplexEventChunk::from(vec![StreamEvent::new_with_data(
            timestamp, data,
        )]));
        replayed += 1;
    }
    window.stop();

    let retained = window
        .current_state()
        .map_err(|e| format!("Failed to read window state: {e}"))?
        .values()
        .map(|list| list.len())
        .sum::<usize>();
    log::info!("replayed {replayed} event(s), {retained} still retained");
    println!("replayed {replayed} event(s), {retained} still retained");
    Ok(())
}

fn main() {
    // Initialize logging from RUST_LOG environment variable
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trades() -> StreamDefinition {
        StreamDefinition::from_schema("Trades", "ts:long, symbol:string").unwrap()
    }

    #[test]
    fn test_parse_line_follows_schema() {
        let data = parse_line(&trades(), r#"[1000, "IBM"]"#).unwrap();
        assert_eq!(
            data,
            vec![AttributeValue::Long(1000), AttributeValue::String("IBM".into())]
        );
        assert_eq!(
            parse_line(&trades(), r#"[null, "IBM"]"#).unwrap()[0],
            AttributeValue::Null
        );
    }

    #[test]
    fn test_parse_line_rejects_bad_input() {
        assert!(parse_line(&trades(), r#"{"ts": 1}"#).is_err());
        assert!(parse_line(&trades(), "[1000]").is_err());
        assert!(parse_line(&trades(), r#"["soon", "IBM"]"#).is_err());
    }

    #[test]
    fn test_overrides_without_config_file() {
        let cli = Cli::parse_from([
            "replay_window",
            "events.jsonl",
            "--schema",
            "ts:long",
            "--set",
            "timestamp=ts",
            "--set",
            "window.time = 5 sec",
        ]);
        let config = window_config(&cli).unwrap();
        assert_eq!(config.get("timestamp").map(String::as_str), Some("ts"));
        assert_eq!(config.get("window.time").map(String::as_str), Some("5 sec"));

        let bad = Cli::parse_from(["replay_window", "e", "-s", "ts:long", "--set", "novalue"]);
        assert!(window_config(&bad).is_err());
    }
}
