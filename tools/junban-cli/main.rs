use clap::Parser;
use junban::error::format_node_list;
use junban::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// --- JSON Deserialization Structs (Input Format Specific) ---
// These structs match the `flow.json` format and are only used here for conversion.

#[derive(Deserialize)]
struct RawFlow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    inputs: Vec<RawInput>,
    nodes: Vec<RawNode>,
    #[serde(default)]
    outputs: Vec<RawOutput>,
}

#[derive(Deserialize)]
struct RawInput {
    name: String,
    #[serde(default)]
    default: Option<serde_json::Value>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct RawOutput {
    name: String,
    reference: serde_json::Value,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct RawNode {
    name: String,
    #[serde(default)]
    aggregation: bool,
    #[serde(default)]
    inputs: Vec<RawBinding>,
    #[serde(default)]
    skip: Option<RawSkip>,
    #[serde(default, alias = "activate_config")]
    activate: Option<RawActivate>,
}

#[derive(Deserialize)]
struct RawBinding {
    name: String,
    value: serde_json::Value,
}

#[derive(Deserialize)]
struct RawSkip {
    when: serde_json::Value,
    is: serde_json::Value,
    #[serde(rename = "return")]
    return_value: serde_json::Value,
}

#[derive(Deserialize)]
struct RawActivate {
    when: serde_json::Value,
    is: serde_json::Value,
}

// --- Converter Implementation ---
// This implements the conversion from the raw JSON model to Junban's canonical Flow.

/// Interprets `${inputs.<name>}` and `${<node>.output[.<property>]}` strings as references,
/// anything else as a literal.
fn parse_value(raw: serde_json::Value) -> Result<InputValue, FlowConversionError> {
    let is_reference = raw
        .as_str()
        .is_some_and(|text| text.starts_with("${") && text.ends_with('}'));
    if !is_reference {
        return Ok(InputValue::Literal { value: raw });
    }
    let text = raw.as_str().unwrap_or_default();
    let body = &text[2..text.len() - 1];
    let invalid = || FlowConversionError::InvalidReference(text.to_string());

    let (head, rest) = body.split_once('.').ok_or_else(invalid)?;
    if head == "inputs" {
        return if rest.is_empty() {
            Err(invalid())
        } else {
            Ok(InputValue::flow_input(rest))
        };
    }

    match rest.split_once('.') {
        None if rest == "output" => Ok(InputValue::node_output(head)),
        Some(("output", property)) if !property.is_empty() => {
            Ok(InputValue::node_property(head, property))
        }
        _ => Err(invalid()),
    }
}

impl IntoFlow for RawFlow {
    fn into_flow(self) -> Result<Flow, FlowConversionError> {
        let inputs = self
            .inputs
            .into_iter()
            .map(|raw| FlowInput {
                name: raw.name,
                default: raw.default,
                description: raw.description,
            })
            .collect();

        let nodes = self
            .nodes
            .into_iter()
            .map(|raw| -> Result<Node, FlowConversionError> {
                if raw.name.trim().is_empty() {
                    return Err(FlowConversionError::ValidationError(
                        "every node needs a non-empty name".to_string(),
                    ));
                }
                let inputs = raw
                    .inputs
                    .into_iter()
                    .map(|binding| -> Result<InputBinding, FlowConversionError> {
                        Ok(InputBinding {
                            name: binding.name,
                            value: parse_value(binding.value)?,
                        })
                    })
                    .collect::<Result<Vec<_>, FlowConversionError>>()?;
                let skip = raw
                    .skip
                    .map(|skip| -> Result<SkipCondition, FlowConversionError> {
                        Ok(SkipCondition {
                            condition: parse_value(skip.when)?,
                            condition_value: skip.is,
                            return_value: parse_value(skip.return_value)?,
                        })
                    })
                    .transpose()?;
                let activate = raw
                    .activate
                    .map(|activate| -> Result<ActivateCondition, FlowConversionError> {
                        Ok(ActivateCondition {
                            condition: parse_value(activate.when)?,
                            condition_value: activate.is,
                        })
                    })
                    .transpose()?;

                Ok(Node {
                    name: raw.name,
                    kind: if raw.aggregation {
                        NodeKind::Aggregation
                    } else {
                        NodeKind::Ordinary
                    },
                    inputs,
                    skip,
                    activate,
                })
            })
            .collect::<Result<Vec<_>, FlowConversionError>>()?;

        let outputs = self
            .outputs
            .into_iter()
            .map(|raw| -> Result<FlowOutput, FlowConversionError> {
                Ok(FlowOutput {
                    name: raw.name,
                    reference: parse_value(raw.reference)?,
                    description: raw.description,
                })
            })
            .collect::<Result<Vec<_>, FlowConversionError>>()?;

        Ok(Flow {
            name: self.name.unwrap_or_else(|| "flow".to_string()),
            inputs,
            nodes,
            outputs,
        })
    }
}

// --- Report ---

#[derive(Serialize)]
struct Report<'a> {
    flow: &'a str,
    order: Vec<&'a str>,
    aggregation_nodes: Vec<&'a str>,
    outputs: Vec<ReportOutput<'a>>,
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    name: &'a str,
    reference: String,
}

impl<'a> Report<'a> {
    fn new(validated: &'a ValidatedFlow) -> Self {
        let flow = &validated.flow;
        Self {
            flow: &flow.name,
            order: flow.node_names(),
            aggregation_nodes: flow
                .nodes
                .iter()
                .filter(|n| n.is_aggregation())
                .map(|n| n.name.as_str())
                .collect(),
            outputs: validated
                .pre_aggregation_outputs
                .iter()
                .map(|o| ReportOutput {
                    name: &o.name,
                    reference: o.reference.to_string(),
                })
                .collect(),
        }
    }
}

/// Validates a flow definition and prints its execution order
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the flow JSON file
    flow_path: String,

    /// Accept references to flow inputs the flow does not declare
    #[arg(long)]
    no_input_check: bool,

    /// Print the result as a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Enable debug logging for the validator (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run_validation(cli);
}

fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("junban=debug,warn")
        } else {
            EnvFilter::new("junban=info,warn")
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(verbose).with_writer(std::io::stderr))
        .init();
}

fn run_validation(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. File Loading and Conversion ---
    let load_start = Instant::now();
    let flow_json = fs::read_to_string(&cli.flow_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read flow file '{}': {}",
            &cli.flow_path, e
        ))
    });
    let raw_flow: RawFlow = serde_json::from_str(&flow_json).unwrap_or_else(|e| {
        exit_with_error(&FlowConversionError::ParseError(e.to_string()).to_string())
    });
    let flow = raw_flow
        .into_flow()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert flow: {}", e)));
    let load_duration = load_start.elapsed();

    // --- 2. Validation ---
    let validate_start = Instant::now();
    let validator = FlowValidator::builder()
        .with_input_check(!cli.no_input_check)
        .build();
    let validated = validator
        .validate(flow)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let validate_duration = validate_start.elapsed();

    let report = Report::new(&validated);
    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to render report: {}", e)));
        println!("{}", json);
        return;
    }

    // --- 3. Results and Summary ---
    println!("\nFlow '{}' is valid.", report.flow);
    println!("\n--- Execution Order ---");
    for (position, name) in report.order.iter().enumerate() {
        let marker = if report.aggregation_nodes.contains(name) {
            " (aggregation)"
        } else {
            ""
        };
        println!("{:>4}. {}{}", position + 1, name, marker);
    }

    println!("\n--- Pre-Aggregation Outputs ---");
    if report.outputs.is_empty() {
        println!("  (none)");
    }
    for output in &report.outputs {
        println!("  {} <- {}", output.name, output.reference);
    }
    if !report.aggregation_nodes.is_empty() {
        println!(
            "\nAggregation nodes: {}",
            format_node_list(&report.aggregation_nodes)
        );
    }

    let total_duration = total_start.elapsed();
    println!("\n--- Performance Summary ---");
    println!("Loading & Conversion: {:?}", load_duration);
    println!("Validation:           {:?}", validate_duration);
    println!("-----------------------------");
    println!("Total Execution:      {:?}", total_duration);
    println!();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
