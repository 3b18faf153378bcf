use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};
use std::fs;

/// A CLI tool to generate random flow definitions for the Junban validator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// The number of nodes to generate
    #[arg(short, long, default_value_t = 50)]
    nodes: usize,

    /// The probability that a node reads the output of any given earlier node
    #[arg(long, default_value_t = 0.1)]
    edge_probability: f64,

    /// The share of nodes, taken from the end of the graph, that aggregate
    #[arg(long, default_value_t = 0.1)]
    aggregation_ratio: f64,

    /// Close one dependency cycle so that validation must fail
    #[arg(long)]
    cycle: bool,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

struct GeneratedNode {
    name: String,
    aggregation: bool,
    inputs: Vec<Value>,
    skip: Option<Value>,
    activate: Option<Value>,
}

impl GeneratedNode {
    fn to_json(&self) -> Value {
        let mut node = json!({
            "name": self.name,
            "aggregation": self.aggregation,
            "inputs": self.inputs,
        });
        if let Some(skip) = &self.skip {
            node["skip"] = skip.clone();
        }
        if let Some(activate) = &self.activate {
            node["activate"] = activate.clone();
        }
        node
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    // Add validation to ensure the probabilities are usable
    if !(0.0..=1.0).contains(&cli.edge_probability) || !(0.0..=1.0).contains(&cli.aggregation_ratio)
    {
        eprintln!("Error: --edge-probability and --aggregation-ratio must be within 0.0 and 1.0");
        std::process::exit(1);
    }
    if cli.cycle && cli.nodes < 2 {
        eprintln!("Error: --cycle needs at least 2 nodes");
        std::process::exit(1);
    }

    println!(
        "Generating a flow with {} nodes (edge probability {})...",
        cli.nodes, cli.edge_probability
    );

    let mut nodes = generate_nodes(&mut rng, &cli);
    if cli.cycle {
        close_cycle(&mut rng, &mut nodes);
    }
    let outputs = generate_outputs(&nodes);

    // Declaration order should not give the valid order away.
    nodes.shuffle(&mut rng);

    let flow = json!({
        "name": "generated_flow",
        "inputs": [{ "name": "seed", "default": 0 }],
        "nodes": nodes.iter().map(GeneratedNode::to_json).collect::<Vec<_>>(),
        "outputs": outputs,
    });

    let json_output = serde_json::to_string_pretty(&flow)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved flow definition to '{}'",
        cli.output
    );

    Ok(())
}

fn node_name(index: usize) -> String {
    format!("node_{:04}", index)
}

fn node_ref(index: usize) -> String {
    format!("${{{}.output}}", node_name(index))
}

/// Builds nodes in a valid order: node `i` only ever references nodes `j < i`.
fn generate_nodes(rng: &mut StdRng, cli: &Cli) -> Vec<GeneratedNode> {
    let aggregation_start = cli.nodes - (cli.nodes as f64 * cli.aggregation_ratio) as usize;

    (0..cli.nodes)
        .map(|i| {
            let mut inputs = vec![json!({ "name": "seed", "value": "${inputs.seed}" })];
            let mut skip = None;
            let mut activate = None;

            for j in 0..i {
                if !rng.random_bool(cli.edge_probability) {
                    continue;
                }
                // Aggregation nodes are only ever read by other aggregation nodes.
                if j >= aggregation_start && i < aggregation_start {
                    continue;
                }
                match rng.random_range(0..10) {
                    0 if skip.is_none() => {
                        skip = Some(json!({
                            "when": node_ref(j),
                            "is": true,
                            "return": "skipped",
                        }));
                    }
                    1 if activate.is_none() => {
                        activate = Some(json!({ "when": node_ref(j), "is": "go" }));
                    }
                    _ => inputs.push(json!({
                        "name": format!("in_{}", node_name(j)),
                        "value": node_ref(j),
                    })),
                }
            }

            GeneratedNode {
                name: node_name(i),
                aggregation: i >= aggregation_start,
                inputs,
                skip,
                activate,
            }
        })
        .collect()
}

/// Makes an earlier node read a later one that already reads it back.
fn close_cycle(rng: &mut StdRng, nodes: &mut [GeneratedNode]) {
    let later = rng.random_range(1..nodes.len());
    let earlier = rng.random_range(0..later);

    nodes[later].inputs.push(json!({
        "name": "cycle_in",
        "value": node_ref(earlier),
    }));
    nodes[earlier].inputs.push(json!({
        "name": "cycle_back",
        "value": node_ref(later),
    }));
    println!(
        "Closed a cycle between '{}' and '{}'",
        node_name(earlier),
        node_name(later)
    );
}

/// One output per node whose result nobody reads.
fn generate_outputs(nodes: &[GeneratedNode]) -> Vec<Value> {
    let referenced: Vec<String> = nodes
        .iter()
        .flat_map(|n| n.inputs.iter())
        .filter_map(|input| input["value"].as_str().map(str::to_string))
        .collect();

    nodes
        .iter()
        .enumerate()
        .filter(|(i, _)| !referenced.contains(&node_ref(*i)))
        .map(|(i, n)| json!({ "name": format!("{}_result", n.name), "reference": node_ref(i) }))
        .collect()
}
