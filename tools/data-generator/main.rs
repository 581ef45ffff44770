use clap::Parser;
use mece::prelude::*;
use mece::model::{
    AgentDefinition, AtomNode, BranchNode, Dimension, ExecutionType, ExternalIntegration,
    HumanInstruction, IntegrationMethod, LoopSpec, ModelTier, Protocol, SourceType, ToolInvocation,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;

/// A CLI tool to generate structurally valid decomposition JSON for testing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_decomposition.json")]
    output: String,

    /// Depth of the generated tree (branches above, atoms at the bottom)
    #[arg(long, default_value_t = 3)]
    depth: u32,

    /// Children per branch
    #[arg(long, default_value_t = 3)]
    fanout: usize,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !(2..=7).contains(&cli.fanout) {
        eprintln!("Error: --fanout ({}) must be between 2 and 7", cli.fanout);
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "Generating decomposition (depth {}, fan-out {})...",
        cli.depth, cli.fanout
    );

    let tree = generate_branch(&mut rng, "1".to_string(), None, 0, cli.depth, cli.fanout);
    let dependencies = generate_dependencies(&tree);
    let summary = compute_summary(&mut rng, &tree);

    let decomposition = Decomposition {
        metadata: generate_metadata(),
        tree,
        cross_branch_dependencies: dependencies,
        validation_summary: summary,
    };

    let json_output = serde_json::to_string_pretty(&decomposition)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved decomposition to '{}'",
        cli.output
    );

    Ok(())
}

fn generate_metadata() -> Metadata {
    Metadata {
        scope: "Synthetic order fulfillment process".to_string(),
        trigger: "Customer submits an order".to_string(),
        completion_criteria: "Order delivered and confirmed".to_string(),
        decomposition_dimension: Dimension::Temporal,
        dimension_rationale: "Process stages follow a natural time sequence".to_string(),
        source_type: SourceType::Hybrid,
        inclusions: vec!["standard orders".to_string()],
        exclusions: vec!["bulk contracts".to_string()],
        version: "1.0".to_string(),
        created_at: "2026-01-01T00:00:00Z".to_string(),
    }
}

fn generate_branch(
    rng: &mut StdRng,
    id: String,
    parent_id: Option<String>,
    depth: u32,
    max_depth: u32,
    fanout: usize,
) -> Node {
    let orchestration = match rng.random_range(0..4u8) {
        0 => Orchestration::Sequential,
        1 => Orchestration::Parallel,
        2 => Orchestration::Conditional,
        _ => Orchestration::Loop,
    };

    let children = (1..=fanout)
        .map(|i| {
            let child_id = format!("{id}.{i}");
            if depth + 1 < max_depth {
                generate_branch(rng, child_id, Some(id.clone()), depth + 1, max_depth, fanout)
            } else {
                generate_atom(rng, child_id, id.clone(), depth + 1)
            }
        })
        .collect();

    Node::Branch(BranchNode {
        label: format!("Stage {id}"),
        description: format!("Synthetic process stage {id}"),
        depth,
        parent_id,
        orchestration,
        orchestration_rationale: "Generated for structural testing".to_string(),
        condition: matches!(orchestration, Orchestration::Conditional)
            .then(|| "amount > threshold".to_string()),
        loop_spec: matches!(orchestration, Orchestration::Loop).then(|| LoopSpec {
            iterator: "item".to_string(),
            termination: "all items processed".to_string(),
            max_iterations: Some(10),
        }),
        children,
        id,
    })
}

fn generate_atom(rng: &mut StdRng, id: String, parent_id: String, depth: u32) -> Node {
    let execution_type = match rng.random_range(0..4u8) {
        0 => ExecutionType::Agent,
        1 => ExecutionType::Human,
        2 => ExecutionType::Tool,
        _ => ExecutionType::External,
    };

    let mut spec = AtomSpec {
        estimated_duration: "5 minutes".to_string(),
        inputs: vec!["order record".to_string()],
        outputs: vec!["processed record".to_string()],
        error_modes: vec!["upstream data missing".to_string()],
        execution_type,
        agent_definition: None,
        human_instruction: None,
        tool_invocation: None,
        external_integration: None,
    };

    match execution_type {
        ExecutionType::Agent => {
            spec.agent_definition = Some(AgentDefinition {
                name: format!("worker-{id}"),
                description: "Processes one synthetic step".to_string(),
                prompt: "Process the record and report the outcome.".to_string(),
                tools: vec!["read_record".to_string(), "write_record".to_string()],
                model: ModelTier::Mid,
                model_rationale: "Routine structured work".to_string(),
                max_turns: Some(5),
            });
        }
        ExecutionType::Human => {
            spec.human_instruction = Some(HumanInstruction {
                action: "Review the record".to_string(),
                context: "Generated review step".to_string(),
                decision_criteria: "Record is complete and consistent".to_string(),
                escalation_path: None,
                integration_method: IntegrationMethod::Manual,
            });
        }
        ExecutionType::Tool => {
            let mut parameters = serde_json::Map::new();
            parameters.insert("record_id".to_string(), serde_json::json!("{{input}}"));
            spec.tool_invocation = Some(ToolInvocation {
                tool_name: "record_processor".to_string(),
                parameters,
                retry_policy: None,
                max_retries: None,
            });
        }
        ExecutionType::External => {
            spec.external_integration = Some(ExternalIntegration {
                system: "inventory-service".to_string(),
                operation: "reserve_stock".to_string(),
                protocol: Protocol::RestApi,
                timeout: Some("30s".to_string()),
                fallback: None,
            });
        }
    }

    Node::Atom(AtomNode {
        label: format!("Step {id}"),
        description: format!("Synthetic atomic step {id}"),
        depth,
        parent_id: Some(parent_id),
        atom_spec: Some(spec),
        id,
    })
}

/// One data dependency between the first leaves of the first two top-level
/// branches, when the tree is deep enough to have any.
fn generate_dependencies(tree: &Node) -> Vec<CrossBranchDependency> {
    let top = tree.children();
    if top.len() < 2 {
        return vec![];
    }

    let first_leaf = |node: &Node| -> Option<String> {
        let mut leaf = None;
        node.visit(&mut |n| {
            if !n.is_branch() && leaf.is_none() {
                leaf = Some(n.id().to_string());
            }
        });
        leaf
    };

    match (first_leaf(&top[0]), first_leaf(&top[1])) {
        (Some(from_id), Some(to_id)) => vec![CrossBranchDependency {
            from_id,
            to_id,
            dependency_type: mece::model::DependencyKind::Data,
            description: "Processed record feeds the next stage".to_string(),
            artifact: Some("processed record".to_string()),
        }],
        _ => vec![],
    }
}

fn compute_summary(rng: &mut StdRng, tree: &Node) -> ValidationSummary {
    let mut total_nodes = 0;
    let mut total_atoms = 0;
    let mut total_branches = 0;
    let mut max_depth = 0;
    let mut max_fan_out = 0;

    tree.visit(&mut |node| {
        total_nodes += 1;
        if node.is_branch() {
            total_branches += 1;
            max_fan_out = max_fan_out.max(node.children().len() as u32);
        } else {
            total_atoms += 1;
        }
        max_depth = max_depth.max(node.depth());
    });

    ValidationSummary {
        me_score: rng.random_range(0.85..1.0),
        ce_score: rng.random_range(0.85..1.0),
        overall_score: rng.random_range(0.85..1.0),
        levels_assessed: max_depth + 1,
        total_nodes,
        total_atoms,
        total_branches,
        max_depth,
        max_fan_out,
        issues: vec![],
    }
}
