//! Canopy CLI — inspect disclosure graphs and dry-run panel bundles.
//!
//! Usage:
//!   canopy inspect --data graph.json [--root root]
//!   canopy hierarchy --data graph.json [--root root]
//!   canopy walk --data graph.json [--root root] <node>...
//!   canopy panel <panel-id> --panels dir

use canopy::content::label;
use canopy::{
    CanopyApi, DirFetcher, GraphData, GraphStore, MemorySurface, Node, NodeId, PanelState,
    SurfaceContent,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "canopy",
    version,
    about = "Progressive-disclosure graph engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a dataset: counts, dropped links, unreachable nodes
    Inspect {
        /// Path to the graph dataset JSON
        #[arg(long)]
        data: PathBuf,
        /// Root node id
        #[arg(long, default_value = "root")]
        root: String,
    },
    /// Print the BFS hierarchy as a tree
    Hierarchy {
        /// Path to the graph dataset JSON
        #[arg(long)]
        data: PathBuf,
        /// Root node id
        #[arg(long, default_value = "root")]
        root: String,
    },
    /// Activate nodes in order and trace disclosure state
    Walk {
        /// Path to the graph dataset JSON
        #[arg(long)]
        data: PathBuf,
        /// Root node id
        #[arg(long, default_value = "root")]
        root: String,
        /// Node ids to activate, in order
        #[arg(required = true)]
        nodes: Vec<String>,
    },
    /// Dry-run a panel bundle against an in-memory surface
    Panel {
        /// Panel bundle id
        panel_id: String,
        /// Directory containing the panels/ namespace
        #[arg(long, default_value = ".")]
        panels: PathBuf,
    },
}

fn load_dataset(path: &PathBuf) -> Result<GraphData, String> {
    GraphData::load(path).map_err(|e| format!("Failed to load dataset: {}", e))
}

fn cmd_inspect(data_path: &PathBuf, root: &str) -> i32 {
    let data = match load_dataset(data_path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let raw_links = data.links.len();
    let store = GraphStore::build(data, root);

    println!("nodes: {}", store.node_count());
    println!("links: {} ({} dropped)", store.link_count(), raw_links - store.link_count());

    let unreachable: Vec<&NodeId> = store
        .nodes()
        .map(|n| &n.id)
        .filter(|&id| !store.is_reachable(id))
        .collect();
    if store.is_reachable(&NodeId::from(root)) {
        println!("root: {}", root);
    } else {
        println!("root: {} (absent — hierarchy is empty)", root);
    }
    println!("unreachable: {}", unreachable.len());
    for id in unreachable {
        println!("  {}", id);
    }
    0
}

fn print_subtree(store: &GraphStore, id: &NodeId, depth: usize) {
    let display = store
        .node_by_id(id)
        .map(|n| n.display_title().to_string())
        .unwrap_or_else(|| id.to_string());
    let lines = label::wrap_label(&display, label::DEFAULT_MAX_CHARS);
    let text = if lines.is_empty() {
        id.to_string()
    } else {
        lines.join(" / ")
    };
    println!("{}{} [{}]", "  ".repeat(depth), text, id);
    for child in store.children_of(id) {
        print_subtree(store, child, depth + 1);
    }
}

fn cmd_hierarchy(data_path: &PathBuf, root: &str) -> i32 {
    let data = match load_dataset(data_path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let store = GraphStore::build(data, root);

    let root_id = NodeId::from(root);
    if !store.is_reachable(&root_id) {
        eprintln!("Error: root '{}' is not in the dataset", root);
        return 1;
    }
    print_subtree(&store, &root_id, 0);
    0
}

fn cmd_walk(data_path: &PathBuf, root: &str, nodes: &[String]) -> i32 {
    let data = match load_dataset(data_path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let store = Arc::new(GraphStore::build(data, root));
    let surface = Arc::new(MemorySurface::new());
    let fetcher = Arc::new(DirFetcher::new("."));
    let api = CanopyApi::new(store, surface, fetcher);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to create tokio runtime: {}", e);
            return 1;
        }
    };

    rt.block_on(async {
        for id in nodes {
            let routed = api.activate(id).await;
            api.reveal_neighbors(id);
            if routed.is_none() {
                println!("-- {} (unknown, ignored)", id);
                continue;
            }
            let mut visible: Vec<String> = api
                .visible_nodes()
                .into_iter()
                .map(|n| n.to_string())
                .collect();
            visible.sort();
            let highlights = api.highlights();
            let mut lit_nodes: Vec<String> =
                highlights.nodes.iter().map(|n| n.to_string()).collect();
            lit_nodes.sort();
            let mut lit_links: Vec<String> =
                highlights.links.iter().map(|k| k.to_string()).collect();
            lit_links.sort();

            println!("-- {}", id);
            println!("   visible:    {}", visible.join(", "));
            println!("   highlights: {}", lit_nodes.join(", "));
            println!("   links:      {}", lit_links.join(", "));
        }
    });
    0
}

fn cmd_panel(panel_id: &str, panels_dir: &PathBuf) -> i32 {
    let surface = Arc::new(MemorySurface::new());
    let fetcher = Arc::new(DirFetcher::new(panels_dir.clone()));
    let manager = canopy::PanelManager::new(surface.clone(), fetcher);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to create tokio runtime: {}", e);
            return 1;
        }
    };

    let node = Node::new(panel_id);
    let state = rt.block_on(manager.load_panel(panel_id, &node));

    match state {
        PanelState::Mounted { panel_id, .. } => {
            println!("mounted: {}", panel_id);
            if let SurfaceContent::Panel { markup, .. } = surface.content() {
                println!("markup:  {} bytes", markup.len());
            }
            let styles = surface.styles();
            println!("styles:  {}", styles.len());
            0
        }
        PanelState::Error { .. } => {
            if let SurfaceContent::Error { message } = surface.content() {
                eprintln!("Error: {}", message);
            } else {
                eprintln!("Error: panel load failed");
            }
            1
        }
        other => {
            if let SurfaceContent::Error { message } = surface.content() {
                eprintln!("Error: {}", message);
            } else {
                eprintln!("Error: panel did not mount ({:?})", other);
            }
            1
        }
    }
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let code = match &cli.command {
        Commands::Inspect { data, root } => cmd_inspect(data, root),
        Commands::Hierarchy { data, root } => cmd_hierarchy(data, root),
        Commands::Walk { data, root, nodes } => cmd_walk(data, root, nodes),
        Commands::Panel { panel_id, panels } => cmd_panel(panel_id, panels),
    };
    std::process::exit(code);
}
