use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use jnode_core::{FileStore, NodeView, Notifier, Segment};

#[derive(Parser, Debug)]
#[command(
    name = "jnode",
    about = "Inspect and edit single nodes of a JSON document by structural path",
    version
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Re-serialize a document in canonical 2-space form
    Show(ShowArgs),
    /// List the field rows of the node at a path
    Rows(NodeArgs),
    /// Print the seeded edit buffer for the node at a path
    Seed(SeedArgs),
    /// Print the value at a path
    Get(NodeArgs),
    /// Apply a value at a path; prints or writes with --out / --in-place
    Set(SetArgs),
}

#[derive(ClapArgs, Debug)]
struct ShowArgs {
    /// JSON document to read
    file: PathBuf,
}

#[derive(ClapArgs, Debug)]
struct NodeArgs {
    /// JSON document to read
    file: PathBuf,
    /// Node locator, e.g. $["users"][2]["name"]
    #[arg(long = "path", short = 'p', value_name = "LOCATOR")]
    node: String,
}

#[derive(ClapArgs, Debug)]
struct SeedArgs {
    /// JSON document to read
    file: PathBuf,
    /// Node locator, e.g. $["users"][2]["name"]
    #[arg(long = "path", short = 'p', value_name = "LOCATOR")]
    node: String,
    /// Print the locator label before the buffer
    #[arg(long, default_value_t = false)]
    label: bool,
}

#[derive(ClapArgs, Debug)]
struct SetArgs {
    /// JSON document to edit
    file: PathBuf,
    /// Node locator; $ targets the document root
    #[arg(long = "path", short = 'p', value_name = "LOCATOR")]
    node: String,
    /// New value as raw JSON (e.g., 123, true, "str", {"a":1})
    #[arg(long)]
    value: String,
    /// Optional output path to write; otherwise prints to stdout
    #[arg(long, conflicts_with = "in_place")]
    out: Option<PathBuf>,
    /// Save back into the input file
    #[arg(long, default_value_t = false)]
    in_place: bool,
    /// Write a timestamped .bak copy before an in-place save
    #[arg(long, default_value_t = false, requires = "in_place")]
    backup: bool,
}

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Show(a) => cmd_show(a),
        Cmd::Rows(a) => cmd_rows(a),
        Cmd::Seed(a) => cmd_seed(a),
        Cmd::Get(a) => cmd_get(a),
        Cmd::Set(a) => cmd_set(a),
    }
}

fn load_document(path: &PathBuf) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(2);
    })
}

fn parse_document(text: &str) -> serde_json::Value {
    serde_json::from_str(text).unwrap_or_else(|e| {
        eprintln!("invalid JSON: {}", e);
        std::process::exit(2);
    })
}

fn parse_locator(input: &str) -> Vec<Segment> {
    jnode_core::parse_path(input).unwrap_or_else(|e| {
        eprintln!("invalid path: {}", e);
        std::process::exit(2);
    })
}

fn cmd_show(args: ShowArgs) {
    let value = parse_document(&load_document(&args.file));
    match jnode_core::to_canonical(&value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    }
}

fn cmd_rows(args: NodeArgs) {
    let value = parse_document(&load_document(&args.file));
    let node = parse_locator(&args.node);
    match jnode_core::rows_at(&value, &node) {
        Some(rows) => {
            for row in rows {
                println!(
                    "{}\t{:?}\t{}",
                    row.key.as_deref().unwrap_or("-"),
                    row.kind,
                    row.value
                );
            }
        }
        None => {
            eprintln!("not found: {}", jnode_core::format_path(&node));
            std::process::exit(3);
        }
    }
}

fn cmd_seed(args: SeedArgs) {
    let value = parse_document(&load_document(&args.file));
    let node = parse_locator(&args.node);
    let view = NodeView::open(&value, &node);
    if args.label {
        println!("{}", view.label);
    }
    println!("{}", view.buffer);
}

fn cmd_get(args: NodeArgs) {
    let value = parse_document(&load_document(&args.file));
    let node = parse_locator(&args.node);
    match jnode_core::value_at(&value, &node) {
        Some(found) => match jnode_core::to_canonical(found) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(2);
            }
        },
        None => {
            eprintln!("not found: {}", jnode_core::format_path(&node));
            std::process::exit(3);
        }
    }
}

fn cmd_set(args: SetArgs) {
    let node = parse_locator(&args.node);
    if args.in_place {
        // The host save flow: value text is the edit buffer.
        let mut store = FileStore::new(&args.file).with_backup(args.backup);
        let mut notify = StderrNotifier;
        if !jnode_core::save_node(&mut store, &node, &args.value, &mut notify) {
            std::process::exit(4);
        }
        return;
    }
    let new_value: serde_json::Value = serde_json::from_str(&args.value).unwrap_or_else(|e| {
        eprintln!("invalid --value JSON: {}", e);
        std::process::exit(3);
    });
    let text = load_document(&args.file);
    let updated = jnode_core::apply_update(&text, &node, new_value).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(4);
    });
    if let Some(out) = args.out {
        std::fs::write(&out, updated).unwrap_or_else(|e| {
            eprintln!("error writing: {}", e);
            std::process::exit(5);
        });
    } else {
        println!("{}", updated);
    }
}

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn info(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn error(&mut self, message: &str) {
        eprintln!("error: {}", message);
    }
}
