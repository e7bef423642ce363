//! NeuroPath binary: parse the command line and run an interactive journey.

use clap::Parser;
use neuropath_cli::{run, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "neuropath")]
#[command(about = "Interactive 8-round knowledge journey with a generated card graph")]
struct Args {
    /// Topic to explore (also accepted as positional arguments)
    #[arg(short, long, value_name = "TEXT")]
    topic: Option<String>,

    /// Positional topic words (when -t/--topic is not used)
    #[arg(trailing_var_arg = true)]
    rest: Vec<String>,

    /// Use the scripted offline generator instead of a model
    #[arg(long)]
    mock: bool,

    /// Seed for a reproducible graph layout
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

fn get_topic(args: &Args) -> String {
    if let Some(ref t) = args.topic {
        return t.clone();
    }
    args.rest.join(" ").trim().to_string()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let topic = get_topic(&args);
    if topic.is_empty() {
        eprintln!("error: a topic is required (e.g. `neuropath \"History of Coffee\"`)");
        std::process::exit(2);
    }

    let options = RunOptions {
        topic,
        mock: args.mock,
        seed: args.seed,
    };

    if let Err(e) = run(options).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
