//! Full scripted journey on the mock generator: run eight rounds, print the
//! per-round choices as session events arrive, then the summary.
//!
//! Run: `cargo run -p neuropath-examples --example scripted_journey`

use std::sync::Arc;

use tokio_stream::StreamExt;

use neuropath::{JourneyRunner, MockGenerator, Phase, SessionEvent};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut runner = JourneyRunner::new(Arc::new(MockGenerator::new()));
    let mut events = runner.subscribe(256);

    runner.start("History of Coffee").await?;
    while runner.view().phase == Phase::Playing {
        let view = runner.view();
        // Always take the middle card, like an undecided reader would.
        let pick = &view.options[1];
        println!("round {}: choosing {:?}", view.round, pick.title);
        runner.choose(&pick.id).await?;
    }

    let view = runner.view();
    let summary = view.summary.expect("terminal session has a summary");
    println!("\n{}\n{}", summary.title, summary.summary);
    for takeaway in &summary.key_takeaways {
        println!("  - {}", takeaway);
    }

    drop(runner);
    println!("\nsession events:");
    while let Some(event) = events.next().await {
        match event {
            SessionEvent::OptionsReady { round } => println!("  options ready for round {}", round),
            SessionEvent::SummaryReady => println!("  summary ready"),
            other => println!("  {:?}", other),
        }
    }

    Ok(())
}
