//! Interactive terminal front-end for neuropath journeys.
//!
//! Drives a [`JourneyRunner`] from stdin: print the offered cards, read a
//! 1-3 choice, repeat for eight rounds, then print the summary and a settled
//! text rendering of the knowledge graph. Uses the OpenAI-backed generator
//! when credentials are present (feature `openai`), the scripted mock
//! otherwise.

pub mod render;

use std::io::{BufRead, Write};
use std::sync::Arc;

use neuropath::{
    build_graph, CardGenerator, ForceSimulation, JourneyError, JourneyRunner, LayoutParams,
    MockGenerator, Phase,
};

/// Options resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Topic to explore.
    pub topic: String,
    /// Force the scripted offline generator.
    pub mock: bool,
    /// Seed for a reproducible layout.
    pub seed: Option<u64>,
}

/// Picks the generator: OpenAI-compatible when the feature is on and
/// credentials are present, the scripted mock otherwise.
fn build_generator(options: &RunOptions) -> Arc<dyn CardGenerator> {
    #[cfg(feature = "openai")]
    if !options.mock && std::env::var("OPENAI_API_KEY").is_ok() {
        let model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        return Arc::new(neuropath::OpenAiGenerator::new(model));
    }
    let _ = options;
    Arc::new(MockGenerator::new())
}

/// Runs one interactive journey end to end.
pub async fn run(options: RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "openai")]
    dotenv::dotenv().ok();

    let mut runner = JourneyRunner::new(build_generator(&options));
    runner.start(&options.topic).await?;

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    while runner.view().phase == Phase::Playing {
        let view = runner.view();
        print!("{}", render::round_screen(&view));
        let Some(pick) = read_choice(&mut lines, view.options.len())? else {
            println!("\nNo more input; stopping here.");
            return Ok(());
        };

        let card_id = view.options[pick].id.clone();
        match runner.choose(&card_id).await {
            Ok(()) => {}
            Err(JourneyError::Generation(err)) => {
                // The engine already rolled the selection back; the same
                // options are offered again and picking retries.
                println!("generation failed: {}; pick again to retry", err);
            }
            Err(err) => return Err(err.into()),
        }
    }

    let view = runner.view();
    if let Some(summary) = &view.summary {
        print!("{}", render::summary_screen(summary));
    }

    let graph = build_graph(runner.engine().session().history(), &view.topic);
    let mut sim = ForceSimulation::new(LayoutParams::default());
    if let Some(seed) = options.seed {
        sim = sim.with_seed(seed);
    }
    sim.set_graph(&graph);
    sim.settle(600);
    print!("{}", render::graph_screen(&graph, &sim));

    Ok(())
}

/// Reads a 1-based choice from stdin; `None` on end of input.
fn read_choice(
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
    options: usize,
) -> Result<Option<usize>, std::io::Error> {
    loop {
        print!("choice [1-{}]: ", options);
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        match line?.trim().parse::<usize>() {
            Ok(n) if (1..=options).contains(&n) => return Ok(Some(n - 1)),
            _ => println!("enter a number between 1 and {}", options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: read_choice accepts an in-range pick, skips garbage, and
    /// reports exhausted input as None.
    #[test]
    fn read_choice_parses_and_validates() {
        let input = ["x".to_string(), "9".to_string(), "2".to_string()];
        let mut lines = input.into_iter().map(Ok);
        let pick = read_choice(&mut lines, 3).unwrap();
        assert_eq!(pick, Some(1));

        let mut empty = std::iter::empty();
        assert_eq!(read_choice(&mut empty, 3).unwrap(), None);
    }

    /// **Scenario**: Without credentials (or with --mock) the mock generator is used.
    #[tokio::test]
    async fn mock_generator_round_trips() {
        let options = RunOptions {
            topic: "Coffee".into(),
            mock: true,
            seed: Some(1),
        };
        let generator = build_generator(&options);
        let batch = generator.initial_batch("Coffee").await.unwrap();
        assert_eq!(batch.len(), neuropath::CARDS_PER_ROUND);
    }
}
