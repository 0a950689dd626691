//! 2.4 GHz PHY Scenario Replay
//!
//! Loads a recorded scenario, replays it against the pending transmission
//! registry and prints what every receiver locked onto.
//!
//! ```text
//! p2g4-replay [--json] <scenario.json>
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context};
use p2g4_sim::{replay, RxOutcome, Scenario};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, PartialEq)]
struct Args {
    scenario: PathBuf,
    json: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut scenario = None;
    let mut json = false;

    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            _ if scenario.is_some() => bail!("only one scenario file can be replayed"),
            _ => scenario = Some(PathBuf::from(arg)),
        }
    }

    let scenario = scenario.context("usage: p2g4-replay [--json] <scenario.json>")?;
    Ok(Args { scenario, json })
}

fn render(outcome: &RxOutcome) -> String {
    let matched = match outcome.matched {
        Some(device) => format!("device {device}"),
        None => "nothing".to_string(),
    };
    format!(
        "t={:>10}  rx device {:>3} -> {} (registry v{})",
        outcome.time,
        outcome.receiver.as_u32(),
        matched,
        outcome.registry_version
    )
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "p2g4_replay=info,p2g4_phy=info,p2g4_sim=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    tracing::info!("Loading scenario {}", args.scenario.display());

    let scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("failed to load {}", args.scenario.display()))?;
    let outcomes = replay(scenario).context("replay failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        for outcome in &outcomes {
            println!("{}", render(outcome));
        }
    }

    Ok(())
}
