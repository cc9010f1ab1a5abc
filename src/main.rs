use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pulsenet::{
    parse_declarations, presses_until_terminal_low, pulse_product, Network, PulseConfig,
    PulseResult, Simulator, TraceRecorder,
};

/// Pulse network simulator
///
/// Reads node declarations (`[%&]name -> a, b, ...`), counts pulses over a
/// fixed number of button presses, and infers the first press that sends a
/// low pulse to the terminal node.
#[derive(Parser, Debug)]
#[command(name = "pulsenet")]
#[command(version, about, long_about = None)]
struct Args {
    /// File with one declaration per line
    input: PathBuf,

    /// Button presses for the low × high product
    #[arg(short = 'p', long, default_value = "1000")]
    presses: u64,

    /// Node receiving each button pulse
    #[arg(long, default_value = "broadcaster")]
    entry: String,

    /// Sink whose feeding gate is analyzed
    #[arg(short = 't', long, default_value = "rx")]
    terminal: String,

    /// Give up cycle analysis after this many presses
    #[arg(long)]
    max_triggers: Option<u64>,

    /// Print the pulses of the first press
    #[arg(long)]
    trace: bool,
}

impl Args {
    fn config(&self) -> PulseConfig {
        let config = PulseConfig::default()
            .with_entry(self.entry.clone())
            .with_terminal(self.terminal.clone())
            .with_presses(self.presses);
        match self.max_triggers {
            Some(max) => config.with_max_triggers(max),
            None => config,
        }
    }
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,pulsenet=info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> PulseResult<()> {
    let text = std::fs::read_to_string(&args.input)?;
    let declarations = parse_declarations(&text)?;
    let config = args.config();
    info!(path = %args.input.display(), declarations = declarations.len(), "loaded network");

    if args.trace {
        let mut sim = Simulator::with_config(Network::build(&declarations)?, &config)?;
        let mut recorder = TraceRecorder::new();
        sim.run_trigger_with(&mut recorder);
        for entry in &recorder.entries {
            println!("{}", entry);
        }
        println!();
    }

    let product = pulse_product(&declarations, &config)?;
    println!("pulse product after {} presses: {}", config.presses, product);

    match presses_until_terminal_low(&declarations, &config) {
        Ok(presses) => println!("presses until {} receives low: {}", config.terminal, presses),
        // Networks without a single feeding gate still have a valid pulse count.
        Err(e) => println!("presses until {} receives low: unavailable ({})", config.terminal, e),
    }
    Ok(())
}
