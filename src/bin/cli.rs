//! Matisse Commander CLI
//!
//! Command-line interface for querying and setting Matisse variables.

use clap::{Parser, Subcommand, ValueEnum};
use matisse_commander::{Commander, Config, Result, SetValue};
use tracing_subscriber::{fmt, EnvFilter};

/// Matisse Commander CLI
#[derive(Parser, Debug)]
#[command(name = "matisse-cli")]
#[command(about = "CLI for the Sirah Matisse Commander TCP server")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "30000")]
    port: u16,

    /// Network timeout in milliseconds
    #[arg(short, long, default_value = "1000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Query a variable
    Query {
        /// Variable name, e.g. SPZT:NOW
        variable: String,
    },

    /// Set a variable
    Set {
        /// Variable name
        variable: String,

        /// Value; integers and floats are sent as numbers
        #[arg(allow_negative_numbers = true)]
        value: String,
    },

    /// Check whether the server answers
    Alive,

    /// Print the identification string
    Idn,

    /// Print control loop states and piezo positions
    Status,

    /// Read or move a piezo
    Piezo {
        /// Which piezo
        #[arg(value_enum)]
        target: PiezoTarget,

        /// New position in [0, 0.7]; omit to read
        #[arg(allow_negative_numbers = true)]
        value: Option<f64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PiezoTarget {
    Slow,
    RefCell,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,matisse_commander=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("Matisse Commander CLI v{}", matisse_commander::VERSION);

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Build the config, connect, execute one subcommand, and close cleanly
fn run(args: Args) -> Result<()> {
    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .timeout_ms(args.timeout_ms)
        .build()?;

    let mut commander = Commander::new(config);
    session(&mut commander, args.command)
}

/// Connect, execute one subcommand, and close the connection cleanly
fn session(commander: &mut Commander, command: Commands) -> Result<()> {
    commander.connect()?;
    let outcome = execute(commander, command);
    let closed = commander.disconnect();

    outcome.and(closed)
}

fn execute(commander: &mut Commander, command: Commands) -> Result<()> {
    match command {
        Commands::Query { variable } => {
            println!("{}", commander.query(&variable)?);
        }
        Commands::Set { variable, value } => {
            commander.set_checked(&variable, typed_value(&value))?;
            println!("OK");
        }
        Commands::Alive => {
            let alive = commander.server_alive();
            println!("{}", if alive { "alive" } else { "not responding" });
        }
        Commands::Idn => {
            println!("{}", commander.idn()?);
        }
        Commands::Status => {
            println!("slow piezo:        {}", commander.piezo_slow_status()?);
            println!("fast piezo:        {}", commander.piezo_fast_status()?);
            println!("piezo etalon:      {}", commander.etalon_piezo_status()?);
            println!("thin etalon:       {}", commander.etalon_thin_status()?);
            println!("fast piezo locked: {}", commander.piezo_fast_lock()?);
            println!("diode power (DC):  {}", commander.diode_power_dc()?);
            println!("slow piezo value:  {}", commander.piezo_slow()?);
            println!("ref cell value:    {}", commander.piezo_ref_cell()?);
        }
        Commands::Piezo { target, value } => match (target, value) {
            (PiezoTarget::Slow, None) => println!("{}", commander.piezo_slow()?),
            (PiezoTarget::RefCell, None) => println!("{}", commander.piezo_ref_cell()?),
            (PiezoTarget::Slow, Some(v)) => commander.set_piezo_slow(v)?,
            (PiezoTarget::RefCell, Some(v)) => commander.set_piezo_ref_cell(v)?,
        },
    }

    Ok(())
}

/// Integers go out as integers, other finite numbers as floats, the rest verbatim
fn typed_value(raw: &str) -> SetValue {
    if let Ok(n) = raw.parse::<i64>() {
        return SetValue::Int(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => SetValue::Float(f),
        _ => SetValue::from(raw),
    }
}
