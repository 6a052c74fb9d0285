use clap::Parser;
use cointill::config::MachineConfig;
use cointill::reader::CommandReader;
use cointill::session::{Outcome, Session};
use cointill::writer::StateWriter;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Session script CSV file
    ops: PathBuf,

    /// Machine setup JSON (vault denominations and catalog)
    #[arg(long)]
    config: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let setup = File::open(cli.config).into_diagnostic()?;
    let machine = MachineConfig::from_reader(setup)
        .into_diagnostic()?
        .build()
        .into_diagnostic()?;
    let mut session = Session::new(machine);

    // Run the script to completion; a failing command rejects that command
    // only, never the session.
    let file = File::open(cli.ops).into_diagnostic()?;
    let reader = CommandReader::new(file);
    for command_result in reader.commands() {
        match command_result {
            Ok(command) => match session.apply(command) {
                Ok(Outcome::Receipt(receipt)) => {
                    println!("{}", serde_json::to_string(&receipt).into_diagnostic()?);
                }
                Ok(Outcome::Catalog(products)) => {
                    println!("{}", serde_json::to_string(&products).into_diagnostic()?);
                }
                Ok(Outcome::None) => {}
                Err(e) => {
                    eprintln!("Error processing command: {}", e);
                }
            },
            Err(e) => {
                eprintln!("Error reading command: {}", e);
            }
        }
    }

    // Output final ledger state
    let stdout = io::stdout();
    let mut writer = StateWriter::new(stdout.lock());
    writer.write_state(session.machine()).into_diagnostic()?;

    Ok(())
}
