//! `tengbe-init`: store the board MAC address and bring up the 10GbE core

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, ArgGroup, Parser};
use log::error;

use tengbe_init::app::{Action, execute, exit_status};
use tengbe_init::constants::DEFAULT_CONFIG_PATH;
use tengbe_init::driver::Settings;
use tengbe_init::error::Result;
use tengbe_init::integration::linux::open_context;
use tengbe_init::logger;

/// 10GbE MAC/PHY bring-up
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .args(["query", "store", "initialize"])
))]
struct Args {
    /// Configuration file.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Print and check the MAC address stored in the EEPROM.
    #[arg(short, long)]
    query: bool,

    /// Store MAC in the EEPROM.
    #[arg(short = 's', long = "set", value_name = "MAC")]
    store: Option<String>,

    /// Configure the PHY and start the 10GbE core.
    #[arg(short, long)]
    initialize: bool,

    /// More log output (repeat for more).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn action(&self) -> Action {
        match (&self.store, self.initialize) {
            (Some(mac), _) => Action::Store(mac.clone()),
            (None, true) => Action::Initialize,
            (None, false) => Action::Query,
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let settings = Settings::load(&args.config)?;
    let mut ctx = open_context(&settings, settings.has_mdio_writes())?;

    let stdout = std::io::stdout();
    execute(&args.action(), &mut ctx, &settings, &mut stdout.lock())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are not failures
            let code = u8::from(e.use_stderr());
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    logger::init(args.verbose);

    let result = run(&args);
    if let Err(e) = &result {
        error!("{e}");
    }
    ExitCode::from(exit_status(&result))
}
