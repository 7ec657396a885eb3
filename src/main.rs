/*
    copaygen command line tool.

    Opens the localstorage file the Copay app keeps its wallet profile
    in, picks a wallet, and regenerates its public receiving addresses
    from the stored extended public keys. Copay derives receiving
    addresses along the fixed path prefix 0/i, so the tool walks that
    convention by default.
*/

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::info;

use copaygen::hdwallet::{HDMultisig, Path};
use copaygen::profile::{self, ProfileError, WalletCredentials};

#[derive(Parser)]
#[command(name = "copaygen")]
#[command(version)]
#[command(about = "Regenerate the public receiving addresses of a Copay m-of-n HD wallet")]
struct Cli {
    /// Path to the Copay localstorage file
    #[arg(short = 'f', long = "localstorage")]
    localstorage: Option<PathBuf>,

    /// Only use the wallet with this id
    #[arg(short = 'w', long = "walletid")]
    walletid: Option<String>,

    /// Start address generation from this index
    #[arg(short = 's', long = "start", default_value_t = 0)]
    start: u32,

    /// Create this many addresses
    #[arg(short = 'n', long = "amount", default_value_t = 100)]
    amount: u32,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let storage_path = match &cli.localstorage {
        Some(path) => path.clone(),
        None => profile::default_localstorage_path()
            .ok_or("no default localstorage path on this platform (use --localstorage)")?,
    };

    let profile = profile::read_profile(&storage_path)?;
    let wallet = match profile::select_wallet(&profile.credentials, cli.walletid.as_deref()) {
        Ok(wallet) => wallet,
        Err(ProfileError::MultipleWallets) => pick_wallet(&profile.credentials)?,
        Err(err @ ProfileError::WalletNotFound(_)) => {
            eprintln!("{err}! the following wallets were found:");
            for wallet in &profile.credentials {
                eprintln!("{wallet}");
            }
            process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };
    info!("using wallet {wallet}");

    let multisig = HDMultisig::from_encoded_keys(&wallet.xpub_strings(), wallet.m)?;
    let prefix = Path::new(vec![0]);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for address in multisig.addresses(&prefix, cli.start, cli.amount) {
        writeln!(out, "{}", address?)?;
    }

    Ok(())
}

/// Interactive wallet picker for profiles holding several wallets.
/// Kept out of the library so the selection logic itself stays pure.
fn pick_wallet<'a>(
    wallets: &'a [WalletCredentials],
) -> Result<&'a WalletCredentials, Box<dyn std::error::Error>> {
    println!("Multiple wallets found - pick yours:");
    let stdin = io::stdin();
    loop {
        for (i, wallet) in wallets.iter().enumerate() {
            println!("[{i}] {wallet}");
        }
        print!("> ");
        io::stdout().flush()?;

        let mut choice = String::new();
        if stdin.lock().read_line(&mut choice)? == 0 {
            return Err("no wallet selected".into());
        }
        match choice.trim().parse::<usize>() {
            Ok(i) if i < wallets.len() => return Ok(&wallets[i]),
            _ => println!("Pick a number between 0 and {}", wallets.len() - 1),
        }
    }
}
