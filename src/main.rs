use clap::Parser;
use deskfriend::cli::commands::Cli;
use deskfriend::cli::handlers;

fn main() {
    let cli = Cli::parse();
    deskfriend::logging::init(cli.verbose);

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
