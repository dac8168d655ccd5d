use clap::Parser;

fn main() {
    use fyers_auth::util::cli::*;

    dotenv::dotenv().ok();
    init_tracing();

    let opts = Options::parse();
    if let Err(e) = run_cli_action(opts) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
