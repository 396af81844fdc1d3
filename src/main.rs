use clap::Parser;
use growth::form::{Cli, run};

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
