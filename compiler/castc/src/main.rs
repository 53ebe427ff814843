//! Cast CLI entry point.

use castc::args::{parse, USAGE};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse(&argv) {
        Ok(args) => args,
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    if let Err(error) = castc::run(&args) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
