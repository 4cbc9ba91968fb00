use clap::Parser;

/// Terminal practice client for the JAMB CBT examination.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {}

#[tokio::main]
async fn main() {
    let _args = Args::parse();
    jamb_cbt::logger::init();

    if let Err(e) = jamb_cbt::run().await {
        eprintln!("Error running exam client: {}", e);
        std::process::exit(1);
    }
}
