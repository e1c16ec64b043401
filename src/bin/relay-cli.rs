use clap::{Parser, Subcommand};
use relay_client::RelayClient;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Probe a running license relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Origin to present, as a browser page on that origin would.
    #[arg(short, long, default_value = "http://localhost:5000")]
    origin: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the relay is alive
    Health,
    /// Fetch the license token through the gate
    Token,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = RelayClient::new(&cli.url, &cli.origin);

    match cli.command {
        Commands::Health => {
            if client.health().await? {
                println!("ok");
            } else {
                eprintln!("Error: relay at {} is not healthy", cli.url);
                std::process::exit(1);
            }
        }
        Commands::Token => match client.fetch_token().await {
            Ok(token) => println!("{}", token),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
