use clap::{Parser, Subcommand};
use serde_json::Value;

use curious_facts_skill::RequestEnvelope;

#[derive(Parser)]
#[command(name = "skill-cli")]
#[command(about = "Send test requests to a running Curious Facts skill", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Locale tag sent with the request
    #[arg(short, long, default_value = "en-US")]
    locale: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the skill (LaunchRequest)
    Launch,
    /// Invoke an intent by name, e.g. GetFact or AMAZON.HelpIntent
    Intent { name: String },
    /// End the session (SessionEndedRequest)
    End {
        #[arg(long, default_value = "USER_INITIATED")]
        reason: String,
    },
    /// Check that the server is up
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let envelope = match &cli.command {
        Commands::Launch => RequestEnvelope::launch(&cli.locale),
        Commands::Intent { name } => RequestEnvelope::intent(name, &cli.locale),
        Commands::End { reason } => RequestEnvelope::session_ended(&cli.locale, reason),
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            println!("{} {}", res.status(), res.text().await?);
            return Ok(());
        }
    };

    let res = client.post(format!("{}/", cli.url)).json(&envelope).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: skill returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
