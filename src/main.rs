use cosmo_assist::config::EngineConfig;
use cosmo_assist::conversation::{Conversation, ConversationEvent, SubmitOutcome};
use cosmo_assist::rules::SUGGESTED_QUESTIONS;
use cosmo_assist::transcript::Sender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = EngineConfig::default();
    let bot_name = config.bot_name.clone();
    let mut convo = Conversation::new(config);
    let mut events = convo.subscribe();

    eprintln!("🛡️  Cosmo Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Type a question and press Enter. /quit to exit.");
    eprintln!("   Suggested questions:");
    for question in SUGGESTED_QUESTIONS {
        eprintln!("     - {question}");
    }
    eprintln!();

    let transcript = convo.messages().await;
    if let Some(greeting) = transcript.first() {
        println!("{bot_name}: {}\n", greeting.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/quit" {
            break;
        }
        match convo.submit(&line).await? {
            SubmitOutcome::IgnoredEmpty => continue,
            SubmitOutcome::RejectedBusy => {
                eprintln!("({bot_name} is still typing...)");
                continue;
            }
            SubmitOutcome::Accepted => {}
        }

        // Block until this turn's bot reply lands
        loop {
            match events.recv().await {
                Ok(ConversationEvent::MessageAppended { message })
                    if message.sender == Sender::Bot =>
                {
                    println!("{bot_name}: {}\n", message.text);
                    break;
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return Ok(()),
            }
        }
    }

    convo.close();
    Ok(())
}
