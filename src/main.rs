use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use taskvoice::config::{AppConfig, CONFIG_PATH_ENV};
use taskvoice::inputs::ConsoleRecognizer;
use taskvoice::outputs::{CommandSpeaker, ConsoleSpeaker, LogRouter};
use taskvoice::services::{ApiClient, InvalidationLog, SpeechSynthesizer};
use taskvoice::{ActionDispatcher, ControlMessage, SessionController};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
        .map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("loading configuration")?;
    tracing::info!("Voice control starting against {}", config.api.base_url);

    let api = Arc::new(
        ApiClient::new(config.api.base_url.clone(), config.request_timeout())
            .context("building API client")?,
    );
    let dispatcher = Arc::new(ActionDispatcher::new(
        api.clone(),
        api.clone(),
        api,
        Arc::new(LogRouter::new()),
        Arc::new(InvalidationLog::new()),
    ));

    let speaker: Arc<dyn SpeechSynthesizer> = match &config.speech.program {
        Some(program) => {
            let mut speaker = CommandSpeaker::new(program.clone());
            if let Some(name) = &config.speech.language_env {
                speaker = speaker.with_language_env(name.clone());
            }
            Arc::new(speaker)
        }
        None => Arc::new(ConsoleSpeaker),
    };

    let recognizer = Arc::new(ConsoleRecognizer::new());
    let mut controller =
        SessionController::new(&config.session, recognizer.clone(), speaker, dispatcher);

    let (control_tx, control_rx) = mpsc::channel(16);
    control_tx
        .send(ControlMessage::Start)
        .await
        .context("control channel closed")?;

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!("Speak by typing a command. Controls: /start /stop /lang <en|ar> /continuous <on|off> /threshold <0-1> /quit");

        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(control) = line.strip_prefix('/') {
                match parse_control(control) {
                    Some(message) => {
                        let quit = message == ControlMessage::Shutdown;
                        if control_tx.send(message).await.is_err() || quit {
                            break;
                        }
                    }
                    None => println!("Unknown control: /{}", control),
                }
                continue;
            }

            if !recognizer.feed(line) {
                println!("Not listening. Type /start first.");
            }
        }

        let _ = control_tx.send(ControlMessage::Shutdown).await;
    });

    controller.run(control_rx).await;
    Ok(())
}

fn parse_control(input: &str) -> Option<ControlMessage> {
    let mut parts = input.split_whitespace();
    let name = parts.next()?;
    let arg = parts.next();

    match (name, arg) {
        ("start", _) => Some(ControlMessage::Start),
        ("stop", _) => Some(ControlMessage::Stop),
        ("quit" | "exit", _) => Some(ControlMessage::Shutdown),
        ("lang", Some(lang)) => lang.parse().ok().map(ControlMessage::SetLanguage),
        ("continuous", Some("on")) => Some(ControlMessage::SetContinuous(true)),
        ("continuous", Some("off")) => Some(ControlMessage::SetContinuous(false)),
        ("threshold", Some(value)) => value
            .parse::<f32>()
            .ok()
            .map(ControlMessage::SetConfidenceThreshold),
        _ => None,
    }
}
