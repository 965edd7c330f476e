use std::io::BufRead;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use smarthome::command::interpret_with_matches;
use smarthome::config::LoggingConfig;
use smarthome::engine::input_channel;
use smarthome::engine::InputSender;
use smarthome::explain::explain;
use smarthome::render::device_panel;
use smarthome::render::feedback_line;
use smarthome::render::TextRenderer;
use smarthome::Config;
use smarthome::Engine;
use smarthome::InputEvent;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_CONFIG_PATH: &str = "smarthome.toml";

const REPL_HELP: &str = "\
Type a command, e.g. \"turn on the kitchen light\".
  /say <text>    deliver <text> as a speech transcript
  /listen        press the microphone button
  /toggle <id>   toggle a device by id
  /quit          exit";

#[derive(Debug, Parser)]
#[command(name = "smarthome", version, about = "Talk to a simulated smart home")]
struct Cli {
    /// Config file (defaults to ./smarthome.toml when it exists)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Read commands from stdin (the default)
    Repl,

    /// Apply utterances in order and print the resulting devices
    Run {
        #[arg(required = true)]
        utterances: Vec<String>,

        /// Print the final devices as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how an utterance is interpreted
    Interpret {
        utterance: String,

        /// Annotate which words decided each part of the command
        #[arg(long)]
        explain: bool,
    },

    /// List the configured devices
    Devices {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref(), Path::new(DEFAULT_CONFIG_PATH))
        .context("Failed to load configuration")?;

    init_logging(&config.logging);
    tracing::debug!("Loaded config: {:?}", config);

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => repl(&config).await,
        Commands::Run { utterances, json } => run(&config, &utterances, json),
        Commands::Interpret { utterance, explain } => interpret(&utterance, explain),
        Commands::Devices { json } => devices(&config, json),
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter = Targets::new()
        .with_default(LevelFilter::from(logging.level))
        .with_targets(
            logging
                .overrides
                .iter()
                .map(|(target, level)| (target.clone(), LevelFilter::from(*level))),
        );

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn repl(config: &Config) -> anyhow::Result<()> {
    tracing::info!("smarthome starting");

    let engine = Engine::new(config.device_collection(), &config.assistant);
    let (tx, rx) = input_channel();

    println!("{}", REPL_HELP);

    // Blocking stdin reads stay off the runtime so shutdown never waits on them.
    std::thread::spawn(move || read_stdin(tx));

    let mut renderer = TextRenderer::new(std::io::stdout());
    tokio::select! {
        result = engine.run(rx, &mut renderer) => {
            result.context("Failed to write output")?;
        }
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => tracing::info!("Received shutdown signal"),
                Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
            }
        }
    }

    tracing::info!("smarthome shutdown complete");
    Ok(())
}

/// What a line typed at the REPL means.
#[derive(Debug, PartialEq, Eq)]
enum ReplLine {
    Event(InputEvent),
    Help,
    Quit,
}

fn parse_line(line: &str) -> ReplLine {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') {
        return ReplLine::Event(InputEvent::Text(line.to_string()));
    }

    let (directive, argument) = match trimmed.split_once(char::is_whitespace) {
        Some((directive, argument)) => (directive, argument.trim()),
        None => (trimmed, ""),
    };

    match directive {
        "/say" => ReplLine::Event(InputEvent::Transcript(argument.to_string())),
        "/listen" => ReplLine::Event(InputEvent::StartListening),
        "/toggle" if !argument.is_empty() => {
            ReplLine::Event(InputEvent::Toggle(argument.to_string()))
        }
        "/quit" | "/exit" => ReplLine::Quit,
        _ => ReplLine::Help,
    }
}

fn read_stdin(tx: InputSender) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                break;
            }
        };

        match parse_line(&line) {
            ReplLine::Event(event) => {
                if tx.blocking_send(event).is_err() {
                    break;
                }
            }
            ReplLine::Help => println!("{}", REPL_HELP),
            ReplLine::Quit => break,
        }
    }
}

fn run(config: &Config, utterances: &[String], json: bool) -> anyhow::Result<()> {
    let mut engine = Engine::new(config.device_collection(), &config.assistant);
    let mut stdout = std::io::stdout().lock();

    for utterance in utterances {
        engine.handle_utterance(utterance);
        if let Some(line) = feedback_line(engine.feedback(), engine.mood()) {
            writeln!(stdout, "{}", line)?;
        }
    }

    if json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(engine.devices())?)?;
    } else {
        write!(stdout, "{}", device_panel(engine.devices()))?;
    }
    Ok(())
}

fn interpret(utterance: &str, annotate: bool) -> anyhow::Result<()> {
    let interpretation = interpret_with_matches(utterance);
    if annotate {
        print!("{}", explain(&interpretation));
    } else {
        println!("{}", serde_json::to_string_pretty(&interpretation.command)?);
    }
    Ok(())
}

fn devices(config: &Config, json: bool) -> anyhow::Result<()> {
    let devices = config.device_collection();
    if json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
    } else {
        print!("{}", device_panel(&devices));
    }
    Ok(())
}
