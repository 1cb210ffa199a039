use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use yuedu_config::Config;
use yuedu_core::language::LanguageProcessor;
use yuedu_lang_chinese::{ChineseProcessor, DictionaryEntry, SenseLayout};

pub mod cli;
pub mod controller;
pub mod events;
pub mod io;
pub mod output;
pub mod profile;
pub mod state;

#[cfg(test)]
mod tests;

use self::cli::{Cli, Command};
use self::controller::AppController;
use self::state::AppState;

/// Exit status when the dictionary dataset cannot be loaded
const EXIT_DICTIONARY_UNAVAILABLE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = profile::load_config(cli.profile.as_deref())?;
    cli.apply_overrides(&mut config);

    if let Command::InitProfile { path, name } = &cli.command {
        profile::write_profile(path, name, config)?;
        return Ok(ExitCode::SUCCESS);
    }

    let processor = match load_processor(&config) {
        Ok(processor) => processor,
        Err(code) => return Ok(code),
    };

    match cli.command {
        Command::Segment { text, json } => {
            let Some(processor) = processor else {
                return Ok(dictionary_disabled());
            };
            segment(&processor, &text, json)?;
        }
        Command::Lookup { word, json } => {
            let Some(processor) = processor else {
                return Ok(dictionary_disabled());
            };
            return lookup(&processor, &word, json);
        }
        Command::Serve => serve(config, processor.map(Arc::new)).await?,
        Command::InitProfile { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}

/// `Ok(None)` when the dictionary is disabled in config
fn load_processor(config: &Config) -> Result<Option<ChineseProcessor>, ExitCode> {
    if !config.dictionary.enabled {
        return Ok(None);
    }

    ChineseProcessor::from_config(config).map(Some).map_err(|e| {
        tracing::error!("Dictionary dataset unavailable: {}", e);
        ExitCode::from(EXIT_DICTIONARY_UNAVAILABLE)
    })
}

fn dictionary_disabled() -> ExitCode {
    tracing::error!("Dictionary is disabled in the active profile");
    ExitCode::from(EXIT_DICTIONARY_UNAVAILABLE)
}

fn segment(processor: &ChineseProcessor, text: &str, json: bool) -> anyhow::Result<()> {
    let tokens = processor.tokenize(text);

    if json {
        println!("{}", serde_json::to_string(&tokens)?);
    } else {
        for token in &tokens {
            println!("{}..{}\t{}", token.start, token.end, token.text);
        }
    }
    Ok(())
}

fn lookup(processor: &ChineseProcessor, word: &str, json: bool) -> anyhow::Result<ExitCode> {
    let Some(entry) = processor.lookup(word) else {
        println!("No entry for {}", word);
        return Ok(ExitCode::FAILURE);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!("{}", render_entry(&entry));
    }
    Ok(ExitCode::SUCCESS)
}

fn render_entry(entry: &DictionaryEntry) -> String {
    entry
        .readings
        .iter()
        .map(|reading| {
            let forms = if reading.traditional == reading.simplified {
                reading.traditional.clone()
            } else {
                format!("{} {}", reading.traditional, reading.simplified)
            };
            format!(
                "{} [{}]\n{}",
                forms,
                reading.accented_romanization(),
                SenseLayout::new(&reading.senses).render_plain()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

async fn serve(config: Config, processor: Option<Arc<ChineseProcessor>>) -> anyhow::Result<()> {
    let capacity = config.channel_capacity;
    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state, capacity);

    let mut tasks = controller.spawn_tasks(
        processor,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                controller.shutdown();
            }
            joined = tasks.join_next() => match joined {
                None => break,
                Some(Ok(Ok(()))) => {}
                Some(Ok(Err(e))) => {
                    tracing::error!("Task exited: {e:#}");
                    controller.shutdown();
                }
                Some(Err(e)) => {
                    tracing::error!("Task panicked: {e}");
                    controller.shutdown();
                }
            }
        }
    }

    Ok(())
}
