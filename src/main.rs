use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use eyre::{Result, WrapErr, bail};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

mod cli;

use cli::{Cli, Command};
use ytrank::config::{Config, Credentials};
use ytrank::prompt::{self, PromptParams};
use ytrank::transcript::{self, TranscriptOutcome};
use ytrank::youtube::ChannelClient;
use ytrank::{output, sort_by_likes};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytrank.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytrank")
        .join("logs")
}

fn counter_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}: {pos}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn progress_bar(len: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message(msg.to_string());
    pb
}

async fn run_collect(
    output_path: PathBuf,
    no_transcript: bool,
    throttle_ms: Option<u64>,
    lang: Option<String>,
    config: &Config,
) -> Result<()> {
    let creds = Credentials::resolve(config)?;
    let throttle_ms = throttle_ms.or(config.throttle_ms).unwrap_or(0);
    let lang = lang
        .or_else(|| config.default_lang.clone())
        .unwrap_or_else(|| "en".to_string());

    let client = reqwest::Client::new();
    let yt = ChannelClient::new(client.clone(), creds.api_key, throttle_ms);

    let playlist_id = yt
        .uploads_playlist_id(&creds.channel_id)
        .await
        .wrap_err("failed to get uploads playlist")?;
    debug!("Uploads playlist for {}: {playlist_id}", creds.channel_id);

    let spinner = counter_spinner("Collecting video ids");
    let video_ids = yt.collect_video_ids(&playlist_id, &spinner).await?;
    spinner.finish();

    if video_ids.is_empty() {
        bail!("no videos found for channel {}", creds.channel_id);
    }

    let bar = progress_bar(video_ids.len() as u64, "Fetching statistics");
    let records = yt.fetch_video_stats(&video_ids, &bar).await?;
    bar.finish();

    let mut records = sort_by_likes(records);

    if !no_transcript {
        let throttle = Duration::from_millis(throttle_ms);
        let bar = progress_bar(records.len() as u64, "Fetching transcripts");
        for (i, record) in records.iter_mut().enumerate() {
            if i > 0 && !throttle.is_zero() {
                tokio::time::sleep(throttle).await;
            }
            let outcome = transcript::fetch_with_fallback(&client, &record.id, &lang).await;
            match &outcome {
                TranscriptOutcome::Found { source, .. } => {
                    debug!("Transcript for {} via {source}", record.id);
                }
                TranscriptOutcome::Absent => debug!("No transcript for {}", record.id),
            }
            record.transcript = outcome.into_text();
            bar.inc(1);
        }
        bar.finish();
    }

    output::write_records(&output_path, &records)?;
    println!("Saved {} records to {}", records.len(), output_path.display());
    Ok(())
}

fn run_prompts(
    input: PathBuf,
    count: usize,
    language: Option<String>,
    interactive: bool,
    urls: bool,
    output_path: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let records = output::read_records(&input)?;
    if records.is_empty() {
        bail!("{} contains no videos", input.display());
    }

    let default_lang = config.default_lang.clone().unwrap_or_else(|| "en".to_string());
    let params = if interactive {
        prompt::params_interactive(records.len(), &default_lang)?
    } else {
        PromptParams {
            count,
            language: language.unwrap_or(default_lang),
        }
    };
    debug!("Generating prompts for {} video(s), language {}", params.count, params.language);

    let rendered = if urls {
        prompt::render_url_list(&records, params.count)
    } else {
        prompt::join_blocks(&prompt::generate_prompts(&records, &params))
    };

    match output_path {
        Some(path) => {
            std::fs::write(&path, &rendered).wrap_err_with(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {} video(s) to {}", params.count.min(records.len()), path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let cli = Cli::parse();

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_default();

    match cli.command {
        Command::Collect {
            output,
            no_transcript,
            throttle_ms,
            lang,
        } => run_collect(output, no_transcript, throttle_ms, lang, &config).await,
        Command::Prompts {
            input,
            count,
            language,
            interactive,
            urls,
            output,
        } => run_prompts(input, count, language, interactive, urls, output, &config),
    }
}
