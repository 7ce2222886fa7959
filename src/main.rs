mod cli;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use beatlane::progress;
use beatlane::{Chart, PipelineOptions};
use cli::Cli;
use config::{Config, Settings};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let cfg = match config::find_config_path(cli.config.as_deref()) {
        Some(path) => match config::load_config(&path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cfg
            }
            Err(err) => {
                log::warn!("{:#}", err);
                Config::default()
            }
        },
        None => Config::default(),
    };
    let settings = Settings::resolve(&cli, &cfg);

    if cli.demo {
        let chart = Chart::demo();
        let json = output::render_json(&chart, settings.pretty, settings.diagnostics)?;
        output::write_chart(&json, &cli.output, cli.writes_to_stdout())?;
        log::info!("Wrote demo chart ({} notes)", chart.len());
        return Ok(());
    }

    let input = cli.input.as_ref().context("Input audio file is required")?;
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    log::info!("beatlane - rhythm chart generator");
    log::info!("Input: {}", input.display());
    if !cli.writes_to_stdout() {
        log::info!("Output: {}", cli.output.display());
    }

    let pb = if settings.progress {
        ProgressBar::new(100)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>3}% {msg}")?
            .progress_chars("=>-"),
    );
    let mut sink = |percent: f32, message: &str| {
        pb.set_position(percent.round() as u64);
        pb.set_message(message.to_string());
    };

    progress::STARTING.emit(&mut sink);
    progress::READING_FILE.emit(&mut sink);
    progress::DECODING.emit(&mut sink);
    let audio = match beatlane::decode_audio(input) {
        Ok(audio) => audio,
        Err(err) => {
            pb.abandon_with_message("Error loading music file");
            return Err(err).with_context(|| format!("Failed to decode {}", input.display()));
        }
    };

    let options = PipelineOptions {
        parallel_detectors: settings.parallel_detectors,
    };
    let (chart, report) = beatlane::analyze(
        &audio.samples,
        audio.sample_rate,
        audio.duration_secs(),
        options,
        &mut sink,
    );
    pb.finish_with_message("Complete!");

    log::debug!("{:?}", report);
    for (kind, count) in chart.count_by_kind() {
        log::info!("  {:<14} {} notes", kind, count);
    }

    let json = output::render_json(&chart, settings.pretty, settings.diagnostics)?;
    output::write_chart(&json, &cli.output, cli.writes_to_stdout())?;

    log::info!("Ready! {} notes generated", chart.len());
    Ok(())
}
