use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "beatlane", about = "Generate four-lane rhythm game charts from audio files")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG, AAC)
    pub input: Option<PathBuf>,

    /// Output chart file, or "-" for stdout
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,

    /// Config file (defaults to ./beatlane.toml or the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run the energy and spectral detectors concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Write single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Omit per-note kind and intensity from the output
    #[arg(long)]
    pub no_diagnostics: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Write the built-in demo chart and exit
    #[arg(long)]
    pub demo: bool,
}

impl Cli {
    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}
