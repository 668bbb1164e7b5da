use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use qrform::builder::{evaluate, DownloadAction};
use qrform::request::{
    ErrorCorrection, FormValues, DEFAULT_BACKGROUND, DEFAULT_BORDER, DEFAULT_BOX_SIZE, DEFAULT_FILL,
    DEFAULT_FORMAT, DEFAULT_VERSION,
};

#[derive(Parser, Debug)]
#[command(name = "qrform", version, about = "Generate a QR code image from text")]
struct Cli {
    /// Base name of the generated file, without extension
    #[arg(short = 'n', long, default_value = "")]
    file_name: String,

    /// Text to encode, or `-` to read it from stdin
    #[arg(short, long, conflicts_with = "content_file")]
    content: Option<String>,

    /// Read the text to encode from a file
    #[arg(long)]
    content_file: Option<PathBuf>,

    /// Output format: jpeg, png or svg
    #[arg(short, long, default_value = DEFAULT_FORMAT)]
    format: String,

    /// Smallest symbol version to use (1-40); grown automatically when the text does not fit
    #[arg(long = "qr-version", default_value_t = DEFAULT_VERSION)]
    qr_version: u32,

    /// Pixels per module (1-10)
    #[arg(short, long, default_value_t = DEFAULT_BOX_SIZE)]
    box_size: u32,

    /// Quiet zone width in modules (0-10)
    #[arg(long, default_value_t = DEFAULT_BORDER)]
    border: u32,

    /// Module color, as #rrggbb, #rgb or a color name
    #[arg(long, default_value = DEFAULT_FILL)]
    fill: String,

    /// Background color, as #rrggbb, #rgb or a color name
    #[arg(long, default_value = DEFAULT_BACKGROUND)]
    background: String,

    /// Error correction level: L, M, Q or H
    #[arg(short, long, default_value = "L")]
    ecc: ErrorCorrection,

    /// Directory the file is written to
    #[arg(short, long, env = "QRFORM_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Print the symbol to the terminal as well
    #[arg(long)]
    preview: bool,
}

impl Cli {
    fn read_content(&self) -> Result<String> {
        if let Some(path) = &self.content_file {
            return fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
        match self.content.as_deref() {
            Some("-") => {
                let mut content = String::new();
                std::io::stdin()
                    .read_to_string(&mut content)
                    .context("failed to read stdin")?;
                Ok(content)
            }
            Some(content) => Ok(content.to_string()),
            None => Ok(String::new()),
        }
    }

    fn form_values(&self) -> Result<FormValues> {
        Ok(FormValues {
            file_name: self.file_name.clone(),
            content: self.read_content()?,
            output_format: self.format.clone(),
            version: self.qr_version,
            box_size: self.box_size,
            border: self.border,
            fill_color: self.fill.clone(),
            background_color: self.background.clone(),
            error_correction: self.ecc,
        })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let form = cli.form_values()?;

    let download = match evaluate(&form).context("failed to generate QR code")? {
        DownloadAction::Enabled(download) => download,
        DownloadAction::Disabled { warnings } => {
            for warning in &warnings {
                warn!("{warning}");
            }
            warn!("download disabled");
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.preview {
        print!("{}", download.grid.to_text(form.border));
    }

    if !cli.out_dir.exists() {
        fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("failed to create {}", cli.out_dir.display()))?;
    }
    let path = cli.out_dir.join(&download.file_name);
    fs::write(&path, &download.bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(
        path = %path.display(),
        mime = download.mime_type,
        bytes = download.bytes.len(),
        version = download.grid.version(),
        "saved QR code"
    );
    Ok(ExitCode::SUCCESS)
}
