use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use stripes::render;
use stripes::{
    Barcode, Code128Set, ECLevel, EncodeOptions, QrCode, RenderOptions, Symbology,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Qr,
    Code93,
    Code128,
    Ean,
}

#[derive(Parser)]
#[command(name = "stripes", version, about = "Generate QR codes and linear barcodes")]
struct Cli {
    /// Text to encode
    content: String,
    /// Output file; the extension selects svg, png, bmp or gif
    output: PathBuf,
    /// Symbology
    #[arg(long = "type", value_enum, default_value = "qr")]
    kind: Kind,
    /// QR error correction level (L, M, Q, H)
    #[arg(long, default_value = "Q")]
    ec_level: ECLevel,
    /// Code128 code set (A, B, C)
    #[arg(long, default_value = "B")]
    code128_set: Code128Set,
    /// Pixels per module
    #[arg(long)]
    scale: Option<u32>,
    /// Light modules around QR symbols
    #[arg(long)]
    quiet_zone: Option<usize>,
    /// Bar height in pixels for linear symbols
    #[arg(long)]
    bar_height: Option<u32>,
    /// Score QR masks on one thread
    #[arg(long)]
    serial_masks: bool,
    /// Print the QR symbol as text to stdout
    #[arg(long)]
    print: bool,
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn encode(cli: &Cli) -> stripes::Result<Barcode> {
    match cli.kind {
        Kind::Qr => {
            let options = EncodeOptions::new(cli.ec_level).parallel_masks(!cli.serial_masks);
            QrCode::encode_with(&cli.content, &options).map(Barcode::Matrix)
        }
        Kind::Code93 => Symbology::Code93.encode(&cli.content),
        Kind::Code128 => Symbology::Code128(cli.code128_set).encode(&cli.content),
        Kind::Ean => Symbology::Ean.encode(&cli.content),
    }
}

fn render_options(cli: &Cli) -> RenderOptions {
    let mut options = RenderOptions::default();
    if let Some(scale) = cli.scale {
        options = options.module_scale(scale);
    }
    if let Some(quiet_zone) = cli.quiet_zone {
        options = options.quiet_zone(quiet_zone);
    }
    if let Some(height) = cli.bar_height {
        options = options.bar_height(height);
    }
    options
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let barcode = match encode(&cli) {
        Ok(barcode) => barcode,
        Err(err) => {
            error!(kind = ?err.kind(), "encoding failed");
            eprintln!("Failed to encode {:?}: {}", cli.content, err);
            return ExitCode::FAILURE;
        }
    };

    let options = render_options(&cli);
    if cli.print {
        if let Barcode::Matrix(qr) = &barcode {
            print!("{}", qr.to_text(options.quiet_zone));
        }
    }

    match render::save(&barcode, &cli.output, &options) {
        Ok(()) => {
            info!(output = %cli.output.display(), width = barcode.width(), "written");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Failed to write {}: {}", cli.output.display(), err);
            ExitCode::FAILURE
        }
    }
}
