use anyhow::Context;
use clap::Parser;
use sidescan_xtf::logger;
use sidescan_xtf::sonar_pipeline::{ConversionConfig, TiffCompression, XtfToTiffPipeline};

use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "sidescan_xtf")]
#[command(about = "Convert an XTF side-scan capture to a grayscale TIFF")]
struct Args {
    /// Input XTF capture
    input: String,

    /// Output TIFF file
    output: String,

    /// Write the uncorrected waterfall instead of the ground-range image
    #[arg(long)]
    raw: bool,

    /// Write the port channel only (implies --raw)
    #[arg(long)]
    port_only: bool,

    /// Gamma applied to the final image
    #[arg(long, value_parser = parse_gamma)]
    gamma: Option<f64>,
}

fn parse_gamma(value: &str) -> Result<f64, String> {
    let g: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if g.is_finite() && g > 0.0 {
        Ok(g)
    } else {
        Err(format!("gamma must be positive, got {g}"))
    }
}

impl Args {
    fn conversion_config(&self) -> ConversionConfig {
        ConversionConfig::builder()
            .compression(TiffCompression::DeflateBalanced)
            .predictor(Some(2))
            .slant_correct(!(self.raw || self.port_only))
            .combine_channels(!self.port_only)
            .gamma(self.gamma)
            .build()
    }
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let args = Args::parse();

    info!("Starting sidescan_xtf...");
    let pipeline = XtfToTiffPipeline::new(args.conversion_config());
    info!("Compression: {:?}", pipeline.config().compression);
    info!(
        "Slant-range correction: {}",
        if pipeline.config().slant_correct {
            "enabled"
        } else {
            "disabled"
        }
    );

    match pipeline.convert_file_with_timings(&args.input, &args.output) {
        Ok(timings) => {
            info!("Conversion successful!");
            println!("{}", timings.summary());
            Ok(())
        }
        Err(e) => {
            error!(kind = ?e.kind(), "Conversion failed: {}", e);
            Err(e).with_context(|| format!("converting {}", args.input))
        }
    }
}
