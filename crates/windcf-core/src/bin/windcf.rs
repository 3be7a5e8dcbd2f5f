use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use windcf_core::constants::{
    DEFAULT_SWEEP_MAX_PCT, DEFAULT_SWEEP_MIN_PCT, DEFAULT_SWEEP_POINTS, PARAM_BOUNDS, PARAM_NAMES,
};
use windcf_core::dataset::{Dataset, MultiResource};
use windcf_core::explorer::{BlendWeights, Evaluation, Explorer, SweepConfig};
use windcf_core::power_curve::{PowerCurveParams, Preset};

#[derive(Parser)]
#[command(name = "windcf")]
#[command(about = "Validate a wind power-curve model against observed capacity factors", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one parameter set against a preprocessed dataset
    Evaluate {
        /// Preprocessed hourly dataset (JSON)
        #[arg(short, long)]
        data: PathBuf,

        /// Secondary resources for the blended sweep (JSON)
        #[arg(short, long)]
        multi: Option<PathBuf>,

        /// Parameter preset to start from
        #[arg(short, long, default_value = "optimal")]
        preset: Preset,

        /// Parameter file (JSON, camelCase fields) overriding the preset
        #[arg(long)]
        params: Option<PathBuf>,

        /// Number of sweep points
        #[arg(long, default_value_t = DEFAULT_SWEEP_POINTS)]
        points: usize,

        /// Lowest swept generation, percent of load
        #[arg(long, default_value_t = DEFAULT_SWEEP_MIN_PCT)]
        min_pct: f64,

        /// Highest swept generation, percent of load
        #[arg(long, default_value_t = DEFAULT_SWEEP_MAX_PCT)]
        max_pct: f64,

        /// Blend weights as wind,wind2,solar (enables the blended sweep)
        #[arg(long, value_delimiter = ',')]
        blend: Option<Vec<f64>>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Output file path
        #[arg(short, long)]
        output_file: Option<PathBuf>,
    },
    /// List parameter presets and valid ranges
    Presets,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            data,
            multi,
            preset,
            params,
            points,
            min_pct,
            max_pct,
            blend,
            format,
            output_file,
        } => {
            let dataset = Dataset::from_path(&data)
                .with_context(|| format!("loading dataset {}", data.display()))?;

            let params = match params {
                Some(path) => load_params(&path)?,
                None => preset.params(),
            };

            let sweep = SweepConfig {
                points,
                min_pct,
                max_pct,
            };
            let mut explorer = Explorer::new(dataset, sweep)?;
            if let Some(path) = multi {
                let resources = MultiResource::from_path(&path)
                    .with_context(|| format!("loading resources {}", path.display()))?;
                explorer = explorer.with_resources(resources)?;
            }
            if let Some(weights) = blend {
                let &[wind, wind2, solar] = weights.as_slice() else {
                    bail!("--blend takes exactly three weights: wind,wind2,solar");
                };
                explorer = explorer.with_blend(BlendWeights { wind, wind2, solar });
            }

            let site = site_label(&explorer);
            let evaluation = explorer.evaluate(&params)?;
            let output = match format {
                Format::Text => render_text(&site, evaluation),
                Format::Json => serde_json::to_string_pretty(evaluation)?,
            };
            emit(output, output_file)?;
        }
        Commands::Presets => {
            let mut output = String::new();
            for preset in Preset::ALL {
                output.push_str(&format!(
                    "{preset}: {}\n",
                    serde_json::to_string(&preset.params())?
                ));
            }
            output.push_str("\nranges:\n");
            for (name, (min, max)) in PARAM_NAMES.iter().zip(PARAM_BOUNDS) {
                output.push_str(&format!("  {name:<11} {min:>6} .. {max:<6}\n"));
            }
            emit(output, None)?;
        }
    }

    Ok(())
}

fn load_params(path: &Path) -> Result<PowerCurveParams> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading params {}", path.display()))?;
    let params: PowerCurveParams = serde_json::from_str(&text)
        .with_context(|| format!("parsing params {}", path.display()))?;
    if let Err(e) = params.validate() {
        tracing::warn!("{e}; evaluating anyway");
    }
    Ok(params)
}

fn site_label(explorer: &Explorer) -> String {
    let meta = &explorer.dataset().metadata;
    format!("{} {}", meta.location, meta.year)
}

fn render_text(site: &str, ev: &Evaluation) -> String {
    let mut out = String::new();
    out.push_str(&format!("Site: {site}\n"));
    out.push_str(&format!(
        "Params: {}\n",
        serde_json::to_string(&ev.params).unwrap_or_default()
    ));
    out.push_str("------------------------------------------------------------\n");
    out.push_str(&format!("Correlation (r):     {:.4}\n", ev.r()));
    out.push_str(&format!("R²:                  {:.1}%\n", ev.r2() * 100.0));
    out.push_str(&format!(
        "Regression:          model = {:.3} * actual + {:.3}\n",
        ev.regression.slope, ev.regression.intercept
    ));
    out.push_str(&format!("Actual avg CF:       {:.2}%\n", ev.actual_avg_cf * 100.0));
    out.push_str(&format!("Model avg CF:        {:.2}%\n", ev.model_avg_cf * 100.0));
    out.push_str(&format!("CF error:            {:.2}pp\n", ev.cf_error * 100.0));
    out.push_str(&format!("RMSE / MAE:          {:.4} / {:.4}\n", ev.rmse, ev.mae));
    out.push_str(&format!("Capacity sweep gap:  {:.2}pp\n", ev.sweep_gap));
    out.push_str("------------------------------------------------------------\n");
    out.push_str("  Gen %   Actual match %   Model match %   Blend match %\n");
    for (i, (a, m)) in ev.actual_sweep.iter().zip(&ev.model_sweep).enumerate() {
        let blend = ev
            .blend_sweep
            .as_ref()
            .and_then(|b| b.get(i))
            .map(|p| format!("{:>13.2}", p.match_pct))
            .unwrap_or_default();
        out.push_str(&format!(
            "{:>7.1}   {:>14.2}   {:>13.2}   {}\n",
            a.generation_pct, a.match_pct, m.match_pct, blend
        ));
    }
    out
}

fn emit(output: String, path: Option<PathBuf>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(&path, output)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "report saved");
        }
        None => println!("{output}"),
    }
    Ok(())
}
