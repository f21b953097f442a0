use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tifomaster::canvas::{FontLibrary, RasterCanvasFactory};
use tifomaster::config::Config;
use tifomaster::generator::{GeminiGenerator, SourceImage};
use tifomaster::orchestrator::{GenerationOutcome, Orchestrator};
use tifomaster::share::{save_to_dir, share_caption, social_links};
use tifomaster::teams::{self, Team};
use tifomaster::watermark::Compositor;

/// TifoMaster - turn a selfie into a stadium tifo for your team
#[derive(Parser, Debug)]
#[command(name = "tifomaster")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults plus API_KEY from the environment if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a watermarked tifo from a photo
    Generate {
        /// Photo containing the face to feature
        #[arg(short, long)]
        image: PathBuf,

        /// Team id (see `teams`)
        #[arg(short, long)]
        team: String,

        /// Where to save the result (overrides output.dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Stamp the watermark onto an existing image
    Watermark {
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List available teams
    Teams,

    /// Print the share caption and social links for a team
    Share {
        #[arg(short, long)]
        team: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?,
        None => Config::from_env(),
    };

    tifomaster::logging::init_subscriber(&config.logging)
        .map_err(|e| anyhow!("Failed to initialize logging subsystem: {}", e))?;

    tracing::info!(
        config_file = ?args.config,
        model = %config.generator.model,
        output_dir = %config.output.dir.display(),
        "Configuration loaded successfully"
    );

    match args.command {
        Command::Generate {
            image,
            team,
            output_dir,
        } => {
            config.validate().map_err(|e| anyhow!("Invalid configuration: {}", e))?;
            let team = lookup_team(&team)?;
            let dir = output_dir.unwrap_or_else(|| config.output.dir.clone());
            run_generate(&config, image, team, dir).await
        }
        Command::Watermark { input, output } => {
            config
                .validate_local()
                .map_err(|e| anyhow!("Invalid configuration: {}", e))?;
            run_watermark(&config, input, output).await
        }
        Command::Teams => {
            print_teams();
            Ok(())
        }
        Command::Share { team } => {
            let team = lookup_team(&team)?;
            let caption = share_caption(team.name);
            println!("{}", caption);
            for (network, url) in social_links(&caption, &config.share.app_url).iter() {
                println!("{:<9} {}", network, url);
            }
            Ok(())
        }
    }
}

fn lookup_team(id: &str) -> Result<&'static Team> {
    teams::find(id).ok_or_else(|| anyhow!("Unknown team '{}'. Run `tifomaster teams` to list ids.", id))
}

fn build_compositor(config: &Config) -> Compositor {
    let font = FontLibrary::load(config.watermark.font_path.as_deref());
    Compositor::new(RasterCanvasFactory::new(font)).with_max_pixels(config.watermark.max_pixels)
}

async fn run_generate(config: &Config, image: PathBuf, team: &'static Team, dir: PathBuf) -> Result<()> {
    let source = SourceImage::from_path(&image)
        .await
        .with_context(|| format!("Failed to read image {}", image.display()))?;

    let generator = GeminiGenerator::new(&config.generator)?;
    let orchestrator = Orchestrator::new(Arc::new(generator), build_compositor(config));

    orchestrator.select_image(source)?;
    orchestrator.select_team(team)?;

    let outcome = orchestrator.generate().await?;
    let result = match outcome {
        GenerationOutcome::Completed(image) => image,
        GenerationOutcome::Failed(message) => bail!("{}", message),
        GenerationOutcome::Discarded => bail!("Generation was cancelled"),
    };

    let path = save_to_dir(&dir, &result, Some(team))
        .await
        .with_context(|| format!("Failed to save into {}", dir.display()))?;
    orchestrator.dispose();

    println!("{}", path.display());
    Ok(())
}

async fn run_watermark(config: &Config, input: PathBuf, output: PathBuf) -> Result<()> {
    let bytes = tokio::fs::read(&input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let compositor = build_compositor(config);
    let watermarked = tokio::task::spawn_blocking(move || compositor.composite(&bytes)).await??;

    tokio::fs::write(&output, watermarked.png())
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        width = watermarked.width(),
        height = watermarked.height(),
        "Watermark applied"
    );
    Ok(())
}

fn print_teams() {
    println!("National teams:");
    for team in teams::national_teams() {
        println!("  {:<12} {} {}", team.id, team.flag, team.name);
    }
    println!("Clubs:");
    for team in teams::clubs() {
        println!("  {:<12} {} {}", team.id, team.flag, team.name);
    }
}
