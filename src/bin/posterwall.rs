use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};

#[derive(Parser, Debug)]
#[command(name = "posterwall", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the poster wall for one or more libraries.
    Generate(GenerateArgs),
    /// Render a standalone gradient background PNG.
    Gradient(GradientArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Configuration JSON path.
    #[arg(long)]
    config: PathBuf,

    /// Library name(s); each produces one `<name>.png` in the output dir.
    #[arg(long = "library", required = true)]
    libraries: Vec<String>,
}

#[derive(Parser, Debug)]
struct GradientArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = posterwall::TEMPLATE_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = posterwall::TEMPLATE_HEIGHT)]
    height: u32,

    /// Left (dark) color as RRGGBB hex; random palette bucket when absent.
    #[arg(long)]
    from: Option<String>,

    /// Right (light) color as RRGGBB hex; random palette bucket when absent.
    #[arg(long)]
    to: Option<String>,

    /// Seed for the random color buckets.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Gradient(args) => cmd_gradient(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = posterwall::Config::load(&args.config)?;
    let workflow = posterwall::PosterWorkflow::new(config)?;

    let mut failed = 0usize;
    for library in &args.libraries {
        if !workflow.run(library) {
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} libraries failed", args.libraries.len());
    }
    Ok(())
}

fn cmd_gradient(args: GradientArgs) -> anyhow::Result<()> {
    let from = args.from.as_deref().map(parse_hex_color).transpose()?;
    let to = args.to.as_deref().map(parse_hex_color).transpose()?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let img = posterwall::gradient_background(args.width, args.height, from, to, &mut rng);

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn parse_hex_color(s: &str) -> anyhow::Result<[u8; 3]> {
    let s = s.trim_start_matches('#');
    anyhow::ensure!(s.len() == 6, "expected RRGGBB hex, got '{s}'");
    let parse = |r: std::ops::Range<usize>| {
        u8::from_str_radix(&s[r], 16).with_context(|| format!("invalid hex color '{s}'"))
    };
    Ok([parse(0..2)?, parse(2..4)?, parse(4..6)?])
}
