use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use wavefield::{Backend, WaveConfig};

/// Animated sine-wave particle field.
#[derive(Parser, Debug)]
#[command(name = "wavefield", version, about)]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of particles.
    #[arg(short = 'n', long)]
    count: Option<u32>,

    /// Side length of the cube particles are scattered in.
    #[arg(long)]
    spread: Option<f32>,

    /// Sprite size.
    #[arg(long)]
    size: Option<f32>,

    /// Displacement backend: sequential, parallel or gpu.
    #[arg(short, long)]
    backend: Option<Backend>,

    /// Sprite image (PNG/JPEG).
    #[arg(short, long)]
    texture: Option<PathBuf>,

    /// Seed for the initial particle layout.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    time_scale: Option<f32>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    dump_config: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(WaveConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => WaveConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => WaveConfig::default(),
        };

        if let Some(count) = self.count {
            config = config.with_particle_count(count);
        }
        if let Some(spread) = self.spread {
            config = config.with_spread(spread);
        }
        if let Some(size) = self.size {
            config = config.with_particle_size(size);
        }
        if let Some(backend) = self.backend {
            config = config.with_backend(backend);
        }
        if let Some(texture) = self.texture {
            config = config.with_texture(texture);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(scale) = self.time_scale {
            config = config.with_time_scale(scale);
        }

        config.validate()?;
        Ok((config, self.dump_config))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("wavefield=info,wgpu_core=warn,wgpu_hal=warn"),
    )
    .init();

    let (config, dump) = Cli::parse().into_config()?;
    if dump {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    wavefield::run(config).context("viewer exited with an error")
}
