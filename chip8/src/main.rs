mod input;
mod run;

use std::path::PathBuf;

use clap::Parser;

use chip8_core::constants::{FRAMES_PER_SECOND, INSTRUCTIONS_PER_SECOND, MAX_RATE};
use chip8_core::Config;

#[derive(Parser, Debug)]
#[command(name = "chip8", about = "Run a Chip-8 program in a window", version)]
struct Cli {
    /// Program image to load at 0x200
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = INSTRUCTIONS_PER_SECOND, value_parser = clap::value_parser!(u32).range(1..=MAX_RATE as i64))]
    ips: u32,

    /// Timer decrements and redraws per second
    #[arg(long, default_value_t = FRAMES_PER_SECOND, value_parser = clap::value_parser!(u32).range(1..=MAX_RATE as i64))]
    fps: u32,

    /// Window pixels per Chip-8 pixel
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,

    /// Seed for CXKK's random numbers
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            instructions_per_second: self.ips,
            frames_per_second: self.fps,
            seed: self.seed,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    run::run(&cli.rom, &cli.config(), cli.scale)
}

#[cfg(test)]
mod test_cli {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["chip8", "pong.ch8"]).unwrap();
        assert_eq!(cli.rom, PathBuf::from("pong.ch8"));
        assert_eq!(cli.scale, 10);
        assert_eq!(cli.config(), Config::default());
    }

    #[test]
    fn test_rates_and_seed() {
        let cli = Cli::try_parse_from([
            "chip8", "--ips", "1000", "--fps", "30", "--seed", "42", "pong.ch8",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.instructions_per_second, 1000);
        assert_eq!(config.frames_per_second, 30);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_zero_rate_rejected() {
        assert!(Cli::try_parse_from(["chip8", "--ips", "0", "pong.ch8"]).is_err());
        assert!(Cli::try_parse_from(["chip8", "--scale", "0", "pong.ch8"]).is_err());
    }

    #[test]
    fn test_rate_above_limit_rejected() {
        assert!(Cli::try_parse_from(["chip8", "--ips", "1000000", "pong.ch8"]).is_ok());
        assert!(Cli::try_parse_from(["chip8", "--ips", "1000001", "pong.ch8"]).is_err());
        assert!(Cli::try_parse_from(["chip8", "--fps", "2000000000", "pong.ch8"]).is_err());
    }

    #[test]
    fn test_rom_required() {
        assert!(Cli::try_parse_from(["chip8"]).is_err());
    }
}
