//! Terminal driver for the Canvas of Life board

use anyhow::{Context, Result};
use canvas_of_life::{
    config::{CliOverrides, Settings},
    evolve_pattern,
    game_of_life::{create_example_patterns, io, load_pattern_from_file, save_coordinates_to_file},
    utils::{ColorOutput, FrameFormatter},
    Grid, Session, Speed,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "canvas_of_life")]
#[command(about = "Conway's Game of Life board with timed and manual stepping")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation on its periodic timer
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Pattern file, `.json` coordinates or `.txt` rows (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Tick speed (overrides config)
        #[arg(short, long, value_enum)]
        speed: Option<Speed>,

        /// Stop once this generation is reached (overrides config)
        #[arg(short, long)]
        generations: Option<u64>,

        /// Cell size in pixels (overrides config)
        #[arg(long)]
        cell_size: Option<u32>,

        /// Write the final live cells to this file
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Print every generation
        #[arg(long)]
        show_frames: bool,
    },

    /// Apply manual steps and print the resulting live cells
    Step {
        /// Pattern file, `.json` coordinates or `.txt` rows
        pattern: PathBuf,

        /// Number of steps
        #[arg(short = 'n', long, default_value_t = 1)]
        generations: u64,

        /// Board width in cells
        #[arg(long, default_value_t = 80)]
        width: usize,

        /// Board height in cells
        #[arg(long, default_value_t = 60)]
        height: usize,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = StepFormat::Json)]
        format: StepFormat,
    },

    /// Create a default configuration and example patterns
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Convert a plain-text pattern to a coordinate file
    Convert {
        /// Plain-text pattern
        input: PathBuf,

        /// Coordinate file to write
        output: PathBuf,
    },
}

/// Encodings for the `step` result
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StepFormat {
    /// `[[col,row],...]` coordinate list
    Json,
    /// Full board as rows of `0` and `1`
    Text,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            pattern,
            speed,
            generations,
            cell_size,
            export,
            show_frames,
        } => {
            let overrides = CliOverrides {
                cell_size,
                speed,
                generations,
                pattern_file: pattern,
                export_file: export,
                show_frames,
            };
            run_command(&config, &overrides)
        }
        Commands::Step {
            pattern,
            generations,
            width,
            height,
            output,
            format,
        } => step_command(&pattern, generations, width, height, output.as_deref(), format),
        Commands::Setup { directory, force } => setup_command(&directory, force),
        Commands::Convert { input, output } => convert_command(&input, &output),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn run_command(config_path: &Path, overrides: &CliOverrides) -> Result<()> {
    let mut settings = load_settings(config_path)?;
    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;

    let mut session = Session::from_settings(&settings).context("Invalid board geometry")?;
    if let Some(path) = &settings.input.pattern_file {
        let coordinates = load_pattern_from_file(path)?;
        session
            .load_coordinates(&coordinates)
            .with_context(|| format!("Pattern {} does not fit the board", path.display()))?;
    }

    let target = settings.simulation.generations;
    let show_frames = settings.output.show_frames;
    info!(generations = target, speed = %settings.simulation.speed, "Running simulation");

    if show_frames {
        println!("{}", FrameFormatter::format_frame(&session.frame()));
    }

    if target > 0 {
        session.start(Instant::now());
        if show_frames {
            println!("{}", FrameFormatter::format_frame(&session.frame()));
        }
    }

    while session.simulation().generation() < target {
        if session.tick(Instant::now()) && show_frames {
            println!("{}", FrameFormatter::format_frame(&session.frame()));
        }
        match session.time_until_tick(Instant::now()) {
            Some(wait) => thread::sleep(wait),
            None => break,
        }
    }
    session.stop();

    let frame = session.frame();
    println!(
        "{}",
        ColorOutput::success(&format!(
            "Reached generation {} with {} live cells",
            frame.generation,
            frame.live_cells.len()
        ))
    );

    if let Some(path) = &settings.output.export_file {
        save_coordinates_to_file(session.grid(), path)?;
        println!("Live cells saved to {}", path.display());
    }

    Ok(())
}

fn step_command(
    pattern: &Path,
    generations: u64,
    width: usize,
    height: usize,
    output: Option<&Path>,
    format: StepFormat,
) -> Result<()> {
    let coordinates = load_pattern_from_file(pattern)?;
    let evolved = evolve_pattern(&coordinates, width, height, generations)
        .with_context(|| format!("Failed to evolve {}", pattern.display()))?;

    let rendered = match format {
        StepFormat::Json => {
            io::coordinates_to_json(&evolved).context("Failed to serialize live cells")?
        }
        StepFormat::Text => {
            let mut grid = Grid::new(width, height, 1);
            grid.set_from_coordinates(&evolved)?;
            io::pattern_to_string(&grid)
        }
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", ColorOutput::success(&format!("Saved {} live cells to {}", evolved.len(), path.display())));
        }
        None => println!("{}", rendered.trim_end()),
    }

    Ok(())
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_path = directory.join("config/default.yaml");
    let pattern_dir = directory.join("patterns");

    if !config_path.exists() || force {
        let mut settings = Settings::default();
        // Relative paths in the config are resolved against its directory
        settings.input.pattern_file = Some(PathBuf::from("../patterns/glider.json"));
        settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_patterns(&pattern_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", pattern_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("Run: cargo run -- run --config config/default.yaml --show-frames");

    Ok(())
}

fn convert_command(input: &Path, output: &Path) -> Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read pattern file: {}", input.display()))?;
    let grid = io::parse_pattern_from_string(&content, 1)
        .with_context(|| format!("Failed to parse pattern from file: {}", input.display()))?;

    save_coordinates_to_file(&grid, output)?;
    println!(
        "{}",
        ColorOutput::success(&format!("Wrote {} live cells to {}", grid.living_count(), output.display()))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "canvas_of_life",
            "run",
            "--config",
            "test.yaml",
            "--speed",
            "hyper",
            "--generations",
            "5",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["canvas_of_life", "run", "--speed", "warp"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("patterns/glider.json").exists());
        assert!(temp_dir.path().join("patterns/beacon.txt").exists());

        let settings = Settings::from_file(&temp_dir.path().join("config/default.yaml")).unwrap();
        let pattern = settings.input.pattern_file.unwrap();
        assert_eq!(load_pattern_from_file(&pattern).unwrap().len(), 5);
    }

    #[test]
    fn test_run_command_reaches_target_generation() {
        let temp_dir = tempdir().unwrap();
        let pattern = temp_dir.path().join("blinker.json");
        let export = temp_dir.path().join("out/final.json");
        std::fs::write(&pattern, "[[4,5],[5,5],[6,5]]").unwrap();

        let overrides = CliOverrides {
            speed: Some(Speed::Hyper),
            generations: Some(3),
            pattern_file: Some(pattern),
            export_file: Some(export.clone()),
            ..CliOverrides::default()
        };
        run_command(&temp_dir.path().join("missing.yaml"), &overrides).unwrap();

        let exported = std::fs::read_to_string(export).unwrap();
        assert_eq!(exported, "[[5,4],[5,5],[5,6]]");
    }

    #[test]
    fn test_step_and_convert_commands() {
        let temp_dir = tempdir().unwrap();
        let text = temp_dir.path().join("blinker.txt");
        let json = temp_dir.path().join("blinker.json");
        let stepped = temp_dir.path().join("stepped.json");
        std::fs::write(&text, "000\n111\n000\n").unwrap();

        convert_command(&text, &json).unwrap();
        assert_eq!(std::fs::read_to_string(&json).unwrap(), "[[0,1],[1,1],[2,1]]");

        step_command(&json, 1, 3, 3, Some(stepped.as_path()), StepFormat::Json).unwrap();
        assert_eq!(std::fs::read_to_string(&stepped).unwrap(), "[[1,0],[1,1],[1,2]]");
    }

    #[test]
    fn test_step_text_format_writes_full_board() {
        let temp_dir = tempdir().unwrap();
        let json = temp_dir.path().join("blinker.json");
        let stepped = temp_dir.path().join("stepped.txt");
        std::fs::write(&json, "[[0,1],[1,1],[2,1]]").unwrap();

        step_command(&json, 1, 4, 3, Some(stepped.as_path()), StepFormat::Text).unwrap();
        assert_eq!(std::fs::read_to_string(&stepped).unwrap(), "0100\n0100\n0100\n");

        let cli = Cli::try_parse_from(["canvas_of_life", "step", "p.json", "--format", "text"]);
        assert!(cli.is_ok());
        assert!(Cli::try_parse_from(["canvas_of_life", "step", "p.json", "--format", "rle"]).is_err());
    }
}
