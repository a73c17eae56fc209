use clap::{Parser, Subcommand, ValueEnum};
use nz_app::{
    AppError, AppResult, DesignReport, EvaluateOptions, NozzleDesign, SweepDefinition,
    SweepParameter, SweepType, design_service, evaluate_service, export, sweep,
};
use nz_core::units::m;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nozzle-cli")]
#[command(about = "Supersonic nozzle calculator - isentropic exit state and bell contour", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the exit state of a design
    Solve {
        /// Design YAML file; flags below override its values
        #[arg(long)]
        design: Option<PathBuf>,
        #[command(flatten)]
        inputs: DesignInputs,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Embed the sampled wall contour in json/yaml output
        #[arg(long)]
        with_contour: bool,
    },
    /// Generate the wall contour as CSV
    Contour {
        /// Exit-to-throat area ratio
        #[arg(long, default_value_t = 5.0)]
        area_ratio: f64,
        /// Throat radius in metres
        #[arg(long, default_value_t = 0.1)]
        throat_radius: f64,
        /// Number of wall samples
        #[arg(long, default_value_t = nz_geometry::DEFAULT_SAMPLES)]
        samples: usize,
        /// Include the mirrored lower wall
        #[arg(long)]
        lower: bool,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Sweep one design input and tabulate the exit state
    Sweep {
        /// Design YAML file (defaults to the built-in design)
        #[arg(long)]
        design: Option<PathBuf>,
        /// Swept input: area-ratio, p0, t0 or pe
        #[arg(long)]
        parameter: SweepParameter,
        /// First value, SI units
        #[arg(long)]
        start: f64,
        /// Last value, SI units
        #[arg(long)]
        end: f64,
        /// Number of points
        #[arg(long, default_value_t = 11)]
        points: usize,
        /// Logarithmic spacing
        #[arg(long)]
        log: bool,
    },
    /// Validate a design file
    Validate {
        /// Path to the design YAML file
        design_path: PathBuf,
    },
    /// Write the default design to a new file
    Init {
        /// Path of the design YAML file to create
        design_path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(clap::Args)]
struct DesignInputs {
    /// Stagnation pressure [Pa]
    #[arg(long)]
    p0: Option<f64>,
    /// Stagnation temperature [K]
    #[arg(long)]
    t0: Option<f64>,
    /// Target exit pressure [Pa]
    #[arg(long)]
    pe: Option<f64>,
    /// Exit-to-throat area ratio
    #[arg(long)]
    area_ratio: Option<f64>,
    /// Ratio of specific heats
    #[arg(long)]
    gamma: Option<f64>,
    /// Specific gas constant [J/(kg K)]
    #[arg(long = "r")]
    gas_constant: Option<f64>,
}

impl DesignInputs {
    fn apply(&self, design: &mut NozzleDesign) {
        if let Some(v) = self.p0 {
            design.stagnation_pressure_pa = v;
        }
        if let Some(v) = self.t0 {
            design.stagnation_temperature_k = v;
        }
        if let Some(v) = self.pe {
            design.exit_pressure_pa = v;
        }
        if let Some(v) = self.area_ratio {
            design.area_ratio = v;
        }
        if let Some(v) = self.gamma {
            design.gas.gamma = v;
        }
        if let Some(v) = self.gas_constant {
            design.gas.gas_constant = v;
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

fn main() -> AppResult<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            design,
            inputs,
            format,
            with_contour,
        } => cmd_solve(design.as_deref(), &inputs, format, with_contour),
        Commands::Contour {
            area_ratio,
            throat_radius,
            samples,
            lower,
            output,
        } => cmd_contour(area_ratio, throat_radius, samples, lower, output.as_deref()),
        Commands::Sweep {
            design,
            parameter,
            start,
            end,
            points,
            log,
        } => cmd_sweep(design.as_deref(), parameter, start, end, points, log),
        Commands::Validate { design_path } => cmd_validate(&design_path),
        Commands::Init { design_path, force } => cmd_init(&design_path, force),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn design_or_default(path: Option<&Path>) -> AppResult<NozzleDesign> {
    match path {
        Some(path) => {
            let design = design_service::load_design(path)?;
            debug!(path = %path.display(), name = %design.name, "design loaded");
            Ok(design)
        }
        None => Ok(NozzleDesign::default()),
    }
}

fn cmd_solve(
    design_path: Option<&Path>,
    inputs: &DesignInputs,
    format: OutputFormat,
    with_contour: bool,
) -> AppResult<()> {
    let mut design = design_or_default(design_path)?;
    inputs.apply(&mut design);

    let report = evaluate_service::evaluate_with(
        &design,
        &EvaluateOptions {
            include_contour: with_contour,
        },
    )?;

    match format {
        OutputFormat::Text => print_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&report)?),
    }
    Ok(())
}

fn print_report(report: &DesignReport) {
    let inputs = &report.inputs;
    let exit = &report.exit;
    let contour = &report.contour;

    println!("Design: {}", report.name);
    println!(
        "  p0 = {:.1} kPa, T0 = {:.1} K, pe = {:.1} kPa, A_e/A_t = {:.3}",
        inputs.stagnation_pressure_pa / 1e3,
        inputs.stagnation_temperature_k,
        inputs.exit_pressure_pa / 1e3,
        inputs.area_ratio
    );
    println!(
        "  gamma = {}, R = {} J/(kg K)",
        inputs.gamma, inputs.gas_constant_j_per_kg_k
    );
    println!("Exit state:");
    println!("  Mach number:          {:.4}", exit.mach);
    println!("  Velocity:             {:.1} m/s", exit.velocity_mps);
    println!("  Static temperature:   {:.2} K", exit.temperature_k);
    println!("  Speed of sound:       {:.1} m/s", exit.speed_of_sound_mps);
    println!(
        "  Isentropic pressure:  {:.2} kPa",
        exit.p_isentropic_pa / 1e3
    );
    println!("  Pressure mismatch:    {:.1} %", exit.mismatch_pct);
    println!("  Regime:               {}", exit.regime_label);
    println!("Contour:");
    println!(
        "  Throat radius {:.4} m, exit radius {:.4} m, length {:.4} m ({} samples)",
        contour.throat_radius_m, contour.exit_radius_m, contour.length_m, contour.samples
    );
    if !contour.control_points_monotonic {
        println!("  Note: wall narrows before the exit for this area ratio");
    }
}

fn cmd_contour(
    area_ratio: f64,
    throat_radius: f64,
    samples: usize,
    lower: bool,
    output: Option<&Path>,
) -> AppResult<()> {
    let contour = nz_geometry::generate(area_ratio, m(throat_radius), samples)?;
    let csv = export::contour_csv(&contour, lower);

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} contour points to {}",
            contour.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_sweep(
    design_path: Option<&Path>,
    parameter: SweepParameter,
    start: f64,
    end: f64,
    points: usize,
    log: bool,
) -> AppResult<()> {
    let design = design_or_default(design_path)?;
    let sweep_type = if log {
        SweepType::Logarithmic
    } else {
        SweepType::Linear
    };
    let definition = SweepDefinition::new(parameter, start, end, points, sweep_type)?;
    let result = sweep::execute_sweep(&design, &definition);

    println!("{}", definition);
    println!(
        "{:>14}  {:>8}  {:>9}  {:>8}  {:>12}  regime",
        format!("{} [{}]", parameter.key(), parameter.unit()),
        "Mach",
        "V [m/s]",
        "T [K]",
        "mismatch [%]"
    );
    for (value, outcome) in result.values.iter().zip(&result.outcomes) {
        match outcome {
            Ok(sol) => println!(
                "{:>14.6}  {:>8.4}  {:>9.1}  {:>8.2}  {:>12.1}  {}",
                value,
                sol.mach,
                sol.velocity.value,
                sol.temperature.value,
                sol.mismatch_pct,
                sol.regime
            ),
            Err(err) => println!("{:>14.6}  failed: {}", value, err),
        }
    }
    println!(
        "{} succeeded, {} failed",
        result.num_successful, result.num_failed
    );
    Ok(())
}

fn cmd_validate(design_path: &Path) -> AppResult<()> {
    println!("Validating design: {}", design_path.display());
    let design = design_service::load_design(design_path)?;
    design_service::validate_design(&design)?;
    println!("✓ Design is valid");
    Ok(())
}

fn cmd_init(design_path: &Path, force: bool) -> AppResult<()> {
    if design_path.exists() && !force {
        return Err(AppError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            design_path.display()
        )));
    }

    design_service::save_design(design_path, &NozzleDesign::default())?;
    println!("✓ Wrote default design to {}", design_path.display());
    Ok(())
}
