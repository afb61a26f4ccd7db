use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use pf_app::{
    AppError, AppResult, IntegratorType, ParameterSet, RunSummary, SeriesVariable, SimOptions,
    SimulationResult, project_service, query, run_service,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(about = "PlungerFlow CLI - Dart-plunger launch simulation tool", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print or write the default parameter set
    Defaults {
        /// Output file (.json, .yaml or .yml); prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Load and validate a parameter file
    Validate {
        /// Path to the parameter file
        params_path: PathBuf,
    },
    /// Run one or more launches and print their summaries
    Run {
        /// Parameter files; several are run concurrently
        #[arg(required = true)]
        params_paths: Vec<PathBuf>,
        #[command(flatten)]
        solver: SolverArgs,
    },
    /// Run a launch and export its samples as CSV
    Export {
        /// Path to the parameter file
        params_path: PathBuf,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Variables to export (default: all)
        #[arg(long, value_delimiter = ',', long_help = variables_help())]
        variables: Vec<String>,
        #[command(flatten)]
        solver: SolverArgs,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Method {
    /// Adaptive Dormand-Prince 5(4)
    Rk45,
    /// Fixed-step classical Runge-Kutta
    Rk4,
}

#[derive(Args, Debug)]
struct SolverArgs {
    /// Integration method
    #[arg(long, value_enum, default_value_t = Method::Rk45)]
    method: Method,
    /// Relative tolerance
    #[arg(long, default_value_t = 1e-3)]
    rtol: f64,
    /// Absolute tolerance
    #[arg(long, default_value_t = 1e-6)]
    atol: f64,
    /// Maximum number of solver steps
    #[arg(long, default_value_t = 100_000)]
    max_steps: usize,
    /// RK4 substeps per output interval
    #[arg(long, default_value_t = 20)]
    rk4_substeps: usize,
}

impl SolverArgs {
    fn options(&self) -> SimOptions {
        SimOptions {
            rtol: self.rtol,
            atol: self.atol,
            max_steps: self.max_steps,
            rk4_substeps: self.rk4_substeps,
            integrator: match self.method {
                Method::Rk45 => IntegratorType::DormandPrince45,
                Method::Rk4 => IntegratorType::Rk4,
            },
            ..SimOptions::default()
        }
    }
}

fn variables_help() -> String {
    format!(
        "Comma-separated variables to export (default: all).\nAvailable: {}",
        query::list_variables().join(", ")
    )
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Defaults { output } => cmd_defaults(output.as_deref()),
        Commands::Validate { params_path } => cmd_validate(&params_path),
        Commands::Run {
            params_paths,
            solver,
        } => cmd_run(&params_paths, &solver.options()),
        Commands::Export {
            params_path,
            output,
            variables,
            solver,
        } => cmd_export(&params_path, output.as_deref(), &variables, &solver.options()),
    }
}

fn print_parameters(params: &ParameterSet) {
    for (info, value) in params.entries() {
        let label = format!("{} ({})", info.label, info.unit);
        println!("  {:<8} {:<28} {}", info.key, label, value);
    }
}

fn cmd_defaults(output: Option<&Path>) -> AppResult<()> {
    let params = project_service::default_parameters();
    match output {
        Some(path) => {
            project_service::save_parameters(path, &params)?;
            println!("✓ Wrote default parameters to {}", path.display());
        }
        None => print!("{}", pf_project::to_yaml_string(&params)?),
    }
    Ok(())
}

fn cmd_validate(params_path: &Path) -> AppResult<()> {
    println!("Validating parameters: {}", params_path.display());
    let params = project_service::load_parameters(params_path)?;
    print_parameters(&params);
    println!("✓ Parameters are valid");
    Ok(())
}

fn cmd_run(params_paths: &[PathBuf], opts: &SimOptions) -> AppResult<()> {
    let params = params_paths
        .iter()
        .map(|p| project_service::load_parameters(p))
        .collect::<AppResult<Vec<_>>>()?;

    let started = Instant::now();
    let results = run_service::run_batch(&params, opts);
    let elapsed = started.elapsed();

    let mut failures = 0;
    for (path, result) in params_paths.iter().zip(results) {
        println!("\n{}", path.display());
        match result.and_then(|r| query::summarize(&r).map(|s| (r, s))) {
            Ok((result, summary)) => print_summary(&result, &summary),
            Err(e) => {
                failures += 1;
                println!("  ✗ {e}");
            }
        }
    }
    println!(
        "\nCompleted {} run(s) in {:.3} s",
        params_paths.len(),
        elapsed.as_secs_f64()
    );

    if failures > 0 {
        return Err(AppError::InvalidInput(format!(
            "{failures} of {} runs failed",
            params_paths.len()
        )));
    }
    Ok(())
}

fn print_summary(result: &SimulationResult, summary: &RunSummary) {
    println!("Simulation Results Summary:");
    println!("  End time: {:.4} s", summary.end_time);
    println!("  Number of points: {}", summary.n_points);
    println!("  Success: {}", summary.success);
    println!(
        "  Solver steps: {} accepted, {} rejected, {} RHS evaluations",
        result.stats.accepted_steps, result.stats.rejected_steps, result.stats.rhs_evals
    );
    println!("\nDart:");
    println!("  Final position: {:.4} m", summary.dart_final_position);
    println!("  Final velocity: {:.4} m/s", summary.dart_final_velocity);
    println!("  Max velocity: {:.4} m/s", summary.dart_max_velocity);
    println!("\nPlunger:");
    println!("  Final position: {:.4} m", summary.plunger_final_position);
    println!("  Final velocity: {:.4} m/s", summary.plunger_final_velocity);
    println!("  Max speed: {:.4} m/s", summary.plunger_max_speed);
    println!("\nChamber:");
    println!("  Final pressure: {:.2} Pa", summary.final_pressure);
    println!("  Min pressure: {:.2} Pa", summary.min_pressure);
    println!("  Peak pressure: {:.2} Pa", summary.peak_pressure);
    println!("  Final volume: {:.4e} m³", summary.final_volume);
    println!("  Max volume: {:.4e} m³", summary.max_volume);
    println!("  Max spring force: {:.3} N", summary.max_spring_force);
}

fn cmd_export(
    params_path: &Path,
    output: Option<&Path>,
    variables: &[String],
    opts: &SimOptions,
) -> AppResult<()> {
    let variables: Vec<SeriesVariable> = if variables.is_empty() {
        SeriesVariable::ALL.to_vec()
    } else {
        variables
            .iter()
            .map(|v| v.parse())
            .collect::<AppResult<_>>()?
    };

    let params = project_service::load_parameters(params_path)?;
    let result = run_service::run_with_options(&params, opts)?;

    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    write_csv(sink, &result, &variables)?;

    if let Some(path) = output {
        println!("✓ Exported {} samples to {}", result.len(), path.display());
    }
    Ok(())
}

fn write_csv(
    sink: impl Write,
    result: &SimulationResult,
    variables: &[SeriesVariable],
) -> AppResult<()> {
    let mut writer = csv::Writer::from_writer(sink);

    let mut header = vec!["time_s".to_string()];
    header.extend(variables.iter().map(|v| v.column()));
    writer.write_record(&header).map_err(io::Error::from)?;

    for sample in result.samples() {
        let mut row = vec![sample.time.to_string()];
        row.extend(variables.iter().map(|v| v.value(&sample).to_string()));
        writer.write_record(&row).map_err(io::Error::from)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn csv_has_time_column_and_one_row_per_sample() {
        let params = ParameterSet {
            n_points: 5,
            ..Default::default()
        };
        let result = run_service::run(&params).unwrap();
        let mut buf = Vec::new();
        write_csv(
            &mut buf,
            &result,
            &[SeriesVariable::DartVelocity, SeriesVariable::Pressure],
        )
        .unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "time_s,dart_velocity_m_s,pressure_pa");
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("0,0,101325"));
    }

    #[test]
    fn solver_flags_map_to_options() {
        let cli = Cli::parse_from(["pf-cli", "run", "a.json", "--method", "rk4", "--rtol", "1e-6"]);
        match cli.command {
            Commands::Run { solver, .. } => {
                let opts = solver.options();
                assert_eq!(opts.integrator, IntegratorType::Rk4);
                assert_eq!(opts.rtol, 1e-6);
                assert_eq!(opts.atol, 1e-6);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn export_help_lists_variables() {
        let mut cmd = Cli::command();
        let export = cmd.find_subcommand_mut("export").unwrap();
        let help = export.render_long_help().to_string();
        for name in query::list_variables() {
            assert!(help.contains(name), "missing {name}");
        }
    }
}
