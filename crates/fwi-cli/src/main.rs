use std::fs;
use std::process::ExitCode;

use chrono::Utc;
use fwi_mesh::{rectangular_grid, QuadMesh};
use fwi_solver::{HelmholtzSolver, SolveReport};
use serde::{Deserialize, Serialize};

/// Forward-model run description, loaded from a JSON file.
#[derive(Debug, Deserialize)]
struct RunConfig {
    /// Elements along x
    nx: usize,
    /// Elements along y
    ny: usize,
    width: f64,
    height: f64,
    /// Mass-proportional coefficient, uniform over the grid
    mu: f64,
    /// Damping coefficient, uniform over the grid
    eta: f64,
    /// Angular frequency
    omega: f64,
    /// Per-element source terms; elements not listed stay at zero
    #[serde(default)]
    sources: Vec<SourceEntry>,
}

#[derive(Debug, Deserialize)]
struct SourceEntry {
    element: usize,
    magnitude: f64,
}

#[derive(Debug, Serialize)]
struct FieldDump {
    generated_at: String,
    report: SolveReport,
    points: Vec<[f64; 2]>,
    /// Field values as (re, im) pairs, one per point
    field: Vec<[f64; 2]>,
}

fn usage() {
    eprintln!("usage: fwi-cli solve <config.json> [field-out.json]");
}

fn build_mesh(config: &RunConfig) -> Result<QuadMesh, String> {
    if config.nx == 0 || config.ny == 0 {
        return Err("nx and ny must be at least 1".to_string());
    }
    if config.width <= 0.0 || config.height <= 0.0 {
        return Err("width and height must be positive".to_string());
    }

    let mut mesh = rectangular_grid(
        config.nx,
        config.ny,
        config.width,
        config.height,
        config.mu,
        config.eta,
    );
    for entry in &config.sources {
        if entry.element >= mesh.n_elements() {
            return Err(format!(
                "source references element {} but the grid has {} elements",
                entry.element,
                mesh.n_elements()
            ));
        }
        mesh.source[entry.element] = entry.magnitude;
    }
    Ok(mesh)
}

fn print_summary(report: &SolveReport) {
    println!("n_points: {}", report.n_points);
    println!("n_elements: {}", report.n_elements);
    println!("omega: {}", report.omega);
    println!("kernel: {}", report.kernel);
    println!("backend: {}", report.backend);
    println!("solver_name: {}", report.solver_name);
    println!("iterations: {}", report.iterations);
    if let Some(res) = report.residual_norm {
        println!("residual_norm: {res}");
    }
}

fn run(config_path: &str, output_path: Option<&str>) -> Result<(), String> {
    let text = fs::read_to_string(config_path)
        .map_err(|err| format!("cannot read {config_path}: {err}"))?;
    let config: RunConfig =
        serde_json::from_str(&text).map_err(|err| format!("invalid config: {err}"))?;

    let mesh = build_mesh(&config)?;
    let solver = HelmholtzSolver::new();
    let (field, report) = solver
        .solve_with_report(&mesh, config.omega)
        .map_err(|err| format!("solve failed: {err}"))?;

    print_summary(&report);

    if let Some(path) = output_path {
        let dump = FieldDump {
            generated_at: Utc::now().to_rfc3339(),
            report,
            points: mesh.points.clone(),
            field: field.iter().map(|v| [v.re, v.im]).collect(),
        };
        let json = serde_json::to_string_pretty(&dump)
            .map_err(|err| format!("cannot serialize field: {err}"))?;
        fs::write(path, json).map_err(|err| format!("cannot write {path}: {err}"))?;
        println!("field_written: {path}");
    }

    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if !(args.len() == 3 || args.len() == 4) || args[1] != "solve" {
        usage();
        return ExitCode::from(2);
    }

    match run(&args[2], args.get(3).map(String::as_str)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}
