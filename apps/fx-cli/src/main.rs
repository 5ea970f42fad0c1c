use clap::{Parser, Subcommand, ValueEnum};
use fx_circuit::{Circuit, CircuitError, ComponentKind, Terminal};
use fx_core::ComponentId;
use serde::Serialize;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fx-cli")]
#[command(about = "Fluxnet CLI - steady-state flow network solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a canned demo circuit and report per-component currents
    Demo {
        /// Which circuit to build
        #[arg(value_enum)]
        topology: Topology,
        /// Override the driving pressure of every source
        #[arg(short, long)]
        pressure: Option<f64>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Topology {
    /// One source across a 3Ω ∥ 6Ω pair
    Parallel,
    /// One source across a 1Ω + 4Ω chain
    Series,
    /// One source across a three-rung resistor ladder
    Ladder,
}

/// A labeled circuit: the component handles in presentation order.
struct Demo {
    circuit: Circuit,
    labels: Vec<(ComponentId, &'static str)>,
}

#[derive(Serialize)]
struct Row {
    label: &'static str,
    kind: ComponentKind,
    current: f64,
}

#[derive(Serialize)]
struct Report {
    rows: Vec<Row>,
    equivalent_resistances: Vec<(&'static str, f64)>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Demo {
            topology,
            pressure,
            json,
        } => match run_demo(topology, pressure, json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run_demo(topology: Topology, pressure: Option<f64>, json: bool) -> Result<(), CircuitError> {
    let mut demo = match topology {
        Topology::Parallel => parallel_demo(),
        Topology::Series => series_demo(),
        Topology::Ladder => ladder_demo(),
    };

    if let Some(p) = pressure {
        for &(id, _) in &demo.labels {
            if matches!(demo.circuit.kind(id)?, ComponentKind::VoltageSource { .. }) {
                demo.circuit.set_voltage(id, p)?;
            }
        }
    }

    let solution = demo.circuit.solve()?;

    let rows: Vec<Row> = demo
        .labels
        .iter()
        .map(|&(id, label)| {
            Ok(Row {
                label,
                kind: demo.circuit.kind(id)?,
                current: solution.current(id),
            })
        })
        .collect::<Result<_, CircuitError>>()?;
    let equivalent_resistances: Vec<(&'static str, f64)> = demo
        .labels
        .iter()
        .filter_map(|&(id, label)| {
            solution
                .equivalent_resistances
                .get(&id)
                .map(|&r| (label, r))
        })
        .collect();
    let report = Report {
        rows,
        equivalent_resistances,
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("report serializes")
        );
        return Ok(());
    }

    println!("{:<12} {:<22} {:>10}", "component", "kind", "current");
    for row in &report.rows {
        let kind = match row.kind {
            ComponentKind::Resistor { resistance } => format!("resistor {resistance} ohm"),
            ComponentKind::VoltageSource { voltage } => format!("source {voltage} V"),
        };
        println!("{:<12} {:<22} {:>10.4}", row.label, kind, row.current);
    }
    for (label, r) in &report.equivalent_resistances {
        println!("{label}: equivalent resistance = {r} ohm");
    }
    Ok(())
}

fn wire(circuit: &mut Circuit, comp: ComponentId, a: fx_core::JunctionId, b: fx_core::JunctionId) {
    circuit
        .connect(comp, Terminal::Input, a)
        .expect("demo wiring is well-formed");
    circuit
        .connect(comp, Terminal::Output, b)
        .expect("demo wiring is well-formed");
}

fn parallel_demo() -> Demo {
    let mut circuit = Circuit::new();
    let top = circuit.add_junction();
    let bottom = circuit.add_junction();
    let battery = circuit.add_voltage_source(12.0);
    let r3 = circuit.add_resistor(3.0);
    let r6 = circuit.add_resistor(6.0);
    wire(&mut circuit, battery, top, bottom);
    wire(&mut circuit, r3, top, bottom);
    wire(&mut circuit, r6, top, bottom);
    Demo {
        circuit,
        labels: vec![(battery, "battery"), (r3, "r3"), (r6, "r6")],
    }
}

fn series_demo() -> Demo {
    let mut circuit = Circuit::new();
    let a = circuit.add_junction();
    let b = circuit.add_junction();
    let c = circuit.add_junction();
    let battery = circuit.add_voltage_source(10.0);
    let r1 = circuit.add_resistor(1.0);
    let r4 = circuit.add_resistor(4.0);
    wire(&mut circuit, battery, a, c);
    wire(&mut circuit, r1, a, b);
    wire(&mut circuit, r4, b, c);
    Demo {
        circuit,
        labels: vec![(battery, "battery"), (r1, "r1"), (r4, "r4")],
    }
}

fn ladder_demo() -> Demo {
    let mut circuit = Circuit::new();
    let left: Vec<_> = (0..3).map(|_| circuit.add_junction()).collect();
    let right: Vec<_> = (0..3).map(|_| circuit.add_junction()).collect();
    let battery = circuit.add_voltage_source(9.0);
    wire(&mut circuit, battery, left[0], right[0]);

    let mut labels = vec![(battery, "battery")];
    let rung_labels = ["rung0", "rung1", "rung2"];
    let rail_labels = ["rail-l0", "rail-r0", "rail-l1", "rail-r1"];
    let mut rails = rail_labels.into_iter();

    for i in 0..3 {
        let rung = circuit.add_resistor(10.0);
        wire(&mut circuit, rung, left[i], right[i]);
        labels.push((rung, rung_labels[i]));
        if i + 1 < 3 {
            let l = circuit.add_resistor(2.0);
            wire(&mut circuit, l, left[i], left[i + 1]);
            labels.push((l, rails.next().unwrap()));
            let r = circuit.add_resistor(2.0);
            wire(&mut circuit, r, right[i], right[i + 1]);
            labels.push((r, rails.next().unwrap()));
        }
    }
    Demo { circuit, labels }
}
