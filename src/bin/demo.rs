//! Statics Solver walkthrough - beam, truss and cable scenarios

use statics_solver::prelude::*;

fn main() {
    env_logger::init();

    beam_demo();
    truss_demo();
    catenary_demo();
}

fn beam_demo() {
    println!("=== Simply-supported beam: 6 m, 10 kN at midspan ===\n");

    let mut beam = BeamProblem::new(6.0);
    beam.add_point_load(10.0, 3.0);
    beam.add_distributed_keyword(0.0, 3.0, "uniforme", &[2.0]);

    let result = beam.solve().expect("beam solve failed");
    println!("R_A = {:.3} kN, R_B = {:.3} kN", result.reactions.ra, result.reactions.rb);
    println!("V(x) = {}", result.shear);
    println!("M(x) = {}", result.moment);
    println!(
        "max |V| = {:.3} kN at x = {:.3} m",
        result.max_shear.magnitude(),
        result.max_shear.at
    );
    println!(
        "max |M| = {:.3} kN*m at x = {:.3} m",
        result.max_moment.magnitude(),
        result.max_moment.at
    );
    for diag in &result.diagnostics {
        println!("warning: {diag}");
    }
    println!();
}

fn truss_demo() {
    println!("=== Plane truss: loaded triangle ===\n");

    let mut truss = TrussProblem::new();
    truss.add_node("A", 0.0, 0.0).unwrap();
    truss.add_node("B", 4.0, 0.0).unwrap();
    truss.add_node("C", 2.0, 3.0).unwrap();
    truss.add_bar("AB", "A", "B").unwrap();
    truss.add_bar("AC", "A", "C").unwrap();
    truss.add_bar("BC", "B", "C").unwrap();
    truss.add_support("A", SupportKind::Pinned).unwrap();
    truss.add_support("B", SupportKind::Roller).unwrap();
    truss.add_load("C", 0.0, -10.0).unwrap();

    let result = truss.solve().expect("truss solve failed");
    for bar in &result.bar_forces {
        println!("bar {}: N = {:+.3} kN ({})", bar.bar, bar.force, bar.nature);
    }
    for reaction in &result.reactions {
        println!("{} = {:+.3} kN", reaction.name, reaction.value);
    }
    if let Some(max) = &result.max_force {
        println!("max |N| = {:.3} kN in bar {}", max.force.abs(), max.bar);
    }
    println!();
}

fn catenary_demo() {
    println!("=== Catenary cable: 20 m span, target sag 2.5 m ===\n");

    let problem = CatenaryProblem::new(20.0, 1.2, 0.0)
        .with_target_sag(2.5)
        .with_parabola();

    let result = problem.solve().expect("catenary solve failed");
    println!("{}", result.profile);
    println!("sag = {:.4} m", result.sag);
    println!("H = {:.3} kN", result.h);
    println!("T_left = {:.3} kN, T_right = {:.3} kN", result.t_left, result.t_right);

    // The numeric samples are what a plotting or export collaborator consumes
    let json = serde_json::to_string(&result.samples).expect("serialize samples");
    println!("profile samples: {} points ({} bytes as JSON)", result.samples.len(), json.len());
}
