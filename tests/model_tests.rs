use std::collections::BTreeMap;

use planmodel::*;
use planmodel::dummy::Model;
use rand::{Rng,SeedableRng};
use rand::rngs::StdRng;

#[test]
fn variable_family() {
    let mut m = Model::new(Some("M"));
    let x = m.variables("x", ["a","b","c"], |&k| if k == "b" { in_range(0.0,5.0).integer() } else { in_range(0.0,1.0) });

    assert_eq!(x.len(), 3);
    assert_eq!(m.num_variables(), 3);
    assert_eq!(x.keys().copied().collect::<Vec<&str>>(), vec!["a","b","c"]);
    assert!(m.has_integer_variables());
    assert_eq!(m.bounds(&x[&"b"]).unwrap(), (0.0,5.0));
    assert!(m.is_integer(&x[&"b"]).unwrap());
    assert!(!m.is_integer(&x[&"a"]).unwrap());
    assert_eq!(m.backend().var_name(x[&"c"].index()), Some("x[c]"));
    assert!(x.get(&"d").is_none());
}

#[test]
#[should_panic(expected = "No variable registered for x[d]")]
fn unregistered_key_panics() {
    let mut m = Model::new(None);
    let x = m.variables("x", ["a","b"], |_| nonnegative());
    _ = x[&"d"];
}

#[test]
fn duplicate_key_is_rejected() {
    let mut m = Model::new(None);
    let r = m.try_variables("x", [1,2,1], |_| nonnegative());
    assert_eq!(r.err(), Some(ModelError::DuplicateKey{ family : "x".to_string(), key : "1".to_string() }));
    // Nothing was added
    assert_eq!(m.num_variables(), 0);
}

#[test]
fn invalid_bounds_are_rejected() {
    let mut m = Model::new(None);
    assert!(matches!(m.try_variable(None, in_range(1.0,0.0)), Err(ModelError::InvalidBounds{ .. })));
    assert!(m.try_variables("y", 0..3, |&i| in_range(i as f64,1.0)).is_err());
    assert_eq!(m.num_variables(), 0);
}

#[test]
fn constraint_moves_constant_and_merges_terms() {
    let mut m = Model::new(None);
    let x = m.variable(Some("x"), nonnegative());
    let y = m.variable(Some("y"), nonnegative());
    let c = m.constraint(Some("c"), x + 2.0 * y + 3.0 - x - x + 1.0, in_range(0.0,10.0));

    assert_eq!(c.index(), 0);
    assert_eq!(m.num_constraints(), 1);
    let b = m.backend();
    assert_eq!(b.con_bounds(0), (-4.0,6.0));
    assert_eq!(b.con_row(0), (&[0usize,1][..],&[-1.0,2.0][..]));
    assert_eq!(b.con_name(0), Some("c"));

    // x - x cancels completely
    m.constraint(None, x - x + y, equal_to(2.0));
    assert_eq!(m.backend().con_row(1), (&[1usize][..],&[1.0][..]));
}

#[test]
fn constraint_errors() {
    let mut m = Model::new(None);
    let x = m.variable(None, nonnegative());
    assert_eq!(m.try_constraint(None, 2.0 * x, less_than(1.0).integer()).err(), Some(ModelError::IntegerConstraint));
    assert!(matches!(m.try_constraint(None, f64::NAN * x, less_than(1.0)), Err(ModelError::InvalidExpression(_))));
    assert!(matches!(m.try_constraint(None, x, in_range(2.0,1.0)), Err(ModelError::InvalidBounds{ .. })));
    // Finite coefficients whose sum overflows when terms are merged
    assert!(matches!(m.try_constraint(None, 1.0e308 * x + 1.0e308 * x, less_than(1.0)), Err(ModelError::InvalidExpression(_))));
    assert!(matches!(m.try_objective(None, Sense::Minimize, 1.0e308 * x + 1.0e308 * x), Err(ModelError::InvalidExpression(_))));
    assert_eq!(m.num_constraints(), 0);
    assert!(m.backend().objective_terms().is_none());
}

#[test]
fn foreign_variable() {
    let mut m1 = Model::new(Some("m1"));
    let mut m2 = Model::new(Some("m2"));
    let x = m1.variable(None, nonnegative());
    let _ = m2.variable(None, nonnegative());

    assert_ne!(m1.id(), m2.id());
    assert!(matches!(m2.try_constraint(None, 2.0 * x, less_than(1.0)), Err(ModelError::ForeignVariable{ .. })));
    assert!(matches!(m2.try_objective(None, Sense::Minimize, x), Err(ModelError::ForeignVariable{ .. })));
    assert!(matches!(m2.bounds(&x), Err(ModelError::ForeignVariable{ .. })));
}

#[test]
fn objective_life_cycle() {
    let mut m = Model::new(None);
    let x = m.variable(None, in_range(0.0,4.0));
    let y = m.variable(None, nonnegative());

    assert_eq!(m.solve().err(), Some(ModelError::MissingObjective));
    m.objective(Some("obj"), Sense::Maximize, 3.0 * x + y - 0.5 * y + 7.0);
    let (sense,subj,cof,fix) = m.backend().objective_terms().unwrap();
    assert_eq!(sense, Sense::Maximize);
    assert_eq!(subj, &[0,1]);
    assert_eq!(cof, &[3.0,0.5]);
    assert_eq!(fix, 7.0);

    assert_eq!(m.try_objective(None, Sense::Minimize, x).err(), Some(ModelError::ObjectiveAlreadySet));

    // The dummy backend cannot solve; the model is still closed afterwards.
    assert!(matches!(m.solve(), Err(ModelError::Backend(_))));
    assert!(m.is_solved());
    assert_eq!(m.solve().err(), Some(ModelError::AlreadySolved));
    assert_eq!(m.try_variable(None, nonnegative()).err(), Some(ModelError::AlreadySolved));
    assert_eq!(m.try_constraint(None, x, less_than(1.0)).err(), Some(ModelError::AlreadySolved));
}

#[test]
fn solution_unavailable_before_solve() {
    let mut m = Model::new(None);
    let x = m.variable(None, nonnegative());
    let c = m.constraint(None, x, less_than(1.0));
    assert_eq!(m.solution_status(), SolutionStatus::NotSolved);
    assert_eq!(m.primal_solution(&x).err(), Some(ModelError::SolutionUnavailable(SolutionStatus::NotSolved)));
    assert!(m.primal_solution(&c).is_err());
    assert!(m.evaluate_primal(2.0 * x).is_err());
    assert!(m.primal_objective_value().is_none());
    assert!(m.statistics().is_none());

    let r = m.report().to_string();
    assert!(r.starts_with("The problem does not have an optimal solution."));
    assert!(r.contains("Number of decision variables = 1\n"));
    assert!(r.contains("Number of constraints = 1\n"));
}

#[test]
fn parameters() {
    let mut m = Model::new(None);
    m.set_parameter("time_limit", 10.0);
    m.set_parameter("threads", 2);
    m.set_parameter("presolve", "off");
    m.set_parameter("output_flag", false);
    assert_eq!(m.backend().parameter("time_limit"), Some("10"));
    assert_eq!(m.backend().parameter("threads"), Some("2"));
    assert_eq!(m.backend().parameter("presolve"), Some("off"));
    assert_eq!(m.backend().parameter("output_flag"), Some("false"));
}

// Random sums of terms; the row passed to the backend must equal the merged coefficients.
#[test]
fn random_expressions() {
    let mut rng = StdRng::seed_from_u64(1234);
    let n = 20;
    let mut m = Model::new(None);
    let x = m.variables("x", 0..n, |_| unbounded());

    for _ in 0..50 {
        let mut e = Expr::new();
        let mut expected = BTreeMap::new();
        let mut fix = 0.0;
        for _ in 0..rng.gen_range(1..40) {
            let i = rng.gen_range(0..n);
            let c = rng.gen_range(-3..=3) as f64;
            e = e + c * x[&i];
            *expected.entry(i).or_insert(0.0) += c;
            if rng.gen_bool(0.2) {
                let k = rng.gen_range(-5..5) as f64;
                e = e + k;
                fix += k;
            }
        }
        expected.retain(|_,c| *c != 0.0);

        let con = m.constraint(None, e, less_than(0.0));
        let (subj,cof) = m.backend().con_row(con.index());
        assert_eq!(subj.to_vec(), expected.keys().map(|&i| x[&i].index()).collect::<Vec<usize>>());
        assert_eq!(cof.to_vec(), expected.values().copied().collect::<Vec<f64>>());
        assert_eq!(m.backend().con_bounds(con.index()), (f64::NEG_INFINITY,-fix));
    }
}
