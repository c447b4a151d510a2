use planmodel::*;
use planmodel::model::BaseModelTrait;

pub const TOL : f64 = 1e-5;

/// Assert that every variable of the family has a primal value within its bounds.
pub fn assert_within_bounds<K,M>(m : &ModelAPI<M>, family : &VariableFamily<K>) where K : Ord, M : BaseModelTrait {
    for v in family.variables() {
        let (lo,up) = m.bounds(&v).unwrap();
        let x = m.primal_solution(&v).unwrap();
        assert!(x >= lo - TOL && x <= up + TOL, "{}: value {} outside [{},{}]", family.name(), x, lo, up);
    }
}

pub fn assert_close(a : f64, b : f64, tol : f64) {
    assert!((a - b).abs() <= tol, "{} != {} (tolerance {})", a, b, tol);
}
