//! Linear expressions.
//!
//! An [Expr] is a sum of variable terms `c_j x_j` plus a constant term. Expressions are built
//! with the usual arithmetic operators from variables, constants and other expressions:
//!
//! ```
//! use planmodel::*;
//! use planmodel::dummy::Model;
//!
//! let mut m = Model::new(None);
//! let x = m.variable(Some("x"), greater_than(0.0));
//! let y = m.variable(Some("y"), greater_than(0.0));
//!
//! let e = 2.0 * x - y + 5.0;
//! assert_eq!(e.terms().len(), 2);
//! assert_eq!(e.fix(), 5.0);
//!
//! let total : Expr = [x,y].iter().sum();
//! assert_eq!(total.terms().len(), 2);
//! ```
//!
//! Terms are not merged while building. [Expr::eval_finalize] sorts the terms by variable,
//! merges duplicates and removes zeros; this is done by the model before an expression is
//! passed to the backend.

use std::iter::Sum;
use std::ops::{Add,AddAssign,Mul,Neg,Sub,SubAssign};

use itertools::Itertools;

use crate::error::ModelError;
use crate::variable::Variable;

#[derive(Clone,Debug,Default,PartialEq)]
pub struct Expr {
    terms : Vec<(Variable,f64)>,
    fix   : f64,
}

/// Anything that can be converted into an [Expr].
pub trait IntoExpr {
    fn into_expr(self) -> Expr;
}

impl Expr {
    /// The zero expression.
    pub fn new() -> Expr { Default::default() }

    /// A constant expression.
    pub fn constant(fix : f64) -> Expr { Expr{ terms : Vec::new(), fix } }

    /// A single term `cof * v`.
    pub fn term(v : Variable, cof : f64) -> Expr { Expr{ terms : vec![(v,cof)], fix : 0.0 } }

    pub fn terms(&self) -> &[(Variable,f64)] { self.terms.as_slice() }

    /// The constant term.
    pub fn fix(&self) -> f64 { self.fix }

    pub fn is_constant(&self) -> bool { self.terms.is_empty() }

    /// Add `cof * v` to the expression.
    pub fn add_term(&mut self, v : Variable, cof : f64) { self.terms.push((v,cof)) }

    fn scale(mut self, s : f64) -> Expr {
        self.terms.iter_mut().for_each(|(_,c)| *c *= s);
        self.fix *= s;
        self
    }

    /// Sort terms by variable, merge terms of the same variable and remove zero terms.
    pub fn eval_finalize(self) -> Expr {
        let mut terms = self.terms;
        terms.sort_by_key(|(v,_)| *v);
        let terms = terms.into_iter()
            .coalesce(|(v0,c0),(v1,c1)| if v0 == v1 { Ok((v0,c0+c1)) } else { Err(((v0,c0),(v1,c1))) })
            .filter(|(_,c)| *c != 0.0)
            .collect();
        Expr{ terms, fix : self.fix }
    }

    /// Fail if any coefficient or the constant is NaN or infinite.
    pub fn check_finite(&self) -> Result<(),ModelError> {
        if ! self.fix.is_finite() {
            return Err(ModelError::InvalidExpression(format!("constant term {} is not finite",self.fix)));
        }
        if let Some((v,c)) = self.terms.iter().find(|(_,c)| ! c.is_finite()) {
            return Err(ModelError::InvalidExpression(format!("coefficient {} of variable {} is not finite",c,v.index())));
        }
        Ok(())
    }

    /// Evaluate the expression given a value for each variable.
    pub fn evaluate<F>(&self, mut value : F) -> f64 where F : FnMut(Variable) -> f64 {
        self.terms.iter().map(|&(v,c)| c * value(v)).sum::<f64>() + self.fix
    }
}

impl IntoExpr for Expr { fn into_expr(self) -> Expr { self } }
impl IntoExpr for &Expr { fn into_expr(self) -> Expr { self.clone() } }
impl IntoExpr for Variable { fn into_expr(self) -> Expr { Expr::term(self,1.0) } }
impl IntoExpr for &Variable { fn into_expr(self) -> Expr { Expr::term(*self,1.0) } }
impl IntoExpr for f64 { fn into_expr(self) -> Expr { Expr::constant(self) } }

impl From<Variable> for Expr { fn from(v : Variable) -> Expr { v.into_expr() } }
impl From<f64> for Expr { fn from(v : f64) -> Expr { Expr::constant(v) } }

//-----------------------------------------------------------------------------
// Operators

impl<R> Add<R> for Expr where R : IntoExpr {
    type Output = Expr;
    fn add(mut self, rhs : R) -> Expr { self += rhs; self }
}

impl<R> Sub<R> for Expr where R : IntoExpr {
    type Output = Expr;
    fn sub(mut self, rhs : R) -> Expr { self -= rhs; self }
}

impl<R> AddAssign<R> for Expr where R : IntoExpr {
    fn add_assign(&mut self, rhs : R) {
        let rhs = rhs.into_expr();
        self.terms.extend(rhs.terms);
        self.fix += rhs.fix;
    }
}

impl<R> SubAssign<R> for Expr where R : IntoExpr {
    fn sub_assign(&mut self, rhs : R) {
        let rhs = rhs.into_expr();
        self.terms.extend(rhs.terms.into_iter().map(|(v,c)| (v,-c)));
        self.fix -= rhs.fix;
    }
}

impl Mul<f64> for Expr {
    type Output = Expr;
    fn mul(self, rhs : f64) -> Expr { self.scale(rhs) }
}

impl Mul<Expr> for f64 {
    type Output = Expr;
    fn mul(self, rhs : Expr) -> Expr { rhs.scale(self) }
}

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr { self.scale(-1.0) }
}

impl<R> Add<R> for Variable where R : IntoExpr {
    type Output = Expr;
    fn add(self, rhs : R) -> Expr { self.into_expr() + rhs }
}

impl<R> Sub<R> for Variable where R : IntoExpr {
    type Output = Expr;
    fn sub(self, rhs : R) -> Expr { self.into_expr() - rhs }
}

impl Mul<f64> for Variable {
    type Output = Expr;
    fn mul(self, rhs : f64) -> Expr { Expr::term(self,rhs) }
}

impl Mul<Variable> for f64 {
    type Output = Expr;
    fn mul(self, rhs : Variable) -> Expr { Expr::term(rhs,self) }
}

impl Neg for Variable {
    type Output = Expr;
    fn neg(self) -> Expr { Expr::term(self,-1.0) }
}

impl Add<Expr> for f64 {
    type Output = Expr;
    fn add(self, rhs : Expr) -> Expr { rhs + self }
}

impl Add<Variable> for f64 {
    type Output = Expr;
    fn add(self, rhs : Variable) -> Expr { rhs + self }
}

impl Sub<Expr> for f64 {
    type Output = Expr;
    fn sub(self, rhs : Expr) -> Expr { -rhs + self }
}

impl Sub<Variable> for f64 {
    type Output = Expr;
    fn sub(self, rhs : Variable) -> Expr { -rhs + self }
}

impl Sum<Expr> for Expr {
    fn sum<I>(iter : I) -> Expr where I : Iterator<Item=Expr> {
        iter.fold(Expr::new(),|acc,e| acc + e)
    }
}

impl Sum<Variable> for Expr {
    fn sum<I>(iter : I) -> Expr where I : Iterator<Item=Variable> {
        Expr{ terms : iter.map(|v| (v,1.0)).collect(), fix : 0.0 }
    }
}

impl<'a> Sum<&'a Variable> for Expr {
    fn sum<I>(iter : I) -> Expr where I : Iterator<Item=&'a Variable> {
        iter.copied().sum()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn var(i : usize) -> Variable { Variable::new(0,i) }

    #[test]
    fn arithmetic() {
        let (x,y) = (var(0),var(1));
        let e = 3.0 * x - (y * 2.0 - 4.0) + 1.0;
        assert_eq!(e.terms(), &[(x,3.0),(y,-2.0)]);
        assert_eq!(e.fix(), 5.0);

        let e = -(x + y) * 2.0;
        assert_eq!(e.terms(), &[(x,-2.0),(y,-2.0)]);

        let e = 10.0 - x;
        assert_eq!(e.terms(), &[(x,-1.0)]);
        assert_eq!(e.fix(), 10.0);
    }

    #[test]
    fn finalize_merges_and_drops_zeros() {
        let (x,y,z) = (var(0),var(1),var(2));
        let e = (z + 2.0 * x + y - x - x + 0.5 * z).eval_finalize();
        assert_eq!(e.terms(), &[(y,1.0),(z,1.5)]);
    }

    #[test]
    fn sums() {
        let vs = [var(0),var(1),var(2)];
        let e : Expr = vs.iter().sum();
        assert_eq!(e.terms().len(), 3);
        let e : Expr = vs.iter().map(|&v| 2.0 * v + 1.0).sum();
        assert_eq!(e.fix(), 3.0);
        assert_eq!(e.evaluate(|_| 1.0), 9.0);
    }

    #[test]
    fn finite_check() {
        let x = var(0);
        assert!((2.0 * x).check_finite().is_ok());
        assert!((f64::NAN * x).check_finite().is_err());
        assert!((x + f64::INFINITY).check_finite().is_err());
    }
}
