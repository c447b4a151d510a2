//!
//! Domains define the bounds and integrality of a model item.
//!
//! Domains are created with a builder-like logic. An object is created with one of the
//! functions [greater_than], [less_than], [equal_to], [unbounded], [nonnegative] or
//! [in_range], then modified with properties like [LinearDomain::integer]. The builder object
//! is passed to [crate::ModelAPI::variable] or [crate::ModelAPI::constraint], which turns it
//! into a pair of bounds.
//!
//! For a constraint the domain bounds the value of the expression, so
//! `m.constraint(None, x + y, less_than(5.0))` means `x + y <= 5`.
//!
use crate::error::ModelError;

/// Bound type of a one-sided linear domain.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum LinearDomainType {
    /// `x >= offset`
    NonNegative,
    /// `x <= offset`
    NonPositive,
    /// `x == offset`
    Zero,
    /// No bounds
    Free
}

/// A linear domain defined by a bound type and an offset.
#[derive(Clone,Copy,Debug)]
pub struct LinearDomain {
    domain_type : LinearDomainType,
    offset      : f64,
    is_integer  : bool,
}

/// A two-sided domain `lower <= x <= upper`.
#[derive(Clone,Copy,Debug)]
pub struct LinearRangeDomain {
    lower      : f64,
    upper      : f64,
    is_integer : bool,
}

/// Anything that can be turned into a pair of bounds for a model item.
pub trait Domain {
    /// Return `(lower,upper)`. Infinite values mean the side is unbounded.
    fn bounds(&self) -> Result<(f64,f64),ModelError>;
    fn is_integer(&self) -> bool;
}

impl LinearDomain {
    pub fn integer(self) -> LinearDomain { LinearDomain{ is_integer : true, ..self } }
    pub fn continuous(self) -> LinearDomain { LinearDomain{ is_integer : false, ..self } }
    pub fn with_offset(self, offset : f64) -> LinearDomain { LinearDomain{ offset, ..self } }
    pub fn domain_type(&self) -> LinearDomainType { self.domain_type }
    pub fn offset(&self) -> f64 { self.offset }
}

impl LinearRangeDomain {
    pub fn integer(self) -> LinearRangeDomain { LinearRangeDomain{ is_integer : true, ..self } }
    pub fn continuous(self) -> LinearRangeDomain { LinearRangeDomain{ is_integer : false, ..self } }
    pub fn lower(&self) -> f64 { self.lower }
    pub fn upper(&self) -> f64 { self.upper }
}

impl Domain for LinearDomain {
    fn bounds(&self) -> Result<(f64,f64),ModelError> {
        if self.offset.is_nan() {
            return Err(ModelError::InvalidBounds{ lower : self.offset, upper : self.offset });
        }
        Ok(match self.domain_type {
            LinearDomainType::NonNegative => (self.offset, f64::INFINITY),
            LinearDomainType::NonPositive => (f64::NEG_INFINITY, self.offset),
            LinearDomainType::Zero        => (self.offset, self.offset),
            LinearDomainType::Free        => (f64::NEG_INFINITY, f64::INFINITY),
        })
    }
    fn is_integer(&self) -> bool { self.is_integer }
}

impl Domain for LinearRangeDomain {
    fn bounds(&self) -> Result<(f64,f64),ModelError> {
        if self.lower.is_nan() || self.upper.is_nan() || self.lower > self.upper {
            Err(ModelError::InvalidBounds{ lower : self.lower, upper : self.upper })
        }
        else {
            Ok((self.lower,self.upper))
        }
    }
    fn is_integer(&self) -> bool { self.is_integer }
}

/// Domain of values greater than or equal to `v`.
pub fn greater_than(v : f64) -> LinearDomain { LinearDomain{ domain_type : LinearDomainType::NonNegative, offset : v, is_integer : false } }
/// Domain of values less than or equal to `v`.
pub fn less_than(v : f64) -> LinearDomain { LinearDomain{ domain_type : LinearDomainType::NonPositive, offset : v, is_integer : false } }
/// Domain consisting of the single value `v`.
pub fn equal_to(v : f64) -> LinearDomain { LinearDomain{ domain_type : LinearDomainType::Zero, offset : v, is_integer : false } }
/// Domain of all values equal to zero.
pub fn zero() -> LinearDomain { equal_to(0.0) }
/// Domain of non-negative values.
pub fn nonnegative() -> LinearDomain { greater_than(0.0) }
/// Unbounded domain.
pub fn unbounded() -> LinearDomain { LinearDomain{ domain_type : LinearDomainType::Free, offset : 0.0, is_integer : false } }

/// Define a range for use with [crate::ModelAPI::constraint] and
/// [crate::ModelAPI::variable] to create ranged variables and constraints.
///
/// # Arguments
/// - `lower` Lower bound
/// - `upper` Upper bound
pub fn in_range(lower : f64, upper : f64) -> LinearRangeDomain {
    LinearRangeDomain{ lower, upper, is_integer : false }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_sided_bounds() {
        assert_eq!(greater_than(2.0).bounds().unwrap(), (2.0,f64::INFINITY));
        assert_eq!(less_than(-1.0).bounds().unwrap(), (f64::NEG_INFINITY,-1.0));
        assert_eq!(equal_to(5.0).bounds().unwrap(), (5.0,5.0));
        assert_eq!(unbounded().bounds().unwrap(), (f64::NEG_INFINITY,f64::INFINITY));
        assert!(!nonnegative().is_integer());
        assert!(nonnegative().integer().is_integer());
        assert!(!nonnegative().integer().continuous().is_integer());
    }

    #[test]
    fn ranged_bounds() {
        assert_eq!(in_range(0.0,3.0).integer().bounds().unwrap(), (0.0,3.0));
        assert_eq!(in_range(1.0,1.0).bounds().unwrap(), (1.0,1.0));
        assert!(matches!(in_range(2.0,1.0).bounds(), Err(ModelError::InvalidBounds{ .. })));
        assert!(in_range(f64::NAN,1.0).bounds().is_err());
        assert!(greater_than(f64::NAN).bounds().is_err());
    }
}
