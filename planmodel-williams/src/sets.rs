//! Index sets and structured keys.
//!
//! Each index set is a fieldless enum with an `ALL` constant listing its members in order.
//! `Display` renders the label used in variable names. Multi-dimensional lookups use the key
//! structs defined here, which render as `a,b` so family variables are named like
//! `sold[Jan,Prod1]`.
use std::fmt::{self,Display};

macro_rules! label_set {
    ($(#[$doc:meta])* $name:ident { $($var:ident => $label:expr),+ $(,)? }) => {
        $(#[$doc])*
        #[derive(Clone,Copy,Debug,PartialEq,Eq,PartialOrd,Ord,Hash)]
        pub enum $name { $($var),+ }

        impl $name {
            /// All members in order.
            pub const ALL : &'static [$name] = &[$($name::$var),+];
            pub fn label(&self) -> &'static str {
                match self { $($name::$var => $label),+ }
            }
        }

        impl Display for $name {
            fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
        }
    }
}

label_set!(
    /// Planning months.
    Month { Jan => "Jan", Feb => "Feb", Mar => "Mar", Apr => "Apr", May => "May", Jun => "Jun" });
label_set!(Product { Prod1 => "Prod1", Prod2 => "Prod2", Prod3 => "Prod3", Prod4 => "Prod4", Prod5 => "Prod5", Prod6 => "Prod6", Prod7 => "Prod7" });
label_set!(Machine { Grinder => "grinder", VertDrill => "vertDrill", HoriDrill => "horiDrill", Borer => "borer", Planer => "planer" });
label_set!(
    /// Raw oils. The first two are vegetable oils, which are refined on a separate line.
    Oil { Veg1 => "VEG1", Veg2 => "VEG2", Oil1 => "OIL1", Oil2 => "OIL2", Oil3 => "OIL3" });
label_set!(
    /// Worker skill levels, ordered from unskilled to skilled.
    Skill { S1 => "s1", S2 => "s2", S3 => "s3" });
label_set!(
    /// Planning years.
    Year { Y1 => "1", Y2 => "2", Y3 => "3" });

impl Oil {
    pub fn is_vegetable(&self) -> bool { matches!(self, Oil::Veg1 | Oil::Veg2) }
}

impl Skill {
    /// The skill level one step up, if any.
    pub fn next(&self) -> Option<Skill> {
        match self {
            Skill::S1 => Some(Skill::S2),
            Skill::S2 => Some(Skill::S3),
            Skill::S3 => None,
        }
    }
}

/// A time period in a multi-period model. Balances for a period refer to the previous
/// period; the first period has none and is seeded from constant data.
pub trait Period : Copy + Sized + 'static {
    fn periods() -> &'static [Self];
    fn position(&self) -> usize;

    fn previous(&self) -> Option<Self> {
        self.position().checked_sub(1).map(|i| Self::periods()[i])
    }
    fn first() -> Self { Self::periods()[0] }
    fn last() -> Self { Self::periods()[Self::periods().len()-1] }
}

impl Period for Month {
    fn periods() -> &'static [Month] { Month::ALL }
    fn position(&self) -> usize { *self as usize }
}

impl Period for Year {
    fn periods() -> &'static [Year] { Year::ALL }
    fn position(&self) -> usize { *self as usize }
}

//======================================================
// Keys
//======================================================

#[derive(Clone,Copy,Debug,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct MonthProduct { pub month : Month, pub product : Product }

#[derive(Clone,Copy,Debug,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct MonthMachine { pub month : Month, pub machine : Machine }

#[derive(Clone,Copy,Debug,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct MachineProduct { pub machine : Machine, pub product : Product }

#[derive(Clone,Copy,Debug,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct MonthOil { pub month : Month, pub oil : Oil }

#[derive(Clone,Copy,Debug,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct YearSkill { pub year : Year, pub skill : Skill }

/// Retraining (`from < to`) or downgrading (`from > to`) of workers in a year.
#[derive(Clone,Copy,Debug,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct Transfer { pub year : Year, pub from : Skill, pub to : Skill }

impl MonthProduct { pub fn new(month : Month, product : Product) -> MonthProduct { MonthProduct{ month, product } } }
impl MonthMachine { pub fn new(month : Month, machine : Machine) -> MonthMachine { MonthMachine{ month, machine } } }
impl MachineProduct { pub fn new(machine : Machine, product : Product) -> MachineProduct { MachineProduct{ machine, product } } }
impl MonthOil { pub fn new(month : Month, oil : Oil) -> MonthOil { MonthOil{ month, oil } } }
impl YearSkill { pub fn new(year : Year, skill : Skill) -> YearSkill { YearSkill{ year, skill } } }
impl Transfer { pub fn new(year : Year, from : Skill, to : Skill) -> Transfer { Transfer{ year, from, to } } }

impl Display for MonthProduct { fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result { write!(f,"{},{}",self.month,self.product) } }
impl Display for MonthMachine { fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result { write!(f,"{},{}",self.month,self.machine) } }
impl Display for MachineProduct { fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result { write!(f,"{},{}",self.machine,self.product) } }
impl Display for MonthOil { fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result { write!(f,"{},{}",self.month,self.oil) } }
impl Display for YearSkill { fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result { write!(f,"{},{}",self.year,self.skill) } }
impl Display for Transfer { fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result { write!(f,"{},{},{}",self.year,self.from,self.to) } }


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periods() {
        assert_eq!(Month::first(), Month::Jan);
        assert_eq!(Month::last(), Month::Jun);
        assert_eq!(Month::Jan.previous(), None);
        assert_eq!(Month::Apr.previous(), Some(Month::Mar));
        assert_eq!(Year::Y3.previous(), Some(Year::Y2));
        assert_eq!(Year::Y1.previous(), None);
    }

    #[test]
    fn labels() {
        assert_eq!(MonthProduct::new(Month::Feb,Product::Prod7).to_string(), "Feb,Prod7");
        assert_eq!(Transfer::new(Year::Y2,Skill::S1,Skill::S3).to_string(), "2,s1,s3");
        assert_eq!(Machine::VertDrill.to_string(), "vertDrill");
        assert_eq!(Oil::ALL.iter().filter(|o| o.is_vegetable()).count(), 2);
        assert!(Skill::S1 < Skill::S2 && Skill::S2 < Skill::S3);
        assert_eq!(Skill::S3.next(), None);
    }
}
