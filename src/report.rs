//! Plain text solve report.
//!
//! A [SolveReport] is produced by [crate::ModelAPI::report] after solving. Its `Display`
//! implementation writes the solution summary, the problem size and the solver statistics:
//!
//! ```text
//! Solution:
//! Objective value = 108855
//!
//!
//! Problem size:
//! Number of decision variables = 156
//! Number of constraints = 84
//!
//!
//! Advanced usage:
//! Problem solved in 0.021 seconds
//! Problem solved in 412 iterations
//! Problem solved in 17 branch-and-bound nodes
//! ```
use std::fmt::{self,Display};

use crate::model::{SolutionStatus,SolverStatistics};

#[derive(Clone,Debug)]
pub struct SolveReport {
    pub status          : SolutionStatus,
    /// Objective value, if the solver produced a solution.
    pub objective       : Option<f64>,
    pub num_variables   : usize,
    pub num_constraints : usize,
    /// True if the model has integer variables; only then the node count is reported.
    pub is_integer      : bool,
    pub statistics      : SolverStatistics,
}

impl SolveReport {
    /// True if the report describes an optimal solution.
    pub fn is_optimal(&self) -> bool { self.status == SolutionStatus::Optimal }
}

impl Display for SolveReport {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status,self.objective) {
            (SolutionStatus::Optimal,Some(obj)) => {
                writeln!(f,"Solution:")?;
                writeln!(f,"Objective value = {}",obj)?;
            },
            _ => writeln!(f,"The problem does not have an optimal solution.")?
        }

        writeln!(f)?;
        writeln!(f)?;
        writeln!(f,"Problem size:")?;
        writeln!(f,"Number of decision variables = {}",self.num_variables)?;
        writeln!(f,"Number of constraints = {}",self.num_constraints)?;

        writeln!(f)?;
        writeln!(f)?;
        writeln!(f,"Advanced usage:")?;
        writeln!(f,"Problem solved in {} seconds",self.statistics.wall_time.as_secs_f64())?;
        match self.statistics.iterations {
            Some(n) => writeln!(f,"Problem solved in {} iterations",n)?,
            None    => writeln!(f,"Iteration count not reported by the solver")?,
        }
        if self.is_integer {
            match self.statistics.nodes {
                Some(n) => writeln!(f,"Problem solved in {} branch-and-bound nodes",n)?,
                None    => writeln!(f,"Node count not reported by the solver")?,
            }
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn report(status : SolutionStatus, objective : Option<f64>, is_integer : bool) -> SolveReport {
        SolveReport{
            status,
            objective,
            num_variables : 156,
            num_constraints : 84,
            is_integer,
            statistics : SolverStatistics{ wall_time : Duration::from_millis(250), iterations : Some(12), nodes : None },
        }
    }

    #[test]
    fn optimal() {
        let s = report(SolutionStatus::Optimal,Some(108855.0),true).to_string();
        let lines : Vec<&str> = s.lines().collect();
        assert_eq!(lines[0], "Solution:");
        assert_eq!(lines[1], "Objective value = 108855");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Problem size:");
        assert_eq!(lines[5], "Number of decision variables = 156");
        assert_eq!(lines[6], "Number of constraints = 84");
        assert_eq!(lines[9], "Advanced usage:");
        assert_eq!(lines[10], "Problem solved in 0.25 seconds");
        assert_eq!(lines[11], "Problem solved in 12 iterations");
        assert_eq!(lines[12], "Node count not reported by the solver");
        assert_eq!(lines.len(), 13);
    }

    #[test]
    fn not_optimal_still_reports_size() {
        let s = report(SolutionStatus::Infeasible,None,false).to_string();
        assert!(s.starts_with("The problem does not have an optimal solution.\n"));
        assert!(s.contains("Number of decision variables = 156\n"));
        assert!(s.contains("Problem solved in 12 iterations\n"));
        assert!(!s.contains("branch-and-bound"));
        assert!(!s.contains("Node count"));
    }

    #[test]
    fn limit_reached_with_point_is_not_optimal() {
        let s = report(SolutionStatus::LimitReached,Some(1.0),false).to_string();
        assert!(s.starts_with("The problem does not have an optimal solution."));
        assert!(!s.contains("Objective value"));
    }
}
