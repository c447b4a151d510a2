//! Manpower planning (Williams, example 5).
//!
//! A company plans its workforce of unskilled, semi-skilled and skilled workers over three
//! years of changing demand. It can recruit, retrain, downgrade and lay off workers, employ a
//! limited number of short-time workers and carry a limited overmanning. Workers leave through
//! wastage; newly recruited and downgraded workers leave at higher rates.
//!
//! Two objectives are defined, see [ObjectiveMode]. The cost objective is available as
//! [ManpowerPlan::cost] whichever objective is optimized, so that the two plans can be
//! compared.
use std::collections::BTreeMap;

use itertools::iproduct;
use planmodel::*;
use planmodel::model::BaseModelTrait;
use tracing::debug;

use crate::error::{lookup,PlanningError};
use crate::sets::*;
use crate::MAX_QUANTITY;

/// Which objective the manpower model optimizes.
#[derive(Clone,Copy,Debug,Default,PartialEq,Eq)]
pub enum ObjectiveMode {
    /// Minimize the total number of workers laid off.
    #[default]
    MinimizeLayoffs,
    /// Minimize the total cost of retraining, layoffs, short-time working and overmanning.
    MinimizeCost,
}

/// Data for the manpower planning model. `Default` holds the data from the book.
#[derive(Clone,Debug)]
pub struct ManpowerData {
    pub current_workforce     : BTreeMap<Skill,f64>,
    /// Workers required.
    pub demand                : BTreeMap<YearSkill,f64>,
    /// Fraction of workers leaving in their first year.
    pub new_hire_attrition    : BTreeMap<Skill,f64>,
    /// Fraction of workers with more than one year of service leaving.
    pub experienced_attrition : BTreeMap<Skill,f64>,
    /// Fraction of downgraded workers leaving.
    pub downgrade_attrition   : f64,
    pub max_hiring            : BTreeMap<YearSkill,f64>,
    /// Total overmanning allowed over all skills.
    pub max_overmanning       : f64,
    /// Short-time workers allowed per skill.
    pub max_part_time         : f64,
    /// A short-time worker counts as this fraction of a full-time worker.
    pub part_time_factor      : f64,
    /// Unskilled workers that can be retrained to semi-skilled per year.
    pub max_train_unskilled   : f64,
    /// Semi-skilled workers retrained to skilled per year, as a fraction of the skilled
    /// workforce.
    pub max_train_semiskilled : f64,
    /// Cost of retraining a worker one level up from the given skill.
    pub training_cost         : BTreeMap<Skill,f64>,
    pub layoff_cost           : BTreeMap<Skill,f64>,
    pub part_time_cost        : BTreeMap<Skill,f64>,
    pub overmanning_cost      : BTreeMap<Skill,f64>,
}

fn per_skill(v : [f64;3]) -> BTreeMap<Skill,f64> { Skill::ALL.iter().copied().zip(v).collect() }

fn per_year_skill(v : [[f64;3];3]) -> BTreeMap<YearSkill,f64> {
    iproduct!(Year::ALL.iter().zip(v.iter()),Skill::ALL.iter().enumerate())
        .map(|((&year,row),(j,&skill))| (YearSkill::new(year,skill),row[j]))
        .collect()
}

impl Default for ManpowerData {
    fn default() -> Self {
        ManpowerData{
            current_workforce     : per_skill([2000.0,1500.0,1000.0]),
            demand                : per_year_skill([[1000.0,1400.0,1000.0],
                                                    [ 500.0,2000.0,1500.0],
                                                    [   0.0,2500.0,2000.0]]),
            new_hire_attrition    : per_skill([0.25,0.20,0.10]),
            experienced_attrition : per_skill([0.10,0.05,0.05]),
            downgrade_attrition   : 0.50,
            max_hiring            : per_year_skill([[500.0,800.0,500.0]; 3]),
            max_overmanning       : 150.0,
            max_part_time         : 50.0,
            part_time_factor      : 0.50,
            max_train_unskilled   : 200.0,
            max_train_semiskilled : 0.25,
            training_cost         : [(Skill::S1,400.0),(Skill::S2,500.0)].into_iter().collect(),
            layoff_cost           : per_skill([200.0,500.0,500.0]),
            part_time_cost        : per_skill([500.0,400.0,400.0]),
            overmanning_cost      : per_skill([1500.0,2000.0,3000.0]),
        }
    }
}

/// The decision variables of the manpower model, and its two objective expressions.
pub struct ManpowerPlan {
    /// Workers recruited.
    pub hire      : VariableFamily<YearSkill>,
    /// Short-time workers.
    pub part_time : VariableFamily<YearSkill>,
    /// Workers employed at the end of the year.
    pub workforce : VariableFamily<YearSkill>,
    /// Workers laid off.
    pub layoff    : VariableFamily<YearSkill>,
    /// Workers employed above demand.
    pub excess    : VariableFamily<YearSkill>,
    /// Workers retrained or downgraded from one skill to another.
    pub train     : VariableFamily<Transfer>,
    /// Total number of layoffs.
    pub layoffs   : Expr,
    /// Total cost.
    pub cost      : Expr,
}

fn year_skills() -> impl Iterator<Item=YearSkill> {
    iproduct!(Year::ALL,Skill::ALL).map(|(&year,&skill)| YearSkill::new(year,skill))
}

/// Build the manpower planning model in `m`, minimizing the objective selected by `mode`.
///
/// Fails with [PlanningError::MissingParameter] if a required table entry is missing.
pub fn build<M>(m : &mut ModelAPI<M>, data : &ManpowerData, mode : ObjectiveMode) -> Result<ManpowerPlan,PlanningError> where M : BaseModelTrait {
    let hire_cap = year_skills()
        .map(|k| Ok((k,lookup("max_hiring",&data.max_hiring,&k)?)))
        .collect::<Result<BTreeMap<YearSkill,f64>,PlanningError>>()?;

    let hire      = m.try_variables("hire",      year_skills(), |k| in_range(0.0,hire_cap[k]))?;
    let part_time = m.try_variables("part_time", year_skills(), |_| in_range(0.0,data.max_part_time))?;
    let workforce = m.try_variables("workforce", year_skills(), |_| in_range(0.0,MAX_QUANTITY))?;
    let layoff    = m.try_variables("layoff",    year_skills(), |_| in_range(0.0,MAX_QUANTITY))?;
    let excess    = m.try_variables("excess",    year_skills(), |_| in_range(0.0,MAX_QUANTITY))?;
    let train     = m.try_variables("train",
                                    iproduct!(Year::ALL,Skill::ALL,Skill::ALL).map(|(&year,&from,&to)| Transfer::new(year,from,to)),
                                    |_| in_range(0.0,MAX_QUANTITY))?;

    // Workforce balance. Retrained workers arrive subject to the wastage of their new skill,
    // downgraded workers subject to the downgrade wastage. Year 1 starts from the current
    // workforce.
    for k in year_skills() {
        let (year,s) = (k.year,k.skill);
        let stay = 1.0 - lookup("experienced_attrition",&data.experienced_attrition,&s)?;
        let stay_new = 1.0 - lookup("new_hire_attrition",&data.new_hire_attrition,&s)?;

        let previous = match year.previous() {
            Some(prev) => workforce[&YearSkill::new(prev,s)].to_expr(),
            None       => Expr::constant(lookup("current_workforce",&data.current_workforce,&s)?),
        };
        let mut transfers = Expr::new();
        for &s2 in Skill::ALL.iter().filter(|&&s2| s2 != s) {
            let arrive = if s2 < s { stay } else { 1.0 - data.downgrade_attrition };
            transfers += arrive * train[&Transfer::new(year,s2,s)] - train[&Transfer::new(year,s,s2)];
        }

        m.try_constraint(Some(format!("balance[{}]",k).as_str()),
                         stay * previous + stay_new * hire[&k] + transfers - layoff[&k] - workforce[&k],
                         equal_to(0.0))?;
    }

    for &year in Year::ALL {
        m.try_constraint(Some(format!("train_unskilled[{}]",year).as_str()),
                         train[&Transfer::new(year,Skill::S1,Skill::S2)],
                         less_than(data.max_train_unskilled))?;
        m.try_constraint(Some(format!("no_direct_training[{}]",year).as_str()),
                         train[&Transfer::new(year,Skill::S1,Skill::S3)],
                         equal_to(0.0))?;
    }

    for &year in Year::ALL {
        m.try_constraint(Some(format!("train_semiskilled[{}]",year).as_str()),
                         train[&Transfer::new(year,Skill::S2,Skill::S3)] - data.max_train_semiskilled * workforce[&YearSkill::new(year,Skill::S3)],
                         less_than(0.0))?;
    }

    for &year in Year::ALL {
        m.try_constraint(Some(format!("overmanning[{}]",year).as_str()),
                         excess.sum_where(|k| k.year == year),
                         less_than(data.max_overmanning))?;
    }

    // Demand is met by full-time workers, overmanning and short-time workers
    for k in year_skills() {
        m.try_constraint(Some(format!("demand[{}]",k).as_str()),
                         workforce[&k] - excess[&k] - data.part_time_factor * part_time[&k],
                         equal_to(lookup("demand",&data.demand,&k)?))?;
    }

    let layoffs = layoff.sum();
    let mut cost = Expr::new();
    for &year in Year::ALL {
        for &s in Skill::ALL {
            if let Some(up) = s.next() {
                cost += lookup("training_cost",&data.training_cost,&s)? * train[&Transfer::new(year,s,up)];
            }
        }
    }
    for k in year_skills() {
        cost += lookup("layoff_cost",&data.layoff_cost,&k.skill)? * layoff[&k]
            + lookup("part_time_cost",&data.part_time_cost,&k.skill)? * part_time[&k]
            + lookup("overmanning_cost",&data.overmanning_cost,&k.skill)? * excess[&k];
    }

    match mode {
        ObjectiveMode::MinimizeLayoffs => m.try_objective(Some("layoffs"), Sense::Minimize, &layoffs)?,
        ObjectiveMode::MinimizeCost    => m.try_objective(Some("cost"), Sense::Minimize, &cost)?,
    }

    debug!(model = "manpower_planning", ?mode, variables = m.num_variables(), constraints = m.num_constraints(), "model built");
    Ok(ManpowerPlan{ hire, part_time, workforce, layoff, excess, train, layoffs, cost })
}
