//! Solve the manpower planning model with HiGHS, minimizing layoffs, and print the report.
use planmodel_williams::manpower_planning::{self,ManpowerData,ObjectiveMode};
use planmodel_williams::{init_logging,run};

fn main() -> anyhow::Result<()> {
    init_logging();
    let report = run("manpower_planning", |m| manpower_planning::build(m, &ManpowerData::default(), ObjectiveMode::MinimizeLayoffs))?;
    print!("{}", report);
    Ok(())
}
