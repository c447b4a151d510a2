//! Solve factory planning 2 with HiGHS and print the report.
use planmodel_williams::factory_planning::{self,FactoryData};
use planmodel_williams::{init_logging,run};

fn main() -> anyhow::Result<()> {
    init_logging();
    let report = run("factory_planning_2", |m| factory_planning::build(m, &FactoryData::default()))?;
    print!("{}", report);
    Ok(())
}
