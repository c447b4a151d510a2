//! Solve food manufacture 1 with HiGHS and print the report.
use planmodel_williams::food_manufacture::{self,FoodData};
use planmodel_williams::{init_logging,run};

fn main() -> anyhow::Result<()> {
    init_logging();
    let report = run("food_manufacture_1", |m| food_manufacture::build(m, &FoodData::default()))?;
    print!("{}", report);
    Ok(())
}
