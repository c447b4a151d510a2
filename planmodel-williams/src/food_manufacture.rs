//! Food manufacture 1 (Williams, example 1).
//!
//! A food is made by refining and blending five raw oils, two vegetable and three
//! non-vegetable. Oils are bought at monthly prices, can be stored at a holding cost, and are
//! refined on two lines with separate capacities. The hardness of the product must stay within
//! given limits. The model maximizes profit over six months, starting and ending with a fixed
//! stock of each oil.
use std::collections::BTreeMap;

use itertools::iproduct;
use planmodel::*;
use planmodel::model::BaseModelTrait;
use tracing::debug;

use crate::error::{lookup,PlanningError};
use crate::sets::*;
use crate::MAX_QUANTITY;

/// Data for the food manufacture model. `Default` holds the data from the book.
#[derive(Clone,Debug)]
pub struct FoodData {
    /// Price per ton of raw oil.
    pub cost               : BTreeMap<MonthOil,f64>,
    pub hardness           : BTreeMap<Oil,f64>,
    /// Selling price per ton of product.
    pub price              : f64,
    /// Stock of each oil before January.
    pub initial_inventory  : f64,
    /// Required stock of each oil at the end of June.
    pub target_inventory   : f64,
    /// Tons of vegetable oil refined per month.
    pub veg_capacity       : f64,
    /// Tons of non-vegetable oil refined per month.
    pub non_veg_capacity   : f64,
    pub min_hardness       : f64,
    pub max_hardness       : f64,
    /// Storage cost per ton per month.
    pub holding_cost       : f64,
}

impl Default for FoodData {
    fn default() -> Self {
        let cost : [[f64;5];6] = [
            [110.0,120.0,130.0,110.0,115.0],
            [130.0,130.0,110.0, 90.0,115.0],
            [110.0,140.0,130.0,100.0, 95.0],
            [120.0,110.0,120.0,120.0,125.0],
            [100.0,120.0,150.0,110.0,105.0],
            [ 90.0,100.0,140.0, 80.0,135.0],
        ];
        let hardness = [8.8,6.1,2.0,4.2,5.0];

        FoodData{
            cost : iproduct!(Month::ALL.iter().zip(cost.iter()),Oil::ALL.iter().enumerate())
                .map(|((&mth,row),(j,&oil))| (MonthOil::new(mth,oil),row[j]))
                .collect(),
            hardness : Oil::ALL.iter().copied().zip(hardness).collect(),
            price : 150.0,
            initial_inventory : 500.0,
            target_inventory : 500.0,
            veg_capacity : 200.0,
            non_veg_capacity : 250.0,
            min_hardness : 3.0,
            max_hardness : 6.0,
            holding_cost : 5.0,
        }
    }
}

/// The decision variables of the food manufacture model.
pub struct FoodPlan {
    /// Tons of food produced.
    pub produce   : VariableFamily<Month>,
    /// Tons of oil bought.
    pub buy       : VariableFamily<MonthOil>,
    /// Tons of oil refined and used in the blend.
    pub consume   : VariableFamily<MonthOil>,
    /// Tons of oil in store at the end of the month.
    pub inventory : VariableFamily<MonthOil>,
}

fn month_oils() -> impl Iterator<Item=MonthOil> {
    iproduct!(Month::ALL,Oil::ALL).map(|(&mth,&oil)| MonthOil::new(mth,oil))
}

/// Build the food manufacture model in `m`.
///
/// Adds the variables, the constraints and the profit objective (maximized). Fails with
/// [PlanningError::MissingParameter] if an oil cost or hardness is missing.
pub fn build<M>(m : &mut ModelAPI<M>, data : &FoodData) -> Result<FoodPlan,PlanningError> where M : BaseModelTrait {
    let hardness = Oil::ALL.iter()
        .map(|oil| Ok((*oil,lookup("hardness",&data.hardness,oil)?)))
        .collect::<Result<BTreeMap<Oil,f64>,PlanningError>>()?;

    let produce   = m.try_variables("prod",        Month::ALL.iter().copied(), |_| in_range(0.0,MAX_QUANTITY))?;
    let buy       = m.try_variables("buy_oil",     month_oils(), |_| in_range(0.0,MAX_QUANTITY))?;
    let consume   = m.try_variables("consume_oil", month_oils(), |_| in_range(0.0,MAX_QUANTITY))?;
    let inventory = m.try_variables("invt_oil",    month_oils(), |_| in_range(0.0,MAX_QUANTITY))?;

    // Balance: stock from last month plus purchases equals use plus stock. January starts
    // from the initial stock.
    for k in month_oils() {
        let stock_in = match k.month.previous() {
            Some(prev) => inventory[&MonthOil::new(prev,k.oil)].to_expr(),
            None       => Expr::constant(data.initial_inventory),
        };
        m.try_constraint(Some(format!("balance[{}]",k).as_str()),
                         stock_in + buy[&k] - consume[&k] - inventory[&k],
                         equal_to(0.0))?;
    }

    for &oil in Oil::ALL {
        let k = MonthOil::new(Month::last(),oil);
        m.try_constraint(Some(format!("inventory_target[{}]",oil).as_str()), inventory[&k], equal_to(data.target_inventory))?;
    }

    // Refining capacity per line
    for &mth in Month::ALL {
        m.try_constraint(Some(format!("veg_capacity[{}]",mth).as_str()),
                         consume.sum_where(|k| k.month == mth && k.oil.is_vegetable()),
                         less_than(data.veg_capacity))?;
        m.try_constraint(Some(format!("non_veg_capacity[{}]",mth).as_str()),
                         consume.sum_where(|k| k.month == mth && ! k.oil.is_vegetable()),
                         less_than(data.non_veg_capacity))?;
    }

    // Hardness of the blend, relative to the amount produced
    for &mth in Month::ALL {
        let blend_hardness = || -> Expr { Oil::ALL.iter().map(|oil| hardness[oil] * consume[&MonthOil::new(mth,*oil)]).sum() };
        m.try_constraint(Some(format!("min_hardness[{}]",mth).as_str()),
                         blend_hardness() - data.min_hardness * produce[&mth],
                         greater_than(0.0))?;
        m.try_constraint(Some(format!("max_hardness[{}]",mth).as_str()),
                         blend_hardness() - data.max_hardness * produce[&mth],
                         less_than(0.0))?;
    }

    // Weight continuity: all refined oil goes into the product
    for &mth in Month::ALL {
        m.try_constraint(Some(format!("production[{}]",mth).as_str()),
                         consume.sum_where(|k| k.month == mth) - produce[&mth],
                         equal_to(0.0))?;
    }

    let mut purchases = Expr::new();
    for k in month_oils() {
        purchases += lookup("cost",&data.cost,&k)? * buy[&k];
    }
    m.try_objective(Some("profit"), Sense::Maximize,
                    data.price * produce.sum() - purchases - data.holding_cost * inventory.sum())?;

    debug!(model = "food_manufacture", variables = m.num_variables(), constraints = m.num_constraints(), "model built");
    Ok(FoodPlan{ produce, buy, consume, inventory })
}


#[cfg(test)]
mod tests {
    use super::*;
    use planmodel::dummy::Model;

    #[test]
    fn construction_counts() {
        let mut m = Model::new(Some("food_manufacture_1"));
        let plan = build(&mut m, &FoodData::default()).unwrap();
        assert_eq!(m.num_variables(), 96);
        assert_eq!(m.num_constraints(), 65);
        assert!(!m.has_integer_variables());
        assert_eq!(plan.produce.len(), 6);
        assert_eq!(m.backend().var_name(plan.buy[&MonthOil::new(Month::Mar,Oil::Oil2)].index()), Some("buy_oil[Mar,OIL2]"));
    }

    #[test]
    fn january_balance_is_seeded() {
        let mut m = Model::new(None);
        build(&mut m, &FoodData::default()).unwrap();
        let b = m.backend();
        assert_eq!(b.con_name(0), Some("balance[Jan,VEG1]"));
        // 500 + buy - consume - invt == 0
        assert_eq!(b.con_bounds(0), (-500.0,-500.0));
        assert_eq!(b.con_row(0).0.len(), 3);
        // Later months refer to the previous stock
        assert_eq!(b.con_bounds(5), (0.0,0.0));
        assert_eq!(b.con_row(5).0.len(), 4);
    }

    #[test]
    fn missing_cost() {
        let mut data = FoodData::default();
        data.cost.remove(&MonthOil::new(Month::Jun,Oil::Oil3));
        let mut m = Model::new(None);
        assert_eq!(build(&mut m, &data).err(), Some(PlanningError::MissingParameter{ table : "cost", key : "Jun,OIL3".to_string() }));
    }
}
