//! Factory planning 2 (Williams, example 4).
//!
//! A factory makes seven products on five types of machines. Each month some machines are
//! down for maintenance; unlike in the first version of the problem, the months in which
//! machines are maintained are decided by the model. Products can be sold subject to market
//! limits, or stored at a holding cost. The goal is to maximize profit over six months, ending
//! with a fixed stock of every product.
//!
//! The model is a MIP: the number of machines of each type down in each month is integer.
use std::collections::BTreeMap;

use itertools::iproduct;
use planmodel::*;
use planmodel::model::BaseModelTrait;
use tracing::debug;

use crate::error::{lookup,PlanningError};
use crate::sets::*;
use crate::MAX_QUANTITY;

/// Data for the factory planning model. `Default` holds the data from the book.
#[derive(Clone,Debug)]
pub struct FactoryData {
    /// Profit per unit sold.
    pub profit             : BTreeMap<Product,f64>,
    /// Machine hours per unit produced. A missing entry means the product does not use the
    /// machine.
    pub time_required      : BTreeMap<MachineProduct,f64>,
    pub machines_installed : BTreeMap<Machine,u32>,
    /// Number of machines of each type that must be down for maintenance at some point
    /// during the six months.
    pub machines_down      : BTreeMap<Machine,u32>,
    /// Market limit on sales.
    pub max_sales          : BTreeMap<MonthProduct,f64>,
    /// Storage cost per unit per month.
    pub holding_cost       : f64,
    pub max_inventory      : f64,
    /// Required stock of each product at the end of June.
    pub inventory_target   : f64,
    /// Working hours per machine and month: two 8 hour shifts, 24 days.
    pub hours_per_month    : f64,
}

impl Default for FactoryData {
    fn default() -> Self {
        use Machine::*;
        use Product::*;

        let profit = [(Prod1,10.0),(Prod2,6.0),(Prod3,8.0),(Prod4,4.0),(Prod5,11.0),(Prod6,9.0),(Prod7,3.0)];

        let time_required : [(Machine,&[(Product,f64)]);5] = [
            (Grinder,  &[(Prod1,0.5),(Prod2,0.7),(Prod5,0.3),(Prod6,0.2),(Prod7,0.5)]),
            (VertDrill,&[(Prod1,0.1),(Prod2,0.2),(Prod4,0.3),(Prod6,0.6)]),
            (HoriDrill,&[(Prod1,0.2),(Prod3,0.8),(Prod7,0.6)]),
            (Borer,    &[(Prod1,0.05),(Prod2,0.03),(Prod4,0.07),(Prod5,0.1),(Prod7,0.08)]),
            (Planer,   &[(Prod3,0.01),(Prod5,0.05),(Prod7,0.05)]),
        ];

        let max_sales : [[f64;7];6] = [
            [500.0,1000.0,300.0,300.0, 800.0,200.0,100.0],
            [600.0, 500.0,200.0,  0.0, 400.0,300.0,150.0],
            [300.0, 600.0,  0.0,  0.0, 500.0,400.0,100.0],
            [200.0, 300.0,400.0,500.0, 200.0,  0.0,100.0],
            [  0.0, 100.0,500.0,100.0,1000.0,300.0,  0.0],
            [500.0, 500.0,100.0,300.0,1100.0,500.0, 60.0],
        ];

        FactoryData{
            profit : profit.into_iter().collect(),
            time_required : time_required.iter()
                .flat_map(|(mach,row)| row.iter().map(move |&(prd,t)| (MachineProduct::new(*mach,prd),t)))
                .collect(),
            machines_installed : [(Grinder,4),(VertDrill,2),(HoriDrill,3),(Borer,1),(Planer,1)].into_iter().collect(),
            machines_down : [(Grinder,2),(VertDrill,2),(HoriDrill,3),(Borer,1),(Planer,1)].into_iter().collect(),
            max_sales : iproduct!(Month::ALL.iter().zip(max_sales.iter()),Product::ALL.iter().enumerate())
                .map(|((&mth,row),(j,&prd))| (MonthProduct::new(mth,prd),row[j]))
                .collect(),
            holding_cost : 0.5,
            max_inventory : 100.0,
            inventory_target : 50.0,
            hours_per_month : 2.0 * 8.0 * 24.0,
        }
    }
}

/// The decision variables of the factory planning model.
pub struct FactoryPlan {
    /// Units produced.
    pub manufacture : VariableFamily<MonthProduct>,
    /// Units in store at the end of the month.
    pub inventory   : VariableFamily<MonthProduct>,
    /// Units sold.
    pub sold        : VariableFamily<MonthProduct>,
    /// Number of machines down for maintenance (integer).
    pub down        : VariableFamily<MonthMachine>,
}

fn month_products() -> impl Iterator<Item=MonthProduct> {
    iproduct!(Month::ALL,Product::ALL).map(|(&mth,&prd)| MonthProduct::new(mth,prd))
}

/// Build the factory planning model in `m`.
///
/// Adds the variables, the constraints and the profit objective (maximized). Fails with
/// [PlanningError::MissingParameter] if a required table entry is missing.
pub fn build<M>(m : &mut ModelAPI<M>, data : &FactoryData) -> Result<FactoryPlan,PlanningError> where M : BaseModelTrait {
    let sales_cap = month_products()
        .map(|k| Ok((k,lookup("max_sales",&data.max_sales,&k)?)))
        .collect::<Result<BTreeMap<MonthProduct,f64>,PlanningError>>()?;
    let max_down = Machine::ALL.iter()
        .map(|mach| Ok((*mach,lookup("machines_down",&data.machines_down,mach)?)))
        .collect::<Result<BTreeMap<Machine,u32>,PlanningError>>()?;

    let manufacture = m.try_variables("manuf", month_products(), |_| in_range(0.0,MAX_QUANTITY))?;
    let inventory   = m.try_variables("invt",  month_products(), |_| in_range(0.0,data.max_inventory))?;
    let sold        = m.try_variables("sold",  month_products(), |k| in_range(0.0,sales_cap[k]))?;
    let down        = m.try_variables("down",
                                      iproduct!(Month::ALL,Machine::ALL).map(|(&mth,&mach)| MonthMachine::new(mth,mach)),
                                      |k| in_range(0.0,max_down[&k.machine] as f64).integer())?;

    // Balance: stock from last month plus production equals sales plus stock. In January
    // there is no stock yet.
    for k in month_products() {
        let stock_in = match k.month.previous() {
            Some(prev) => inventory[&MonthProduct::new(prev,k.product)].to_expr(),
            None       => Expr::new(),
        };
        m.try_constraint(Some(format!("balance[{}]",k).as_str()),
                         stock_in + manufacture[&k] - sold[&k] - inventory[&k],
                         equal_to(0.0))?;
    }

    // Stock at the end of the horizon
    for &prd in Product::ALL {
        let k = MonthProduct::new(Month::last(),prd);
        m.try_constraint(Some(format!("inventory_target[{}]",prd).as_str()), inventory[&k], equal_to(data.inventory_target))?;
    }

    // Machine capacity, net of machines down for maintenance
    for (&mth,&mach) in iproduct!(Month::ALL,Machine::ALL) {
        let installed = lookup("machines_installed",&data.machines_installed,&mach)? as f64;
        let usage : Expr = Product::ALL.iter()
            .filter_map(|&prd| data.time_required.get(&MachineProduct::new(mach,prd)).map(|&t| t * manufacture[&MonthProduct::new(mth,prd)]))
            .sum();
        let key = MonthMachine::new(mth,mach);
        m.try_constraint(Some(format!("capacity[{}]",key).as_str()),
                         usage + data.hours_per_month * down[&key],
                         less_than(data.hours_per_month * installed))?;
    }

    // Every machine must be maintained the required number of times
    for &mach in Machine::ALL {
        m.try_constraint(Some(format!("maintenance[{}]",mach).as_str()),
                         down.sum_where(|k| k.machine == mach),
                         equal_to(max_down[&mach] as f64))?;
    }

    let mut revenue = Expr::new();
    for k in month_products() {
        revenue += lookup("profit",&data.profit,&k.product)? * sold[&k];
    }
    m.try_objective(Some("profit"), Sense::Maximize, revenue - data.holding_cost * inventory.sum())?;

    debug!(model = "factory_planning", variables = m.num_variables(), constraints = m.num_constraints(), "model built");
    Ok(FactoryPlan{ manufacture, inventory, sold, down })
}
