mod common;

use common::*;
use planmodel::*;
use planmodel_highs::Model;
use planmodel_williams::factory_planning::{build,FactoryData,FactoryPlan};
use planmodel_williams::sets::*;

fn solve(data : &FactoryData) -> (Model,FactoryPlan,SolutionStatus) {
    let mut m = Model::new(Some("factory_planning_2"));
    m.set_parameter("mip_rel_gap", 0.0);
    let plan = build(&mut m, data).unwrap();
    let status = m.solve().unwrap();
    (m,plan,status)
}

#[test]
fn optimal_plan() {
    let (m,plan,status) = solve(&FactoryData::default());
    assert_eq!(status, SolutionStatus::Optimal);
    assert_close(m.primal_objective_value().unwrap(), 108855.0, 1.0);

    assert_within_bounds(&m, &plan.manufacture);
    assert_within_bounds(&m, &plan.inventory);
    assert_within_bounds(&m, &plan.sold);
    assert_within_bounds(&m, &plan.down);

    let report = m.report().to_string();
    assert!(report.starts_with("Solution:\nObjective value = "));
    assert!(report.contains("Number of decision variables = 156\n"));
    assert!(report.contains("Number of constraints = 84\n"));
    assert!(report.contains(" branch-and-bound nodes\n"));
    assert!(!report.contains("not reported by the solver"));

    let stats = m.statistics().unwrap();
    assert!(stats.iterations.is_some());
    assert!(stats.nodes.is_some());
}

#[test]
fn inventory_target_and_balance() {
    let data = FactoryData::default();
    let (m,plan,_) = solve(&data);

    let invt = plan.inventory.primal_values(&m).unwrap();
    let manuf = plan.manufacture.primal_values(&m).unwrap();
    let sold = plan.sold.primal_values(&m).unwrap();

    for &prd in Product::ALL {
        assert_close(invt[&MonthProduct::new(Month::Jun,prd)], data.inventory_target, TOL);
    }
    for &mth in Month::ALL {
        for &prd in Product::ALL {
            let k = MonthProduct::new(mth,prd);
            let stock_in = mth.previous().map(|prev| invt[&MonthProduct::new(prev,prd)]).unwrap_or(0.0);
            assert_close(stock_in + manuf[&k], sold[&k] + invt[&k], 1e-4);
        }
    }
}

#[test]
fn maintenance_and_capacity() {
    let data = FactoryData::default();
    let (m,plan,_) = solve(&data);
    let down = plan.down.primal_values(&m).unwrap();

    for &mach in Machine::ALL {
        let total : f64 = Month::ALL.iter().map(|&mth| down[&MonthMachine::new(mth,mach)]).sum();
        assert_close(total, data.machines_down[&mach] as f64, 1e-6);
    }
    for v in down.values() {
        assert_close(*v, v.round(), 1e-6);
    }

    for &mth in Month::ALL {
        for &mach in Machine::ALL {
            let usage = m.evaluate_primal(Product::ALL.iter()
                .filter_map(|&prd| data.time_required.get(&MachineProduct::new(mach,prd)).map(|&t| t * plan.manufacture[&MonthProduct::new(mth,prd)]))
                .sum::<Expr>()).unwrap();
            let available = data.hours_per_month * (data.machines_installed[&mach] as f64 - down[&MonthMachine::new(mth,mach)].round());
            assert!(usage <= available + 1e-4, "{} {}: {} > {}", mth, mach, usage, available);
        }
    }
}

#[test]
fn reproducible() {
    let (m1,_,_) = solve(&FactoryData::default());
    let (m2,_,_) = solve(&FactoryData::default());
    assert_close(m1.primal_objective_value().unwrap(), m2.primal_objective_value().unwrap(), 1e-6);
}

// A target above the storage limit cannot be met.
#[test]
fn infeasible_target() {
    let data = FactoryData{ inventory_target : 200.0, ..FactoryData::default() };
    let (m,_,status) = solve(&data);
    assert_ne!(status, SolutionStatus::Optimal);
    assert!(m.primal_objective_value().is_none());

    let report = m.report().to_string();
    assert!(report.starts_with("The problem does not have an optimal solution.\n"));
    assert!(report.contains("Number of decision variables = 156\n"));
    assert!(report.contains("Number of constraints = 84\n"));
    assert!(report.contains("Problem solved in "));
}
