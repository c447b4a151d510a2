use criterion::{criterion_group, criterion_main, Criterion};

use planmodel::dummy::Model;
use planmodel_williams::{factory_planning,food_manufacture,manpower_planning};

// Model construction without solving

fn bench_factory_planning(c : &mut Criterion) {
    let data = factory_planning::FactoryData::default();
    c.bench_function("build-factory-planning", |b| b.iter(|| {
        let mut m = Model::new(None);
        factory_planning::build(&mut m, &data).unwrap();
        m
    }));
}

fn bench_food_manufacture(c : &mut Criterion) {
    let data = food_manufacture::FoodData::default();
    c.bench_function("build-food-manufacture", |b| b.iter(|| {
        let mut m = Model::new(None);
        food_manufacture::build(&mut m, &data).unwrap();
        m
    }));
}

fn bench_manpower_planning(c : &mut Criterion) {
    let data = manpower_planning::ManpowerData::default();
    c.bench_function("build-manpower-planning", |b| b.iter(|| {
        let mut m = Model::new(None);
        manpower_planning::build(&mut m, &data, manpower_planning::ObjectiveMode::MinimizeCost).unwrap();
        m
    }));
}

criterion_group!(benches,
    bench_factory_planning,
    bench_food_manufacture,
    bench_manpower_planning);
criterion_main!(benches);
