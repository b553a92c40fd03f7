use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hyperforest::hypersplit;
use hyperforest::linear::LinearClassifier;
use hyperforest::rfg::{self, RfgOptions};
use hyperforest::rule::Partition;
use hyperforest::simulation::Simulation;

fn benchmark_classification(c: &mut Criterion) {
    let mut sim = Simulation::new(42);

    let rule_counts = [
        100, 300, 500, 700, 900, 1000, 3000, 5000, 7000, 9000, 10000, 20000,
    ];

    let mut group = c.benchmark_group("Classification");
    group.sample_size(50);

    for &n_rules in &rule_counts {
        let rules = sim.generate_rules(n_rules);
        let packets = sim.generate_packets(1000);

        let linear = LinearClassifier::build(&rules);
        let partition = Partition::unpartitioned(rules);
        let grouped = rfg::rf_group(&partition, RfgOptions::default())
            .expect("rf_group should succeed on a generated rule set");
        let forest = hypersplit::build(&grouped).expect("hypersplit build should succeed");

        group.bench_function(BenchmarkId::new("Linear", n_rules), |b| {
            b.iter(|| {
                for p in &packets {
                    linear.classify(p);
                }
            })
        });

        group.bench_function(BenchmarkId::new("HyperSplit", n_rules), |b| {
            b.iter(|| {
                for p in &packets {
                    hypersplit::lookup(&forest, p);
                }
            })
        });
    }
    group.finish();
}

fn benchmark_build(c: &mut Criterion) {
    let mut sim = Simulation::new(43);
    let rule_counts = [100, 1000, 10000];

    let mut group = c.benchmark_group("Build");
    group.sample_size(20);

    for &n_rules in &rule_counts {
        let rules = sim.generate_rules(n_rules);

        group.bench_function(BenchmarkId::new("RfgThenHyperSplit", n_rules), |b| {
            b.iter(|| {
                let partition = Partition::unpartitioned(rules.clone());
                let grouped = rfg::rf_group(&partition, RfgOptions::default())
                    .expect("rf_group should succeed on a generated rule set");
                hypersplit::build(&grouped).expect("hypersplit build should succeed")
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_classification, benchmark_build);
criterion_main!(benches);
