use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use treepath::{Value, parse, parse_cached};

const PATH: &str = r#"inventory.items[{id:"sword",slot:3}].tags[-1]"#;

fn sample_tree() -> Value {
    let items = (0..64)
        .map(|i| {
            format!(r#"{{id:"item{i}",slot:{i},tags:[a,b,c],meta:{{weight:{i}.5}}}}"#)
                .parse::<Value>()
                .unwrap()
        })
        .chain(std::iter::once(
            r#"{id:"sword",slot:3,tags:[sharp,rare]}"#.parse::<Value>().unwrap(),
        ))
        .collect::<Vec<_>>();
    let mut root = Value::compound();
    parse("inventory.items")
        .unwrap()
        .set(&mut root, || Value::List(items.clone()))
        .unwrap();
    root
}

fn benchmark_parse(c: &mut Criterion) {
    c.bench_function("parse_path", |b| {
        b.iter(|| black_box(parse(black_box(PATH))))
    });

    c.bench_function("parse_path_cached", |b| {
        b.iter(|| black_box(parse_cached(black_box(PATH))))
    });
}

fn benchmark_evaluate(c: &mut Criterion) {
    let root = sample_tree();
    let path = parse(PATH).unwrap();
    let fan_out = parse("inventory.items[].tags[]").unwrap();

    c.bench_function("get_filtered", |b| {
        b.iter(|| black_box(path.get(black_box(&root)).map(|found| found.len())))
    });

    c.bench_function("count_fan_out", |b| {
        b.iter(|| black_box(fan_out.count_matching(black_box(&root))))
    });
}

fn benchmark_mutate(c: &mut Criterion) {
    let root = sample_tree();
    let path = parse("inventory.items[].meta.weight").unwrap();

    c.bench_function("set_fan_out", |b| {
        b.iter(|| {
            let mut root = root.clone();
            black_box(path.set(&mut root, || Value::float(1.0)))
        })
    });
}

criterion_group!(benches, benchmark_parse, benchmark_evaluate, benchmark_mutate);
criterion_main!(benches);
