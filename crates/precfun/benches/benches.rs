use std::{env, path::PathBuf};

use criterion::{criterion_group, criterion_main, Criterion};
use precfun::{syntax::TableFile, Groups, Matrix, Relation};

criterion_main!(benches);
criterion_group!(benches, bench_fixtures, bench_chain);

fn bench_fixtures(c: &mut Criterion) {
    bench_table_file(c, "arithmetic");
    bench_table_file(c, "ifj21");
}

fn bench_table_file(c: &mut Criterion, table_name: &str) {
    let project_root = env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .expect("missing environment variable: `CARGO_MANIFEST_DIR'");
    let path = project_root.join(format!("tests/{}.prec", table_name));
    let source = std::fs::read_to_string(&path).unwrap();
    let file = TableFile::from_str(&source).unwrap();

    let mut group = c.benchmark_group(table_name);
    group.bench_function("parse", |b| {
        b.iter(|| TableFile::from_str(&source).unwrap());
    });
    group.bench_function("compile", |b| {
        b.iter(|| precfun::compile(&file.matrix, &file.groups).unwrap());
    });
    group.finish();
}

// A total order of `n` operators, the worst case for the longest paths.
fn bench_chain(c: &mut Criterion) {
    let n = 200;
    let matrix = Matrix::define(|def| {
        for row in 0..n {
            let cells = (0..n).map(|col| match (row, col) {
                (r, k) if r == n - 1 && k == n - 1 => Relation::None,
                (r, _) if r == n - 1 => Relation::Less,
                (r, k) if r <= k => Relation::Greater,
                _ => Relation::Less,
            });
            def.row(&format!("OP{}", row), cells)?;
        }
        def.end_marker(&format!("OP{}", n - 1))
    })
    .unwrap();
    let groups = Groups::new();

    c.bench_function("chain", |b| {
        b.iter(|| precfun::compile(&matrix, &groups).unwrap());
    });
}
