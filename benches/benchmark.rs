use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;
use vdom_harness::{assert_render, properties, select, text, v, Handler, Render, RenderNode};

// Builds a list of `rows` rows with a few cells each
fn build_table(rows: usize) -> Render {
  let rows: Vec<RenderNode> = (0..rows)
    .map(|row| {
      v(
        "tr",
        properties([
          ("key", format!("row-{}", row).into()),
          ("classes", (if row % 2 == 0 { "even" } else { "odd" }).into()),
          ("onclick", Handler::noop().into()),
        ]),
        (0..4)
          .map(|cell| v("td", properties([("key", cell.into())]), vec![text(format!("{}:{}", row, cell))]))
          .collect(),
      )
    })
    .collect();
  v("table", properties([("id", "grid".into())]), rows).into()
}

fn benchmark_assert_render(c: &mut Criterion) {
  let actual = build_table(500);
  let expected = build_table(500);

  c.bench_function("assert_render on 500 rows", |b| {
    b.iter(|| {
      assert_render(black_box(&actual), black_box(&expected), None).expect("Benchmark failed");
    });
  });
}

fn benchmark_select(c: &mut Criterion) {
  let render = build_table(500);

  c.bench_function("select descendant with class", |b| {
    b.iter(|| {
      let found = select(black_box("table tr.even > td"), &render).expect("Benchmark failed");
      black_box(found.len());
    });
  });

  c.bench_function("select by key", |b| {
    b.iter(|| {
      let found = select(black_box(r#"*[key="row-499"]"#), &render).expect("Benchmark failed");
      black_box(found.len());
    });
  });
}

// Criterion group configuration
criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = benchmark_assert_render, benchmark_select
}
criterion_main!(benches);
