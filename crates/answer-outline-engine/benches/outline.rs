use answer_outline_config::RenderSettings;
use answer_outline_engine::{EditEvent, on_line_break, parse, render};
use criterion::{Criterion, criterion_group, criterion_main};
mod common;

fn bench_parse_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline");
    group.sample_size(10);

    let answer = common::generate_answer(200);
    group.bench_function("parse", |b| {
        b.iter(|| std::hint::black_box(parse(std::hint::black_box(&answer))));
    });

    let settings = RenderSettings::default();
    group.bench_function("parse_render_to_text", |b| {
        b.iter(|| {
            let doc = parse(std::hint::black_box(&answer));
            std::hint::black_box(render(&doc).to_text(&settings))
        });
    });

    group.finish();
}

fn bench_line_break(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_input");

    let answer = common::generate_answer(200);
    let mid = answer.chars().count() / 2;
    group.bench_function("line_break_at_end", |b| {
        b.iter(|| std::hint::black_box(on_line_break(&EditEvent::at_end(&answer))));
    });
    group.bench_function("line_break_mid_document", |b| {
        b.iter(|| std::hint::black_box(on_line_break(&EditEvent::new(&answer, mid, mid))));
    });

    group.finish();
}

criterion_group!(benches, bench_parse_and_render, bench_line_break);
criterion_main!(benches);
