use criterion::{Criterion, black_box, criterion_group, criterion_main};
use meiri_core::parser::TitleParser;

fn bench_title_parse(c: &mut Criterion) {
    let parser = TitleParser::new().unwrap();

    let inputs = vec![
        "趙孟頫 每日一字 1423閶~全集09篇",
        "趙孟頫 每日一字 0010既~xxxxxx",
        "趙孟頫 每日一字 0001一",
        "random unrelated title",
        "【書法】趙孟頫  每日一字\t0300書~全集05篇 #shorts",
    ];

    c.bench_function("title_parse_full_form", |b| {
        b.iter(|| parser.parse(black_box(inputs[0])).unwrap());
    });

    c.bench_function("title_parse_miss", |b| {
        b.iter(|| parser.parse(black_box(inputs[3])));
    });

    c.bench_function("title_parse_batch_5", |b| {
        b.iter(|| {
            for input in &inputs {
                let _ = parser.parse(black_box(input));
            }
        });
    });
}

criterion_group!(benches, bench_title_parse);
criterion_main!(benches);
