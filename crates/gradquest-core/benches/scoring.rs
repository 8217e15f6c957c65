use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use gradquest_core::exam::scoring_pass;
use gradquest_core::model::Question;
use gradquest_core::traits::{NullSink, ScriptedSource};

fn make_questions(count: usize) -> Vec<Question> {
    (0..count)
        .map(|i| Question {
            text: format!("Benchmark question {i}?"),
            choices: vec![
                "alpha".into(),
                "beta".into(),
                "gamma".into(),
                "delta".into(),
            ],
            correct_answer: "alpha".into(),
        })
        .collect()
}

fn bench_scoring_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring_pass");
    let questions = make_questions(10);

    group.bench_function("10_questions_letters", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            let mut answers = ScriptedSource::answers(&["A"; 10]);
            let mut sink = NullSink;
            scoring_pass(
                black_box(&questions),
                "Exam",
                &mut rng,
                &mut answers,
                &mut sink,
            )
        })
    });

    group.bench_function("10_questions_sentinels", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            let mut answers = ScriptedSource::answers(&["messi"; 10]);
            let mut sink = NullSink;
            scoring_pass(
                black_box(&questions),
                "Exam",
                &mut rng,
                &mut answers,
                &mut sink,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_scoring_pass);
criterion_main!(benches);
