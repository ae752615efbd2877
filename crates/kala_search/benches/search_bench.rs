use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kala_core::{Body, Instant, OracleError, ZodiacSign, normalize_degree};
use kala_search::{AspectKind, Constraint, SearchConfig, SearchDirection, evaluate_all, find_event};

/// Sun 1 deg/day, Moon 13 deg/day from 0 deg at the Unix epoch.
fn linear(body: Body, at: Instant) -> Result<f64, OracleError> {
    let days = at.unix_ms() as f64 / 86_400_000.0;
    match body {
        Body::Sun => Ok(normalize_degree(days)),
        Body::Moon => Ok(normalize_degree(13.0 * days)),
        other => Err(OracleError::UnsupportedBody(other)),
    }
}

fn start() -> Instant {
    Instant::from_unix_ms(0).expect("epoch is representable")
}

fn evaluate_bench(c: &mut Criterion) {
    let set = [
        Constraint::aspect(Body::Sun, Body::Moon, AspectKind::Trine, 2.0),
        Constraint::in_sign(Body::Sun, ZodiacSign::Gemini),
    ];
    let at = start();

    c.bench_function("evaluate_all_two_constraints", |b| {
        b.iter(|| evaluate_all(black_box(&linear), black_box(at), black_box(&set)))
    });
}

fn find_event_bench(c: &mut Criterion) {
    let config = SearchConfig::default();
    let ingress = [Constraint::in_sign(Body::Sun, ZodiacSign::Scorpio)];
    let conjunction = [
        Constraint::aspect(Body::Sun, Body::Moon, AspectKind::Conjunction, 2.0),
        Constraint::in_sign(Body::Sun, ZodiacSign::Pisces),
    ];
    let impossible = [
        Constraint::at_degree(Body::Sun, 10.0, 0.0),
        Constraint::at_degree(Body::Sun, 200.0, 0.0),
    ];

    let mut group = c.benchmark_group("find_event");
    group.sample_size(20);
    group.bench_function("sign_ingress", |b| {
        b.iter(|| {
            find_event(&linear, black_box(&ingress), SearchDirection::Future, start(), &config)
                .expect("search should succeed")
                .expect("event should exist")
        })
    });
    group.bench_function("conjunction_in_sign", |b| {
        b.iter(|| {
            find_event(&linear, black_box(&conjunction), SearchDirection::Future, start(), &config)
                .expect("search should succeed")
                .expect("event should exist")
        })
    });
    group.bench_function("exhaustive_not_found", |b| {
        b.iter(|| {
            find_event(&linear, black_box(&impossible), SearchDirection::Past, start(), &config)
                .expect("search should succeed")
        })
    });
    group.finish();
}

criterion_group!(benches, evaluate_bench, find_event_bench);
criterion_main!(benches);
