use criterion::{criterion_group, criterion_main, Criterion};
use fitness_architect::services::{
    compute_diet_plan, get_motivational_content, render_plan, select_workout_schedule,
};
use serde_json::json;
use std::hint::black_box;

fn benchmark_diet_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("diet_plan");

    group.bench_function("recognized_inputs", |b| {
        b.iter(|| {
            compute_diet_plan(
                black_box("weight_loss"),
                black_box(85.0),
                black_box(180.0),
                black_box(32),
                black_box("male"),
                black_box("light"),
            )
        })
    });

    group.bench_function("fallback_inputs", |b| {
        b.iter(|| {
            compute_diet_plan(
                black_box("bulk"),
                black_box(70.0),
                black_box(165.0),
                black_box(40),
                black_box("other"),
                black_box("very_active"),
            )
        })
    });

    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let diet = compute_diet_plan("muscle_gain", 80.0, 180.0, 25, "male", "moderate").plan;
    let envelope = json!({
        "diet_plan": diet,
        "workout_plan": select_workout_schedule("muscle_gain", "intermediate"),
        "motivational_content": get_motivational_content(None),
    });
    let raw = envelope.to_string();
    let fenced = format!("```json\n{}\n```", serde_json::to_string_pretty(&envelope).unwrap());

    let mut group = c.benchmark_group("render_plan");

    group.bench_function("raw_json", |b| b.iter(|| render_plan(black_box(&raw))));
    group.bench_function("fenced_json", |b| b.iter(|| render_plan(black_box(&fenced))));

    group.finish();
}

criterion_group!(benches, benchmark_diet_plan, benchmark_render);
criterion_main!(benches);
