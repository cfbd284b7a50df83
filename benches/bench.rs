// Criterion benchmarks for Faceoff

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use faceoff::core::{decide_winner, Leaderboard, MatchController, UploadPolicy};
use faceoff::services::{FaceScorer, MemoryStore, ScorerError, UserStore};
use std::sync::Arc;
use std::time::Duration;

/// Scores every photo by its length so both sides differ
struct LengthScorer;

#[async_trait]
impl FaceScorer for LengthScorer {
    async fn analyze_face(&self, photo_base64: &str) -> Result<f64, ScorerError> {
        Ok(photo_base64.len() as f64)
    }
}

fn bench_decide_winner(c: &mut Criterion) {
    c.bench_function("decide_winner", |b| {
        b.iter(|| decide_winner(black_box(80.0), black_box(82.5)));
    });
}

fn bench_upload_type_check(c: &mut Criterion) {
    let policy = UploadPolicy::new(50 * 1024 * 1024);
    c.bench_function("upload_type_check", |b| {
        b.iter(|| policy.check_type(black_box("selfie.JPEG"), black_box("image/jpeg")));
    });
}

fn bench_match_lifecycle(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let store = Arc::new(MemoryStore::new());
    let (alice, bob) = runtime.block_on(async {
        (
            store.create_user("alice", "h").await.unwrap(),
            store.create_user("bob", "h").await.unwrap(),
        )
    });
    let controller = MatchController::new(
        store.clone(),
        store.clone(),
        Arc::new(LengthScorer),
        Duration::ZERO,
    );
    let creator_photo = vec![7u8; 64 * 1024];
    let invited_photo = vec![9u8; 48 * 1024];

    c.bench_function("create_respond_compare", |b| {
        b.iter(|| {
            runtime.block_on(async {
                let m = controller.create_match(alice.id, "bob", &creator_photo).await.unwrap();
                controller
                    .respond_to_match(m.id, bob.id, true, Some(&invited_photo))
                    .await
                    .unwrap();
                controller.compare_match(m.id, alice.id).await.unwrap()
            })
        });
    });
}

fn bench_leaderboard(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("leaderboard");

    for size in [100, 1000, 10000].iter() {
        let store = Arc::new(MemoryStore::new());
        runtime.block_on(async {
            for i in 0..*size {
                store.create_user(&format!("user{}", i), "h").await.unwrap();
            }
        });
        let board = Leaderboard::new(store, 100, 1000);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| runtime.block_on(board.top(black_box(Some(100)))).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decide_winner,
    bench_upload_type_check,
    bench_match_lifecycle,
    bench_leaderboard
);
criterion_main!(benches);
