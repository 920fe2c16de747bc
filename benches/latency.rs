//! Latency benchmarks for the signing hot path.
//!
//! Run with: `cargo bench --bench latency`

use alloy_primitives::Address;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use venue_core::canonicalize;
use venue_core::signing::l1::{action_hash, agent_signing_hash, multi_sig_l1_hash};
use venue_core::signing::signer::user_signed_typed_data;
use venue_core::signing::typed_data::user_signed_schema;
use venue_core::signing::{LocalWallet, Network};
use venue_core::types::ActionKind;

// Well-known test key (DO NOT USE IN PRODUCTION)
const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Generate a bulk order action with `count` limit orders.
fn generate_order_json(count: usize) -> Value {
    let orders: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "a": i % 10,
                "b": i % 2 == 0,
                "p": format!("{}.5", 30000 + i),
                "s": "0.01",
                "r": false,
                "t": {"limit": {"tif": "Gtc"}}
            })
        })
        .collect();
    json!({"type": "order", "orders": orders, "grouping": "na"})
}

fn usd_send_json() -> Value {
    json!({
        "type": "usdSend",
        "signatureChainId": "0xa4b1",
        "hyperliquidChain": "Mainnet",
        "destination": "0x0D1d9635D0640821d15e323ac8AdADfA9c111414",
        "amount": "100",
        "time": 1700000000000u64
    })
}

/// Benchmark canonicalization of raw JSON actions.
fn bench_canonicalize(c: &mut Criterion) {
    venue_signer::init_tracing("warn");
    let mut group = c.benchmark_group("canonicalize");

    for count in [1, 10, 50].iter() {
        let raw = generate_order_json(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("order", count), &raw, |b, raw| {
            b.iter(|| black_box(canonicalize(black_box(raw)).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark MessagePack hashing of L1 actions.
fn bench_l1_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("l1_hash");
    let user = Address::repeat_byte(0x11);
    let lead = Address::repeat_byte(0x22);

    for count in [1, 10, 50].iter() {
        let action = canonicalize(&generate_order_json(*count)).unwrap();
        group.bench_with_input(BenchmarkId::new("single", count), &action, |b, action| {
            b.iter(|| black_box(action_hash(black_box(action), 1, None, None).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("multi_sig", count), &action, |b, action| {
            b.iter(|| {
                black_box(multi_sig_l1_hash(user, lead, black_box(action), 1, None, None).unwrap())
            })
        });
    }

    group.finish();
}

/// Benchmark signing an L1 action end to end with a local key.
fn bench_l1_sign(c: &mut Criterion) {
    let wallet = LocalWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
    let action = canonicalize(&generate_order_json(1)).unwrap();

    c.bench_function("l1_sign_order", |b| {
        b.iter(|| {
            let connection_id = action_hash(&action, black_box(1), None, None).unwrap();
            let digest = agent_signing_hash(connection_id, Network::Mainnet);
            black_box(wallet.sign_hash(&digest).unwrap())
        })
    });
}

/// Benchmark EIP-712 hashing of user-signed actions.
fn bench_typed_data_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("typed_data");
    let action = canonicalize(&usd_send_json()).unwrap();

    group.bench_function("usd_send_hash", |b| {
        b.iter(|| {
            black_box(
                user_signed_typed_data(black_box(&action))
                    .unwrap()
                    .signing_hash()
                    .unwrap(),
            )
        })
    });

    group.bench_function("multi_sig_extension", |b| {
        let schema = user_signed_schema(ActionKind::SendAsset).unwrap();
        b.iter(|| black_box(schema.for_multi_sig()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_canonicalize,
    bench_l1_hash,
    bench_l1_sign,
    bench_typed_data_hash,
);

criterion_main!(benches);
