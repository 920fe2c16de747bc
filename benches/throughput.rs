//! Throughput benchmarks for nonce issuance and multi-sig rounds.
//!
//! Run with: `cargo bench --bench throughput`

use alloy_primitives::Address;
use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use multisig_engine::{ExchangeResponse, MultiSigCoordinator, NonceManager, SignerSet, Transport};
use std::sync::Arc;
use venue_core::signing::{Network, Signer, SigningContext};
use venue_core::types::{Action, ScheduleCancel, SignedEnvelope};

// Hardhat test keys (DO NOT USE IN PRODUCTION)
const KEYS: [&str; 5] = [
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
    "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
    "5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
    "7c852118294e51e653712a81e05800f419141751be58f605c371e15141b007a6",
    "47e179ec197488593b187f80a00eb0da91f1b9d0b13f8733639f19c30a34926a",
];

/// Transport that accepts everything without I/O.
struct NullTransport;

#[async_trait]
impl Transport for NullTransport {
    async fn submit(&self, _envelope: &SignedEnvelope) -> venue_core::Result<ExchangeResponse> {
        Ok(ExchangeResponse {
            kind: "default".to_string(),
            data: None,
        })
    }
}

/// Benchmark nonce issuance across many leaders.
fn bench_nonce_issuance(c: &mut Criterion) {
    venue_signer::init_tracing("warn");
    let mut group = c.benchmark_group("nonce_issuance");

    for leaders in [1usize, 16, 256].iter() {
        let manager = NonceManager::new();
        let addresses: Vec<Address> = (0..*leaders)
            .map(|i| Address::left_padding_from(&(i as u64).to_be_bytes()))
            .collect();

        group.throughput(Throughput::Elements(1000));
        group.bench_with_input(BenchmarkId::new("next_nonce", leaders), &addresses, |b, addresses| {
            b.iter(|| {
                for i in 0..1000 {
                    black_box(manager.next_nonce(addresses[i % addresses.len()]));
                }
            })
        });
    }

    group.finish();
}

/// Benchmark full multi-sig rounds by signer count.
fn bench_multi_sig_round(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("multi_sig_round");
    let ctx = SigningContext::new(Network::Testnet);
    let multi_sig_user = Address::repeat_byte(0xbe);

    for count in [1usize, 3, 5].iter() {
        let signers = SignerSet::new(
            KEYS[..*count]
                .iter()
                .map(|key| Signer::private_key(key).unwrap())
                .collect(),
        )
        .unwrap();
        let coordinator = MultiSigCoordinator::new(Arc::new(NullTransport));

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("schedule_cancel", count), &signers, |b, signers| {
            b.iter(|| {
                rt.block_on(async {
                    let action = Action::ScheduleCancel(ScheduleCancel {
                        time: Some(1_700_000_000_000),
                    });
                    black_box(
                        coordinator
                            .coordinate_and_submit(signers, multi_sig_user, action, &ctx, None)
                            .await
                            .unwrap(),
                    )
                })
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_nonce_issuance, bench_multi_sig_round);

criterion_main!(benches);
