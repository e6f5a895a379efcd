// Signing benchmarks for the operation path.
//
// Covers identity derivation, operation signing at several forged sizes,
// group hashing, and signature verification.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use tezos_client::crypto::keys::KeyStore;
use tezos_client::crypto::signatures::{compute_operation_hash, sign_operation, verify_operation};
use tezos_client::operation::OperationBuilder;

fn forged_of_len(bytes: usize) -> String {
    (0..bytes).map(|i| format!("{:02x}", i % 256)).collect()
}

fn bench_identity_from_seed(c: &mut Criterion) {
    c.bench_function("ed25519/identity_from_seed", |b| {
        b.iter(|| KeyStore::from_seed(&[7u8; 32]).unwrap());
    });
}

fn bench_sign_operation(c: &mut Criterion) {
    let identity = KeyStore::from_seed(&[7u8; 32]).unwrap();
    let mut group = c.benchmark_group("operation/sign");

    for size in [64, 256, 1024, 4096] {
        let forged = forged_of_len(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &forged, |b, forged| {
            b.iter(|| sign_operation(forged, &identity).unwrap());
        });
    }

    group.finish();
}

fn bench_operation_hash(c: &mut Criterion) {
    let identity = KeyStore::from_seed(&[7u8; 32]).unwrap();
    let signed = sign_operation(&forged_of_len(256), &identity).unwrap();

    c.bench_function("operation/group_hash", |b| {
        b.iter(|| compute_operation_hash(&signed).unwrap());
    });
}

fn bench_verify_operation(c: &mut Criterion) {
    let identity = KeyStore::from_seed(&[7u8; 32]).unwrap();
    let forged = forged_of_len(256);
    let signed = sign_operation(&forged, &identity).unwrap();

    c.bench_function("operation/verify", |b| {
        b.iter(|| verify_operation(&forged, &signed.signature, identity.public_key()).unwrap());
    });
}

fn bench_build_transaction(c: &mut Criterion) {
    c.bench_function("operation/build_and_serialize_transaction", |b| {
        b.iter(|| {
            let op = OperationBuilder::new("tz1Source", 41)
                .unwrap()
                .fee(1_300)
                .transaction("tz1Receiver", 1_000_000);
            serde_json::to_vec(&op).unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_identity_from_seed,
    bench_sign_operation,
    bench_operation_hash,
    bench_verify_operation,
    bench_build_transaction,
);
criterion_main!(benches);
