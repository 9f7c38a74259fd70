use criterion::{Criterion, black_box, criterion_group, criterion_main};
use num_bigint::BigUint;
use rand::SeedableRng;
use rand::rngs::StdRng;
use stark_ecdsa::{SigningKey, VerifyingKey, generate_k};

fn message_hash() -> BigUint {
    BigUint::parse_bytes(
        b"73cf79c4bfa0c7a41f473c07e1be5ac25faa7c2fdf9edcbd12c1438f40f13d8",
        16,
    )
    .expect("hex")
}

fn bench_generate_k(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let msg = message_hash();

    c.bench_function("rfc6979_generate_k", |bencher| {
        bencher.iter(|| black_box(generate_k(black_box(&msg), sk.secret(), None)))
    });
}

fn bench_sign(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let msg = message_hash();

    c.bench_function("stark_ecdsa_sign", |bencher| {
        bencher.iter(|| {
            let sig = sk.sign(black_box(&msg)).expect("sign");
            black_box(sig);
        })
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let vk = VerifyingKey::from(&sk);
    let msg = message_hash();
    let sig = sk.sign(&msg).expect("sign");

    c.bench_function("stark_ecdsa_verify", |bencher| {
        bencher.iter(|| {
            let ok = vk.verify(black_box(&msg), black_box(&sig));
            black_box(ok);
        })
    });
}

criterion_group!(benches, bench_generate_k, bench_sign, bench_verify);
criterion_main!(benches);
