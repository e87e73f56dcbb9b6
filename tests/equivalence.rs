use libadler::{Adler32, Adler64, Engine, Variant};

fn sample(len: usize) -> Vec<u8> {
    let mut seed: u64 = 0xDEAD_BEEF;
    (0..len)
        .map(|_| {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            (seed >> 56) as u8
        })
        .collect()
}

/// Lengths around every loop boundary: unroll, blocks, group ends and NMAX.
fn boundary_lengths(nmax: usize) -> Vec<usize> {
    let mut lens = vec![0, 1, 2, 15, 16, 17];
    for block in [32, 64, 128, 5504, 5536, 5552] {
        lens.extend([block - 1, block, block + 1]);
    }
    for k in [1, 2, 3] {
        lens.extend([k * nmax - 1, k * nmax, k * nmax + 1]);
    }
    lens.sort_unstable();
    lens.dedup();
    lens
}

fn assert_all_agree<V: Variant>(seed: V::Word, data: &[u8]) {
    let expected = Engine::Reference.checksum::<V>(seed, data);
    for engine in Engine::ALL {
        assert_eq!(
            engine.checksum::<V>(seed, data),
            expected,
            "{engine} {} len {} seed {seed}",
            V::WIDTH,
            data.len()
        );
    }
}

#[test]
fn test_boundaries_random_data() {
    let data = sample(3 * Adler32::NMAX + 1);
    for len in boundary_lengths(Adler32::NMAX) {
        assert_all_agree::<Adler32>(Adler32::SEED, &data[..len]);
        assert_all_agree::<Adler64>(Adler64::SEED, &data[..len]);
    }
}

#[test]
fn test_boundaries_worst_case() {
    let data = vec![0xffu8; 3 * Adler32::NMAX + 1];
    let seed32 = Adler32::pack(Adler32::MODULUS - 1, Adler32::MODULUS - 1);
    let seed64 = Adler64::pack(Adler64::MODULUS - 1, Adler64::MODULUS - 1);
    for len in boundary_lengths(Adler32::NMAX) {
        assert_all_agree::<Adler32>(seed32, &data[..len]);
        assert_all_agree::<Adler64>(seed64, &data[..len]);
    }
}

#[test]
fn test_unaligned_starts() {
    let data = sample(4096 + 64);
    for offset in 0..64 {
        assert_all_agree::<Adler32>(1, &data[offset..offset + 4096]);
        assert_all_agree::<Adler64>(1, &data[offset..offset + 4096]);
    }
}

#[test]
fn test_out_of_range_seeds() {
    let data = sample(1000);
    for seed in [0, u32::MAX, 0xfff1_fff1, 0xfff0_fff0, 0x0001_ffff] {
        assert_all_agree::<Adler32>(seed, &data);
        assert_all_agree::<Adler32>(seed, &[]);
    }
    for seed in [0, u64::MAX, 0xffff_fffb_ffff_fffb, 0x0000_0001_ffff_ffff] {
        assert_all_agree::<Adler64>(seed, &data);
        assert_all_agree::<Adler64>(seed, &[]);
    }
}

#[test]
fn test_empty_returns_reduced_seed() {
    for engine in Engine::ALL {
        assert_eq!(engine.adler32(0x1234_5678, &[]), 0x1234_5678);
        assert_eq!(engine.adler32(0xffff_ffff, &[]), 0x000e_000e);
        assert_eq!(engine.adler64(u64::MAX, &[]), 0x0000_0004_0000_0004);
    }
}

#[test]
fn test_two_pass_equals_one_pass() {
    let data = sample(2 * Adler32::NMAX + 100);
    let splits = [0, 1, 15, 16, 17, 31, 32, 33, 64, 5551, 5552, 5553, data.len()];
    for engine in Engine::ALL {
        let whole32 = engine.adler32(1, &data);
        let whole64 = engine.adler64(1, &data);
        for k in splits {
            let (head, tail) = data.split_at(k);
            assert_eq!(engine.adler32(engine.adler32(1, head), tail), whole32, "{engine} k {k}");
            assert_eq!(engine.adler64(engine.adler64(1, head), tail), whole64, "{engine} k {k}");
        }
    }
}

#[test]
fn test_mixed_engines_chain() {
    let data = sample(50_000);
    let expected = Engine::Reference.adler32(1, &data);
    let mut value = 1;
    for (piece, engine) in data.chunks(7_777).zip(Engine::ALL.iter().cycle()) {
        value = engine.adler32(value, piece);
    }
    assert_eq!(value, expected);
}

#[test]
#[ignore = "allocates and checksums ~350 MiB"]
fn test_adler64_nmax_worst_case() {
    let data = vec![0xffu8; Adler64::NMAX + 1];
    let seed = Adler64::pack(Adler64::MODULUS - 1, Adler64::MODULUS - 1);
    for len in [Adler64::NMAX - 1, Adler64::NMAX, Adler64::NMAX + 1] {
        assert_all_agree::<Adler64>(seed, &data[..len]);
    }
}
