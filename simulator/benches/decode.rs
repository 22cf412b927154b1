use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use legv8_sim::{decode, disasm::listing, ArchState, Interpreter, Program, SimConfig};

const PROGRAM_SIZES: [usize; 3] = [100, 1_000, 10_000];

// ADD, ADDI, LSL, STUR, LDUR, CBZ, MOVZ, MOVK, NOP
const WORDS: [u32; 9] = [
    0x8b01_0002,
    0x9100_1421,
    0xd36c_1042,
    0xf800_8083,
    0xf840_8086,
    0xb400_0063,
    0xd2a0_00e5,
    0xf280_0025,
    0x0000_0000,
];

const BREAK: &str = "11111110110111101111111111100111";

fn straight_line_program(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("{:032b}", WORDS[i % WORDS.len()]))
        .chain(std::iter::once(BREAK.to_string()))
        .collect()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decode");

    for &n in &PROGRAM_SIZES {
        let words = (0..n).map(|i| WORDS[i % WORDS.len()]).collect::<Vec<_>>();
        group.bench_with_input(BenchmarkId::from_parameter(n), &words, |b, words| {
            b.iter(|| {
                for &word in words {
                    let _ = decode(word);
                }
            })
        });
    }

    group.finish();
}

fn bench_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Listing");

    for &n in &PROGRAM_SIZES {
        let program = Program::from_lines(straight_line_program(n), 96);
        group.bench_with_input(BenchmarkId::from_parameter(n), &program, |b, program| {
            b.iter(|| listing(program))
        });
    }

    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("Run");

    for &n in &PROGRAM_SIZES {
        let program = Program::from_lines(straight_line_program(n), 96);
        group.bench_with_input(BenchmarkId::from_parameter(n), &program, |b, program| {
            b.iter_batched(
                || {
                    (
                        Interpreter::new(SimConfig::default()),
                        ArchState::default(),
                    )
                },
                |(mut interpreter, mut state)| {
                    let _ = interpreter.run(program, &mut state);
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(simulator, bench_decode, bench_listing, bench_run);
criterion_main!(simulator);
