use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tile_solver::{parse_board, solve_fast, solve_optimal};

// one of the two hardest 3x3 boards (31 moves)
const HARD_3X3: &str = "
8 6 7
2 5 4
3 . 1
";

const MEDIUM_4X4: &str = "
 1  2  3  4
 5  6  .  8
 9 10  7 11
13 14 15 12
";

// 40 moves
const HARDER_4X4: &str = "
 1  8  . 15
10  3  2 11
 4  7 12  6
 5  9 13 14
";

fn criterion_bench(c: &mut Criterion) {
    for (name, board) in [
        ("hard 3x3", HARD_3X3),
        ("medium 4x4", MEDIUM_4X4),
        ("harder 4x4", HARDER_4X4),
    ] {
        let start = parse_board(board).unwrap();

        c.bench_function(&format!("optimal {}", name), |b| {
            b.iter(|| {
                solve_optimal(black_box(&start));
            })
        });

        c.bench_function(&format!("fast {}", name), |b| {
            b.iter(|| {
                solve_fast(black_box(&start));
            })
        });
    }
}

criterion_group!(benches, criterion_bench);
criterion_main!(benches);
