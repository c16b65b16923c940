use std::hint::black_box;

use comet_lexer::{Lexer, for_each_token};
use criterion::{Criterion, criterion_group, criterion_main};

const SAMPLE: &str = r#"
// sample module
class Vector {
  constructor(x, y) {
    this.x = x;
    this.y = y;
  }

  scale(f) {
    return new Vector(this.x * f, this.y * f);
  }

  toString() {
    return `(${this.x}, ${this.y})`;
  }
}

const ID = /v[0-9]+/;
let half = total / 2;
let parts = ["a", 'b', `c${half}`];

for (let i = 0; i < parts.length; ++i) {
  /* per item */
  emit(parts[i], half >= 1 ? ID : null);
}
"#;

// ---------------------------------------------------------------------------
// Whole-input throughput
// ---------------------------------------------------------------------------

fn bench_tokenize_sample(c: &mut Criterion) {
    c.bench_function("tokenize_sample", |b| {
        b.iter(|| {
            let mut count = 0usize;
            for_each_token(SAMPLE, |_| count += 1).unwrap();
            black_box(count)
        });
    });
}

// ---------------------------------------------------------------------------
// Individual construct scans
// ---------------------------------------------------------------------------

fn bench_constructs(c: &mut Criterion) {
    let cases = [
        ("scan_operators", "a >>>= b === c && d **= e"),
        ("scan_template", "`head ${a} mid ${b} tail`"),
        ("scan_strings", r#"'one' + "two" + 'thr\'ee'"#),
        ("scan_numbers", "0 .5 0x100 123.456 1e9"),
        ("scan_comments", "/* block */ x // line"),
    ];
    for (name, source) in cases {
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut last = 0usize;
                for_each_token(source, |token| last = token.end()).unwrap();
                black_box(last)
            });
        });
    }
}

fn bench_regex_resolution(c: &mut Criterion) {
    c.bench_function("scan_regex", |b| {
        b.iter(|| {
            let mut lexer = Lexer::new("/p[a-z/]+\\/q/gim").unwrap();
            black_box(lexer.next(false).unwrap().len())
        });
    });
}

// ---------------------------------------------------------------------------
// Lookahead and checkpointing
// ---------------------------------------------------------------------------

fn bench_checkpoint_replay(c: &mut Criterion) {
    c.bench_function("checkpoint_replay", |b| {
        b.iter(|| {
            let mut lexer = Lexer::new("first second third fourth").unwrap();
            lexer.save_checkpoint();
            lexer.next(false).unwrap();
            lexer.next(true).unwrap();
            lexer.restore_checkpoint().unwrap();
            black_box(lexer.peek().offset)
        });
    });
}

criterion_group!(
    benches,
    bench_tokenize_sample,
    bench_constructs,
    bench_regex_resolution,
    bench_checkpoint_replay,
);
criterion_main!(benches);
