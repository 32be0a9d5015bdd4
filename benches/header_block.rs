use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spdy_frame::parser::spdy::decode_header_block;

const REQ: &[(&str, &str)] = &[
    ("method", "GET"),
    ("url", "/"),
    ("version", "HTTP/1.1"),
    ("host", "www.example.org"),
];

const REQ_LONG: &[(&str, &str)] = &[
    ("method", "POST"),
    ("url", "/log?format=json&hasfast=true"),
    ("version", "HTTP/1.1"),
    ("host", "play.google.com"),
    ("scheme", "https"),
    ("user-agent", "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/109.0"),
    ("accept", "*/*"),
    ("accept-language", "en-US,en;q=0.5"),
    ("accept-encoding", "gzip, deflate, br"),
    ("referer", "https://www.google.com/"),
    ("content-type", "application/x-www-form-urlencoded;charset=utf-8"),
    ("content-length", "669"),
    ("origin", "https://www.google.com"),
    ("dnt", "1"),
    ("pragma", "no-cache"),
    ("cache-control", "no-cache"),
];

fn encode(pairs: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = (pairs.len() as u16).to_be_bytes().to_vec();
    for (name, value) in pairs {
        buf.extend_from_slice(&(name.len() as u16).to_be_bytes());
        buf.extend_from_slice(name.as_bytes());
        buf.extend_from_slice(&(value.len() as u16).to_be_bytes());
        buf.extend_from_slice(value.as_bytes());
    }
    buf
}

fn benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("header_block");
    for pairs in [REQ, REQ_LONG] {
        let block = encode(pairs);
        group.throughput(Throughput::Bytes(block.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("complete", pairs.len()),
            &block,
            |b, i| b.iter(|| decode_header_block(black_box(i))),
        );

        let truncated = &block[..block.len() / 2];
        group.bench_with_input(
            BenchmarkId::new("truncated", pairs.len()),
            &truncated,
            |b, &i| b.iter(|| decode_header_block(black_box(i))),
        );
    }
    group.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
