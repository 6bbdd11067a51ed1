use aminet::{Action, PlaybackCommand, StreamKind, encode};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    // Shortest real command (9-byte frame, inline checksum)
    let playback = Action::Playback {
        command: PlaybackCommand::Play,
        channel: "1".to_string(),
    };
    group.bench_function("encode_playback", |b| {
        b.iter(|| {
            black_box(encode(black_box(&playback)));
        });
    });

    let toggle = Action::SetStream {
        stream: StreamKind::Video,
        enabled: true,
        channel: "1".to_string(),
    };
    group.bench_function("encode_set_stream", |b| {
        b.iter(|| {
            black_box(encode(black_box(&toggle)));
        });
    });

    // Quoted name exercises the numeric check and the 3-byte checksum form
    let select = Action::SelectFile {
        name: "PRESHOW_LOOP".to_string(),
        channel: "1".to_string(),
    };
    group.bench_function("encode_select_file", |b| {
        b.iter(|| {
            black_box(encode(black_box(&select)));
        });
    });

    group.finish();
}

fn bench_encode_large(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    // Long banner pushes the sum into the 4-byte checksum form
    let banner = Action::BannerText {
        text: "X".repeat(1024),
        channel: "1".to_string(),
    };
    group.throughput(Throughput::Bytes(1024));
    group.bench_function("encode_banner_1kb", |b| {
        b.iter(|| {
            black_box(encode(black_box(&banner)));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_encode_large);
criterion_main!(benches);
