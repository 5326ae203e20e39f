//! Criterion benchmarks for the encoding hot path.
//!
//! Every key stroke runs the tracker, the encoder, and the JSON codec before
//! the event loop gets its answer, so this path has to stay cheap.
//!
//! Run with:
//! ```bash
//! cargo bench --package keyevent-core --bench encode_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keyevent_core::keymap::gdk::{KEY_A, KEY_CAPS_LOCK, KEY_RETURN};
use keyevent_core::{encode_key_event, KeyEventEncoder, ModifierLockState, NativeKeyEvent};

fn bench_encode(c: &mut Criterion) {
    let encoder = KeyEventEncoder::default();
    let events = [
        NativeKeyEvent::press(KEY_A, 0x26).with_string("a"),
        NativeKeyEvent::release(KEY_A, 0x26).with_string("a"),
        NativeKeyEvent::press(KEY_RETURN, 0x24),
        NativeKeyEvent::press(KEY_CAPS_LOCK, 0x42).with_state(0x10),
        NativeKeyEvent::release(KEY_CAPS_LOCK, 0x42).with_state(0x12),
    ];

    c.bench_function("encode_record", |b| {
        let mut locks = ModifierLockState::new();
        b.iter(|| {
            for event in &events {
                locks.observe(event);
                black_box(encoder.encode(black_box(event), &locks));
            }
        })
    });

    c.bench_function("encode_record_to_json", |b| {
        let mut locks = ModifierLockState::new();
        b.iter(|| {
            for event in &events {
                locks.observe(event);
                let record = encoder.encode(black_box(event), &locks);
                black_box(encode_key_event(&record).ok());
            }
        })
    });
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);
