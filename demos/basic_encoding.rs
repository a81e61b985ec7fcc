//! Encode an irregularly sampled series into a symbolic word.
//!
//! Run with: cargo run --example basic_encoding

use msax_rs::{Encoder, EncoderConfig, TimeIndexedSeries, WindowBoundary};

fn main() -> msax_rs::Result<()> {
    // Irregular sampling: gaps cycle through 0.5, 0.75 and 1.0 time units.
    let mut t = 0.0;
    let points: Vec<(f64, f64)> = (0..120)
        .map(|i| {
            t += 0.5 + (i % 3) as f64 * 0.25;
            (t, (t * 0.2).sin() * 3.0 + 0.02 * t)
        })
        .collect();

    // Fix the duration so series recorded over different spans share a time axis.
    let series = TimeIndexedSeries::new(points)?.with_duration(100.0)?;

    let encoder = Encoder::new(EncoderConfig::new(10, 7))?;
    let encoding = encoder.encode(&series)?;

    println!("Word: {}", encoding.word);
    for (letter, seg) in encoding.word.letters().iter().zip(&encoding.segments) {
        println!(
            "  [{:>7.2}, {:>7.2})  mean={:>6.3}  -> {letter}",
            seg.start, seg.stop, seg.aggregate
        );
    }

    let closed = Encoder::new(EncoderConfig::new(10, 7).with_boundary(WindowBoundary::ClosedFinal))?;
    println!("Closed final window: {}", closed.encode(&series)?.word);

    Ok(())
}
