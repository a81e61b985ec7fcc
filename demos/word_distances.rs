//! Print the graded letter distance table and compare a few words.
//!
//! Run with: cargo run --example word_distances

use msax_rs::{Encoder, EncoderConfig, Word};

fn main() -> msax_rs::Result<()> {
    let encoder = Encoder::new(EncoderConfig::new(3, 5))?;
    let table = encoder.distance_table();

    print!("   ");
    for j in 0..table.alphabet_size() {
        print!("{:>6}", (b'a' + j as u8) as char);
    }
    println!();
    for (i, row) in table.as_rows().iter().enumerate() {
        print!("{:>3}", (b'a' + i as u8) as char);
        for d in row {
            print!("{d:>6.2}");
        }
        println!();
    }

    let base: Word = "aaa".parse()?;
    for other in ["aaa", "baa", "bba", "eee"] {
        let word: Word = other.parse()?;
        println!("d({base}, {word}) = {:.3}", encoder.word_distance(&base, &word)?);
    }
    Ok(())
}
