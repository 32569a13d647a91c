use anyhow::Result;

use paperframe::consts::FRAME_FIXED_HDR;
use paperframe::frame;
use paperframe::reassemble::reassemble;
use paperframe::split::{split, RobustnessLevel};
use paperframe::transport::{Radix32, TextTranscoder};

const NAME: &str = "data.bin";

fn body_capacity(level: RobustnessLevel) -> usize {
    level.budget() - (FRAME_FIXED_HDR + NAME.len() + 1)
}

#[test]
fn roundtrip_boundary_lengths() -> Result<()> {
    let level = RobustnessLevel::High;
    let cap = body_capacity(level);
    let mut rng = oorandom::Rand32::new(0xC0FF_EE01);

    for len in [0usize, 1, cap, cap + 1, 3 * cap, 3 * cap + 17] {
        let data = pattern(&mut rng, len);
        let frames = split(&data, NAME, level)?;

        let t = Radix32;
        let codes: Vec<String> = frames
            .iter()
            .map(|f| t.encode_text(&frame::encode(f)))
            .collect();

        let outcome = reassemble(&codes, &t);
        assert!(outcome.failures.is_empty(), "len = {len}");
        assert_eq!(outcome.files.len(), 1, "len = {len}");
        let file = &outcome.files[0];
        assert!(file.verified, "len = {len}");
        assert_eq!(file.file_name, NAME);
        assert_eq!(file.bytes, data, "len = {len}");
    }
    Ok(())
}

#[test]
fn roundtrip_survives_shuffle_and_duplication() -> Result<()> {
    let level = RobustnessLevel::High;
    let cap = body_capacity(level);
    let mut rng = oorandom::Rand32::new(0xC0FF_EE02);
    let data = pattern(&mut rng, 5 * cap + 99);

    let t = Radix32;
    let mut codes: Vec<String> = split(&data, NAME, level)?
        .iter()
        .map(|f| t.encode_text(&frame::encode(f)))
        .collect();
    shuffle(&mut rng, &mut codes);

    // Feeding every code three times must not change the outcome.
    let tripled: Vec<String> = codes
        .iter()
        .flat_map(|c| std::iter::repeat(c.clone()).take(3))
        .collect();

    for input in [&codes, &tripled] {
        let outcome = reassemble(input, &t);
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.files.len(), 1);
        assert!(outcome.files[0].verified);
        assert_eq!(outcome.files[0].bytes, data);
    }
    Ok(())
}

#[test]
fn empty_file_still_ships_one_frame() -> Result<()> {
    let frames = split(&[], NAME, RobustnessLevel::Medium)?;
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].count, 1);
    assert_eq!(frames[0].index, 0);
    assert!(frames[0].body.is_empty());
    assert_eq!(frames[0].padding, 0);
    Ok(())
}

fn pattern(rng: &mut oorandom::Rand32, len: usize) -> Vec<u8> {
    (0..len).map(|_| (rng.rand_u32() & 0xFF) as u8).collect()
}

fn shuffle(rng: &mut oorandom::Rand32, items: &mut [String]) {
    for i in (1..items.len()).rev() {
        let j = rng.rand_range(0..(i as u32 + 1)) as usize;
        items.swap(i, j);
    }
}
