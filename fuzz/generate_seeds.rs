#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bpp: u16, palette: &[[u8; 4]], pixels: &[u8]) -> Vec<u8> {
    let offset = 54 + palette.len() as u32 * 4;
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(offset + pixels.len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&offset.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&[0u8; 16]);
    out.extend_from_slice(&(palette.len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    for entry in palette {
        out.extend_from_slice(entry);
    }
    out.extend_from_slice(pixels);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 24-bit 2x2 bottom-up, rows padded to 8 bytes
    let rgb = bmp(2, 2, 24, &[], &[0, 0, 255, 0, 255, 0, 0, 0, 255, 0, 0, 255, 255, 255, 0, 0]);
    fs::write(format!("{dir}/rgb24_2x2.bmp"), rgb).unwrap();

    // 16-bit 3x1 top-down
    let x555 = bmp(3, -1, 16, &[], &[0x00, 0x7C, 0xE0, 0x03, 0x1F, 0x00, 0, 0]);
    fs::write(format!("{dir}/rgb16_3x1.bmp"), x555).unwrap();

    // 8-bit 3x2 with a 3-entry palette
    let pal8 = bmp(3, 2, 8, &[[0, 0, 255, 0], [0, 255, 0, 0], [255, 0, 0, 0]], &[0, 1, 2, 0, 2, 1, 0, 0]);
    fs::write(format!("{dir}/pal8_3x2.bmp"), pal8).unwrap();

    // 1-bit 10x1 black/white
    let mono = bmp(10, 1, 1, &[[0, 0, 0, 0], [255, 255, 255, 0]], &[0b1010_1010, 0b1100_0000, 0, 0]);
    fs::write(format!("{dir}/mono_10x1.bmp"), mono).unwrap();

    println!("Seeds written to {dir}/");
}
