mod common;

use common::{RecordingSurface, TestBmp};
use zenimagereader::*;

fn gradient(w: u32, h: u32) -> TestBmp {
    TestBmp::rgb24(w, h, |x, y| [(x * 40) as u8, (y * 50) as u8, (x * 7 + y * 13) as u8])
}

fn reader_with(name: &str, bytes: Vec<u8>) -> ImageReader<MemStorage> {
    let mut storage = MemStorage::new();
    storage.insert(name, bytes);
    ImageReader::new(storage)
}

/// Check that exactly the placed rectangle ∩ surface was written, with the
/// right colors.
fn assert_placed(surface: &RecordingSurface, bmp: &TestBmp, x: i32, y: i32) {
    for sy in 0..surface.height {
        for sx in 0..surface.width {
            let ix = i64::from(sx) - i64::from(x);
            let iy = i64::from(sy) - i64::from(y);
            let inside = (0..i64::from(bmp.width)).contains(&ix)
                && (0..i64::from(bmp.height)).contains(&iy);
            let expected = inside.then(|| bmp.expected_at(ix as u32, iy as u32));
            assert_eq!(
                surface.at(sx, sy),
                expected,
                "surface ({sx}, {sy}) with image at ({x}, {y})"
            );
        }
    }
}

#[test]
fn draws_whole_image() {
    let bmp = gradient(5, 4);
    let mut reader = reader_with("g.bmp", bmp.encode());
    let mut tft = RecordingSurface::new(8, 6);
    reader.draw_bmp("g.bmp", &mut tft, 1, 2).unwrap();
    assert_placed(&tft, &bmp, 1, 2);
    assert_eq!(tft.runs, 4);
    assert_eq!(reader.storage().open_handles(), 0);
}

#[test]
fn every_placement_writes_only_the_intersection() {
    let bmp = gradient(5, 4);
    let mut reader = reader_with("g.bmp", bmp.encode());
    for y in -6..=8 {
        for x in -7..=10 {
            let mut tft = RecordingSurface::new(8, 6);
            reader.draw_bmp("g.bmp", &mut tft, x, y).unwrap();
            assert_placed(&tft, &bmp, x, y);
        }
    }
}

#[test]
fn off_surface_placements_succeed_without_writes() {
    let bmp = gradient(5, 4);
    let mut reader = reader_with("g.bmp", bmp.encode());
    for (x, y) in [(18, 0), (8, 0), (0, 6), (-5, 0), (0, -4), (-1000, -1000), (i32::MAX, 0)] {
        let mut tft = RecordingSurface::new(8, 6);
        assert_eq!(reader.draw_bmp("g.bmp", &mut tft, x, y), Ok(()));
        assert_eq!(tft.runs, 0, "placement ({x}, {y})");
    }
}

#[test]
fn off_surface_skips_pixel_data() {
    let bmp = gradient(5, 4);
    let mut bytes = bmp.encode();
    bytes.truncate(54);
    let mut reader = reader_with("g.bmp", bytes);
    let mut tft = RecordingSurface::new(8, 6);
    assert_eq!(reader.draw_bmp("g.bmp", &mut tft, 18, 0), Ok(()));
    assert_eq!(tft.runs, 0);
}

#[test]
fn wide_image_is_chunked_and_clipped() {
    let bmp = TestBmp::rgb24(203, 3, |x, y| [x as u8, (x >> 1) as u8 ^ y as u8, 255 - x as u8]);
    let mut reader = reader_with("wide.bmp", bmp.encode());
    for x in [0, -37, -120, 17] {
        let mut tft = RecordingSurface::new(240, 5);
        reader.draw_bmp("wide.bmp", &mut tft, x, 1).unwrap();
        assert_placed(&tft, &bmp, x, 1);
    }
}

#[test]
fn top_down_draws_like_bottom_up() {
    let bmp = gradient(6, 5);
    let mut storage = MemStorage::new();
    storage.insert("up.bmp", bmp.encode());
    storage.insert("down.bmp", bmp.clone().top_down().encode());
    let mut reader = ImageReader::new(storage);

    let mut a = RecordingSurface::new(8, 8);
    let mut b = RecordingSurface::new(8, 8);
    reader.draw_bmp("up.bmp", &mut a, 1, -2).unwrap();
    reader.draw_bmp("down.bmp", &mut b, 1, -2).unwrap();
    assert_eq!(a.frame, b.frame);
    assert_placed(&b, &bmp, 1, -2);
}

#[test]
fn sixteen_bit_pixels() {
    let bmp = TestBmp::rgb16(3, 3, |x, y| ((x as u16 * 9) << 10) | ((y as u16 * 11) << 5) | 0x8000 | 7);
    let mut reader = reader_with("s.bmp", bmp.encode());
    let mut tft = RecordingSurface::new(4, 4);
    reader.draw_bmp("s.bmp", &mut tft, 0, 1).unwrap();
    assert_placed(&tft, &bmp, 0, 1);
}

#[test]
fn mono_clipped_mid_byte() {
    let bmp = TestBmp::mono(21, 3, [[0, 0, 0], [255, 255, 0]], |x, y| (x + y) % 3 == 0);
    let mut reader = reader_with("m.bmp", bmp.encode());
    for x in [-3, -9, 0, 5] {
        let mut tft = RecordingSurface::new(16, 3);
        reader.draw_bmp("m.bmp", &mut tft, x, 0).unwrap();
        assert_placed(&tft, &bmp, x, 0);
    }
}

#[test]
fn wide_mono_clipped_across_chunks() {
    let bmp = TestBmp::mono(203, 2, [[0, 0, 255], [255, 255, 255]], |x, y| (x * 7 + y) % 5 < 2);
    let mut reader = reader_with("wm.bmp", bmp.encode());
    for x in [-3, -85, -1, 0] {
        let mut tft = RecordingSurface::new(240, 2);
        reader.draw_bmp("wm.bmp", &mut tft, x, 0).unwrap();
        assert_placed(&tft, &bmp, x, 0);
    }
}

#[test]
fn eight_bit_palette() {
    let palette = vec![[255, 0, 0], [0, 255, 0], [0, 0, 255], [10, 20, 30]];
    let bmp = TestBmp::indexed8(7, 2, palette, |x, y| ((x + y) % 4) as u8).top_down();
    let mut reader = reader_with("p.bmp", bmp.encode());
    let mut tft = RecordingSurface::new(7, 2);
    reader.draw_bmp("p.bmp", &mut tft, 0, 0).unwrap();
    assert_placed(&tft, &bmp, 0, 0);
}

#[test]
fn missing_file() {
    let mut reader = ImageReader::new(MemStorage::new());
    let mut tft = RecordingSurface::new(4, 4);
    let result = reader.draw_bmp("nothing.bmp", &mut tft, 0, 0);
    assert_eq!(result, Err(ImageError::FileNotFound));
    assert_eq!(ImageReturnCode::from(&result), ImageReturnCode::FileNotFound);
}

#[test]
fn truncated_pixels_are_a_format_error() {
    let bmp = gradient(4, 4);
    let mut bytes = bmp.encode();
    bytes.truncate(bytes.len() - 20);
    let mut reader = reader_with("t.bmp", bytes);
    let mut tft = RecordingSurface::new(4, 4);
    let result = reader.draw_bmp("t.bmp", &mut tft, 0, 0);
    assert_eq!(result, Err(ImageError::Format(FormatError::Truncated)));
    assert_eq!(reader.storage().open_handles(), 0);
    // Bottom-up: the top rows are stored last and were cut off.
    assert_eq!(tft.runs, 0);
}

#[test]
fn compressed_files_are_rejected() {
    let mut bytes = gradient(2, 2).encode();
    bytes[30] = 1;
    let mut reader = reader_with("rle.bmp", bytes);
    let mut tft = RecordingSurface::new(4, 4);
    assert_eq!(
        reader.draw_bmp("rle.bmp", &mut tft, 0, 0),
        Err(ImageError::Format(FormatError::UnsupportedCompression(1)))
    );
    assert_eq!(tft.runs, 0);
}
