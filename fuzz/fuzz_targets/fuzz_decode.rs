#![no_main]
use libfuzzer_sys::fuzz_target;
use zenimagereader::{ImageReader, Limits, MemStorage};

fuzz_target!(|data: &[u8]| {
    let mut storage = MemStorage::new();
    storage.insert("f.bmp", data);
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Limits::default()
    };
    let mut reader = ImageReader::with_limits(storage, limits);

    // Every operation must return a status, never panic, and never leak a handle
    let _ = reader.bmp_dimensions("f.bmp");
    let _ = reader.load_bmp("f.bmp");
    let _ = reader.load_bmp_native("f.bmp");
    assert_eq!(reader.storage().open_handles(), 0);
});
