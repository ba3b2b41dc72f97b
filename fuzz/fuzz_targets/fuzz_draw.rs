#![no_main]
use libfuzzer_sys::fuzz_target;
use zenimagereader::{ImageReader, MemStorage, Surface};

struct Bounded {
    width: u32,
    height: u32,
}

impl Surface for Bounded {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn write_run(&mut self, x: u32, y: u32, pixels: &[u16]) {
        assert!(y < self.height);
        assert!(x as usize + pixels.len() <= self.width as usize);
    }
}

fuzz_target!(|data: &[u8]| {
    // First 4 bytes pick the placement, the rest is the file
    let Some((place, file)) = data.split_first_chunk::<4>() else {
        return;
    };
    let x = i32::from(i16::from_le_bytes([place[0], place[1]]));
    let y = i32::from(i16::from_le_bytes([place[2], place[3]]));

    let mut storage = MemStorage::new();
    storage.insert("f.bmp", file);
    let mut reader = ImageReader::new(storage);
    let mut tft = Bounded {
        width: 320,
        height: 240,
    };
    let _ = reader.draw_bmp("f.bmp", &mut tft, x, y);
    assert_eq!(reader.storage().open_handles(), 0);
});
