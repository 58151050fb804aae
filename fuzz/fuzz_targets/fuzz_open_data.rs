#![no_main]

use imageplugins::{CodecImageImporter, ImageImporter, Limits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = Limits::none()
        .with_max_pixels(16 * 1024 * 1024)
        .with_max_memory(256 * 1024 * 1024);
    let mut importer = CodecImageImporter::with_limits(limits);

    if importer.open_data(data).is_ok() {
        let image = importer.image2d(0, 0).expect("opened importer must import");
        let row_len = image.width() as usize * image.format().pixel_size();
        assert_eq!(image.data().len(), row_len * image.height() as usize);
    } else {
        assert!(!importer.is_opened());
    }
});
