#![no_main]

use arbitrary::Arbitrary;
use imageplugins::{
    CodecImageImporter, ImageConverter, ImageImporter, ImageView, PixelFormat, PixelStorage,
    PngImageConverter,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    format: u8,
    alignment: u8,
    width: u8,
    height: u8,
    data: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let format = match input.format % 5 {
        0 => PixelFormat::R8Unorm,
        1 => PixelFormat::RG8Unorm,
        2 => PixelFormat::RGB8Unorm,
        3 => PixelFormat::RGBA8Unorm,
        _ => PixelFormat::R16Unorm,
    };
    let Some(storage) = PixelStorage::new(input.alignment) else {
        return;
    };
    let Ok(view) = ImageView::with_storage(
        storage,
        format,
        u32::from(input.width),
        u32::from(input.height),
        &input.data,
    ) else {
        return;
    };

    let Ok(png) = PngImageConverter::new().export_to_data(&view) else {
        return;
    };

    // Whatever was encoded must import back with the same rows
    let mut importer = CodecImageImporter::new();
    importer.open_data(&png).expect("encoded png must open");
    let image = importer.image2d(0, 0).expect("opened importer must import");
    assert_eq!(image.format(), format);
    for (exported, imported) in view.rows().zip(image.as_view().rows()) {
        assert_eq!(exported, imported);
    }
});
