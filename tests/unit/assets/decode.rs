use std::io::Cursor;

use super::*;

fn encode(img: image::RgbaImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let prepared = decode_frame(&encode(img, image::ImageFormat::Png)).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_jpeg_is_opaque() {
    let img = image::RgbImage::from_pixel(4, 2, image::Rgb([10, 200, 30]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .unwrap();
    let prepared = decode_frame(&buf).unwrap();
    assert_eq!((prepared.width, prepared.height), (4, 2));
    assert!(prepared.rgba8_premul().chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn garbage_bytes_are_a_decode_error() {
    let err = decode_frame(b"not an image").unwrap_err();
    assert!(matches!(err, ScrubError::Decode(_)));
}

#[test]
fn from_straight_rgba8_validates_length() {
    assert!(PreparedFrame::from_straight_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(PreparedFrame::from_straight_rgba8(0, 2, vec![]).is_err());
    let f = PreparedFrame::from_straight_rgba8(1, 1, vec![255, 255, 255, 0]).unwrap();
    assert_eq!(f.rgba8_premul(), &[0, 0, 0, 0]);
}

#[test]
fn frames_wider_than_the_raster_limit_are_rejected() {
    let err = PreparedFrame::from_straight_rgba8(70_000, 1, vec![0; 280_000]).unwrap_err();
    assert!(matches!(err, ScrubError::Decode(_)));
}

#[test]
fn paint_shares_the_decoded_pixels() {
    let f = PreparedFrame::from_straight_rgba8(2, 1, vec![9, 9, 9, 255, 7, 7, 7, 255]).unwrap();
    let vello_cpu::ImageSource::Pixmap(pixmap) = f.paint().image else {
        panic!("frame paint must be pixmap-backed");
    };
    assert_eq!((pixmap.width(), pixmap.height()), (2, 1));
    assert_eq!(pixmap.data_as_u8_slice(), f.rgba8_premul());
}
