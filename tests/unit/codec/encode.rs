use super::*;
use crate::codec::decode::decode_image;

#[test]
fn png_flattens_transparent_pixels_to_background() {
    let mut surface = Surface::new(2, 1, 1.0);
    surface.data_mut()[0..4].copy_from_slice(&[0, 0, 0, 255]);
    let img = encode(&mut surface, [10, 20, 30, 255], ImageFormat::Png, None).unwrap();
    assert_eq!((img.width, img.height), (2, 1));
    assert_eq!(surface.pixel(1, 0), Some([10, 20, 30, 255]));
    assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 255]));

    let decoded = decode_image(&img.bytes).unwrap();
    assert_eq!(decoded.rgba8_premul, surface.data().to_vec());
}

#[test]
fn translucent_background_is_baked_opaque() {
    let mut surface = Surface::new(1, 1, 1.0);
    encode(&mut surface, [200, 100, 50, 10], ImageFormat::Png, None).unwrap();
    assert_eq!(surface.pixel(0, 0), Some([200, 100, 50, 255]));
}

#[test]
fn partially_covered_pixels_survive_png() {
    let mut surface = Surface::new(1, 1, 1.0);
    surface.data_mut().copy_from_slice(&[40, 0, 0, 128]);
    let img = encode(&mut surface, [255, 255, 255, 255], ImageFormat::Png, None).unwrap();
    let decoded = decode_image(&img.bytes).unwrap();
    assert_eq!(decoded.rgba8_premul, vec![40, 0, 0, 128]);
}

#[test]
fn jpeg_encodes_opaque_image() {
    let mut surface = Surface::new(8, 8, 1.0);
    let img = encode(&mut surface, [255, 255, 255, 255], ImageFormat::Jpeg, Some(80)).unwrap();
    assert_eq!(img.format, ImageFormat::Jpeg);
    assert_eq!(&img.bytes[..2], &[0xFF, 0xD8]);
    let decoded = decode_image(&img.bytes).unwrap();
    assert!(decoded.rgba8_premul.chunks_exact(4).all(|p| p[3] == 255 && p[0] > 240));
}

#[test]
fn zero_sized_surface_is_an_encode_error() {
    let mut surface = Surface::new(0, 5, 1.0);
    let err = encode(&mut surface, [255, 255, 255, 255], ImageFormat::Png, None).unwrap_err();
    assert!(err.to_string().starts_with("encode error:"));
}
