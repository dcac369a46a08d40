use pngsleuth::{
  analysis::analyze_pixels,
  lsb::{ChannelBitStreams, ChannelSelection},
  Channel, RgbaBitmapRef, SleuthError, RGBA8,
};

/// Random pixels with `message` (and a zero byte) written into the red and
/// green low bits.
fn stego_pixels(message: &[u8], count: usize) -> Vec<u8> {
  let mut bytes = super::rand_bytes(count * 4);
  let bits: Vec<u8> =
    message.iter().chain(Some(&0)).flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1)).collect();
  assert!(bits.len() <= count * 2);
  for (i, bit) in bits.iter().enumerate() {
    // pixel i/2, channel R or G
    let sample = &mut bytes[(i / 2) * 4 + (i % 2)];
    *sample = (*sample & !1) | bit;
  }
  bytes
}

#[test]
fn test_lsb_message_from_raw_rgba() {
  let bytes = stego_pixels(b"meet at dawn", 64);
  let streams = ChannelBitStreams::from_rgba_bytes(16, 4, &bytes).unwrap();
  assert_eq!(streams.len(), 64);
  let rg = ChannelSelection::only(Channel::R).with(Channel::G, true);
  assert_eq!(streams.extract_message(rg), "meet at dawn");
}

#[test]
fn test_raw_rgba_length_must_match() {
  let bytes = super::rand_bytes(63);
  assert_eq!(
    ChannelBitStreams::from_rgba_bytes(4, 4, &bytes[..63]),
    Err(SleuthError::DimensionsMismatch)
  );
  assert_eq!(RgbaBitmapRef::from_rgba_bytes(4, 4, &bytes).err(), Some(SleuthError::DimensionsMismatch));
}

#[test]
fn test_pixel_report_views_agree_with_bit_streams() {
  let bytes = super::rand_bytes(5 * 7 * 4);
  let raster = RgbaBitmapRef::from_rgba_bytes(5, 7, &bytes).unwrap();
  let report = analyze_pixels(raster);
  assert_eq!(report.planes.normal.as_rgba_bytes(), &bytes[..]);
  for channel in Channel::ALL {
    let views = report.planes.channel(channel);
    let lsb_plane = views.plane_for_bit(0).unwrap();
    for (bit, p) in report.lsb.channel(channel).iter().zip(lsb_plane.pixels()) {
      let expected = if *bit == 1 { RGBA8::WHITE } else { RGBA8::BLACK };
      assert_eq!(*p, expected);
    }
    // the plane list runs from the high bit down
    assert_eq!(Some(&views.planes[7]), views.plane_for_bit(0));
    assert_eq!(Some(&views.planes[0]), views.plane_for_bit(7));
  }
}
