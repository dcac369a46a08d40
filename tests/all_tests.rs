#![allow(bad_style)]

mod pixels;
mod png;

fn rand_bytes(count: usize) -> Vec<u8> {
  let mut buffer = vec![0; count];
  getrandom::getrandom(&mut buffer).unwrap();
  buffer
}

/// Appends one chunk, with a zeroed CRC since nothing here checks it.
fn push_chunk(png: &mut Vec<u8>, ty: &[u8; 4], data: &[u8]) {
  png.extend_from_slice(&(data.len() as u32).to_be_bytes());
  png.extend_from_slice(ty);
  png.extend_from_slice(data);
  png.extend_from_slice(&[0; 4]);
}
