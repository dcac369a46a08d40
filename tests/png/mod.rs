use pngsleuth::{
  analysis::analyze_png,
  png::{
    png_find_trailing_data, png_get_header, png_get_metadata, png_get_text_payloads, FileIdentity,
    PngChunkType, PngColorType, PngRawChunkIter, TextChunkKind, PNG_SIGNATURE,
  },
  SleuthError,
};
use walkdir::WalkDir;

use super::push_chunk;

fn check_all(bytes: &[u8]) {
  for _ in PngRawChunkIter::new(bytes) {
    //
  }
  let _ = png_get_header(bytes);
  let _ = png_get_metadata(bytes, FileIdentity::default());
  let _ = png_get_text_payloads(bytes);
  let _ = png_find_trailing_data(bytes);
}

#[test]
fn test_png_checks_no_panics() {
  // iter ALL files in the test folder, even non-png files shouldn't panic.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    println!("{}", entry.path().display());
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    check_all(&v);
  }
  // even totally random data should never panic!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    check_all(&v);
  }
  // random data behind a real signature gets further into each check
  for _ in 0..10 {
    let mut v = PNG_SIGNATURE.to_vec();
    v.extend(super::rand_bytes(1024));
    check_all(&v);
  }
}

/// A 4x4 palette image with one of each text chunk and a zip header after
/// `IEND`.
fn ctf_png() -> Vec<u8> {
  let mut png = PNG_SIGNATURE.to_vec();
  let mut ihdr = Vec::new();
  ihdr.extend_from_slice(&4_u32.to_be_bytes());
  ihdr.extend_from_slice(&4_u32.to_be_bytes());
  ihdr.extend_from_slice(&[8, 3, 0, 0, 1]);
  push_chunk(&mut png, b"IHDR", &ihdr);
  push_chunk(&mut png, b"PLTE", &[0, 0, 0, 255, 255, 255]);
  push_chunk(&mut png, b"tEXt", b"Author\0someone");
  let mut ztxt = b"Hint\0\0".to_vec();
  ztxt.extend(miniz_oxide::deflate::compress_to_vec_zlib(b"look in the blue channel", 6));
  push_chunk(&mut png, b"zTXt", &ztxt);
  let mut itxt = b"Flag\0\x01\0en\0Flagge\0".to_vec();
  itxt.extend(miniz_oxide::deflate::compress_to_vec_zlib("flag{\u{fc}ber}".as_bytes(), 6));
  push_chunk(&mut png, b"iTXt", &itxt);
  push_chunk(&mut png, b"IDAT", &[0x78, 0x9C, 0, 0]);
  push_chunk(&mut png, b"IEND", &[]);
  png.extend_from_slice(b"PK\x03\x04secret.txt");
  png
}

#[test]
fn test_full_report_of_crafted_png() {
  let png = ctf_png();
  let report = analyze_png(&png, FileIdentity::new("ctf.png", "abc123")).unwrap();

  let m = &report.metadata;
  assert_eq!(m.identity.file_name.as_deref(), Some("ctf.png"));
  assert_eq!(m.file_size, png.len());
  assert_eq!(m.signature_hex, "89 50 4e 47 0d 0a 1a 0a");
  assert_eq!((m.width, m.height, m.bit_depth), (4, 4, 8));
  assert_eq!(m.color_type, PngColorType::Index);
  assert_eq!(m.color_type.description(), "Palette");
  assert!(m.interlaced);
  assert_eq!(m.interlace_description(), "Adam7");
  assert_eq!(m.chunk_count, 7);
  assert!(m.has_image_data);
  assert!(!m.truncated);
  assert_eq!(
    m.ancillary_chunks,
    [PngChunkType(*b"tEXt"), PngChunkType(*b"zTXt"), PngChunkType(*b"iTXt")]
  );
  assert_eq!(m.ancillary_chunks_description(), "tEXt, zTXt, iTXt");

  let entries = report.text.entries();
  assert_eq!(entries.len(), 3);
  assert_eq!(entries[0].kind, TextChunkKind::tEXt);
  assert_eq!(entries[0].text, "Author\0someone");
  assert_eq!(entries[1].keyword.as_deref(), Some("Hint"));
  assert_eq!(entries[1].text, "look in the blue channel");
  assert_eq!(entries[2].language_tag.as_deref(), Some("en"));
  assert_eq!(entries[2].translated_keyword.as_deref(), Some("Flagge"));
  assert_eq!(entries[2].text, "flag{\u{fc}ber}");

  let trailing = report.trailing.unwrap();
  assert_eq!(trailing.bytes, b"PK\x03\x04secret.txt");
  assert_eq!(trailing.data_offset, png.len() - trailing.bytes.len());
}

#[test]
fn test_non_png_input_is_rejected_everywhere() {
  let gif = b"GIF89a\x01\0\x01\0\0\0\0;";
  assert_eq!(png_get_header(gif), Err(SleuthError::InvalidFormat));
  assert_eq!(png_get_metadata(gif, FileIdentity::default()), Err(SleuthError::InvalidFormat));
  assert_eq!(png_get_text_payloads(gif), Err(SleuthError::InvalidFormat));
  assert_eq!(png_find_trailing_data(gif), Err(SleuthError::InvalidFormat));
  assert_eq!(analyze_png(gif, FileIdentity::default()), Err(SleuthError::InvalidFormat));
}
