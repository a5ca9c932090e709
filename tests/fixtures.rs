#![allow(dead_code)]
use std::fs;
use std::path::{Path, PathBuf};

use std::sync::Once;

static LOGGER_INIT: Once = Once::new();

// Rust runs the tests concurrently, so unless we synchronize logging access
// it will crash when attempting to run `cargo test` with some logging facilities.
pub fn ensure_env_logger_initialized() {
    use std::io::Write;

    LOGGER_INIT.call_once(|| {
        let mut builder = env_logger::Builder::from_default_env();
        builder
            .format(|buf, record| writeln!(buf, "[{}] - {}", record.level(), record.args()))
            .is_test(true)
            .init();
    });
}

pub const ARM9_LOAD: u32 = 0x0200_0000;
pub const OVERLAY_0011_LOAD: u32 = 0x022D_C240;

pub const ENTITY_SYMBOL: &str = "ENTITY_SYMBOL";
pub const LEVEL_NAME: &str = "LEVEL_NAME";
pub const SUB_FILE_NAME: &str = "sub_file";
pub const SPECIAL_NAME: &str = "special";

const ARM9_ENTITY_STRINGS: usize = 0xA6910;
const ARM9_LEVEL_STRINGS: usize = 0xA46EC;
const OVERLAY_SUB_FILE_STRINGS: usize = 0x41C00;
const OVERLAY_SPECIAL_STRINGS: usize = 0x3D8AC;

fn put(buf: &mut [u8], offset: usize, bytes: &[u8]) {
    buf[offset..offset + bytes.len()].copy_from_slice(bytes);
}

fn put_c_string(buf: &mut [u8], offset: usize, s: &str) {
    put(buf, offset, s.as_bytes());
    buf[offset + s.len()] = 0;
}

/// Every odd entry points at a string, every even one is null.
fn pointer_for(index: usize, load: u32, strings_at: usize) -> u32 {
    if index % 2 == 1 {
        load + strings_at as u32
    } else {
        0
    }
}

/// A zero-filled `arm9.bin` stand-in with both built-in tables populated.
pub fn synthetic_arm9() -> Vec<u8> {
    let mut buf = vec![0u8; 0xA9208];
    put_c_string(&mut buf, ARM9_ENTITY_STRINGS, ENTITY_SYMBOL);
    put_c_string(&mut buf, ARM9_LEVEL_STRINGS, LEVEL_NAME);

    for i in 0..386 {
        let at = 0xA7FF0 + i * 12;
        put(&mut buf, at, &((i % 4) as i16).to_le_bytes());
        put(&mut buf, at + 2, &(i as i16).to_le_bytes());
        put(
            &mut buf,
            at + 4,
            &pointer_for(i, ARM9_LOAD, ARM9_ENTITY_STRINGS).to_le_bytes(),
        );
        put(&mut buf, at + 8, &0x0100u16.to_le_bytes());
        put(&mut buf, at + 10, &(i as u16).to_le_bytes());
    }

    for i in 0..431 {
        let at = 0xA5490 + i * 12;
        put(
            &mut buf,
            at,
            &pointer_for(i, ARM9_LOAD, ARM9_LEVEL_STRINGS).to_le_bytes(),
        );
        put(&mut buf, at + 4, &(i as i16).to_le_bytes());
        put(&mut buf, at + 6, &(-1i16).to_le_bytes());
        put(&mut buf, at + 8, &((i / 10) as i16).to_le_bytes());
        put(&mut buf, at + 10, &258i16.to_le_bytes());
    }

    buf
}

/// A zero-filled `overlay_0011.bin` stand-in with both built-in tables populated.
pub fn synthetic_overlay_0011() -> Vec<u8> {
    let mut buf = vec![0u8; 0x44618];
    put_c_string(&mut buf, OVERLAY_SUB_FILE_STRINGS, SUB_FILE_NAME);
    put_c_string(&mut buf, OVERLAY_SPECIAL_STRINGS, SPECIAL_NAME);

    for i in 0..555 {
        let at = 0x42C14 + i * 12;
        put(&mut buf, at, &(i as i16).to_le_bytes());
        put(&mut buf, at + 2, &7i16.to_le_bytes());
        put(
            &mut buf,
            at + 4,
            &pointer_for(i, OVERLAY_0011_LOAD, OVERLAY_SUB_FILE_STRINGS).to_le_bytes(),
        );
        put(&mut buf, at + 8, &(i as u32 * 1000).to_le_bytes());
    }

    for i in 0..701 {
        let at = 0x405E8 + i * 8;
        put(&mut buf, at, &(i as i16).to_le_bytes());
        put(&mut buf, at + 2, &((i % 3) as i16).to_le_bytes());
        put(
            &mut buf,
            at + 4,
            &pointer_for(i, OVERLAY_0011_LOAD, OVERLAY_SPECIAL_STRINGS).to_le_bytes(),
        );
    }

    buf
}

/// Writes both synthetic blobs into `dir`, returning `(arm9, overlay_0011)` paths.
pub fn write_synthetic_blobs(dir: &Path) -> (PathBuf, PathBuf) {
    let arm9 = dir.join("arm9.bin");
    let overlay = dir.join("overlay_0011.bin");
    fs::write(&arm9, synthetic_arm9()).unwrap();
    fs::write(&overlay, synthetic_overlay_0011()).unwrap();
    (arm9, overlay)
}

/// Little-endian bytes of one `SpecListEntry`.
pub fn spec_list_entry(id: i16, unk2: i16, ptr: u32) -> Vec<u8> {
    let mut v = Vec::with_capacity(8);
    v.extend_from_slice(&id.to_le_bytes());
    v.extend_from_slice(&unk2.to_le_bytes());
    v.extend_from_slice(&ptr.to_le_bytes());
    v
}
