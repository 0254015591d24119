#![no_main]

use libfuzzer_sys::fuzz_target;
use m4atag::{ReadConfig, UnknownAtoms};

fuzz_target!(|data: &[u8]| {
    let cfg = ReadConfig { unknown_atoms: UnknownAtoms::PassThrough };
    let mut reader = std::io::Cursor::new(data);
    let _ = m4atag::atom::read_tree(&mut reader, &cfg);
});
