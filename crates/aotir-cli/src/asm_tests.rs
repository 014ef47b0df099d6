use aotir_encoder::{EncodeStats, EncodedModule};
use aotir_format::WordSize;

use crate::asm::render;

fn module(bytes: Vec<u8>, globals: &[&str], word_size: WordSize) -> EncodedModule {
    EncodedModule {
        bytes,
        globals: globals.iter().map(|g| g.to_string()).collect(),
        word_size,
        stats: EncodeStats::default(),
    }
}

#[test]
fn stream_between_start_and_stop() {
    let m = module((0u8..20).collect(), &["counter", "my global"], WordSize::Eight);

    let expected = concat!(
        "\t.section\t.aot_ir,\"a\",@progbits\n",
        "\t.globl\taotir.ir.start\n",
        "aotir.ir.start:\n",
        "\t.byte\t0x00,0x01,0x02,0x03,0x04,0x05,0x06,0x07,0x08,0x09,0x0a,0x0b,0x0c,0x0d,0x0e,0x0f\n",
        "\t.byte\t0x10,0x11,0x12,0x13\n",
        "\t.globl\taotir.ir.stop\n",
        "aotir.ir.stop:\n",
        "\n",
        "\t.section\t.data.rel.ro,\"aw\",@progbits\n",
        "\t.globl\t__aotir_globalvar_ptrs\n",
        "\t.p2align\t3\n",
        "__aotir_globalvar_ptrs:\n",
        "\t.quad\tcounter\n",
        "\t.quad\t\"my global\"\n",
        "\t.globl\t__aotir_globalvar_len\n",
        "\t.p2align\t3\n",
        "__aotir_globalvar_len:\n",
        "\t.quad\t2\n",
    );
    assert_eq!(render(&m), expected);
}

#[test]
fn four_byte_words_use_long_pointers() {
    let m = module(vec![0xaa], &["g"], WordSize::Four);

    let text = render(&m);

    assert!(text.contains("\t.p2align\t2\n__aotir_globalvar_ptrs:\n\t.long\tg\n"));
    assert!(text.ends_with("__aotir_globalvar_len:\n\t.quad\t1\n"));
}

#[test]
fn no_globals_still_defines_the_table() {
    let m = module(vec![], &[], WordSize::Eight);

    let text = render(&m);

    assert!(text.contains("__aotir_globalvar_ptrs:\n\t.globl\t__aotir_globalvar_len\n"));
    assert!(text.ends_with("\t.quad\t0\n"));
}
