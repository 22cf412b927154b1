pub mod common;

use common::{b, brk, cb, d, i, im, nop, r};
use legv8_sim::{decode, disasm::listing, parse_word, Opcode, Program};

#[test]
fn test_operand_count_matches_format() {
    let lines = [
        r(Opcode::Add, 1, 2, 3, 0),
        r(Opcode::Lsr, 1, 2, 0, 7),
        i(Opcode::Subi, 1, 2, -3),
        d(Opcode::Ldur, 1, 2, 511),
        b(-4),
        cb(Opcode::Cbz, 1, 10),
        im(Opcode::Movk, 1, 65535, 2),
        nop(),
        brk(),
    ];
    let program = Program::from_lines(&lines, 96);
    let rendered = listing(&program);

    for (line, text) in lines.iter().zip(&rendered) {
        let decoded = decode(parse_word(line).unwrap()).unwrap();
        let columns = text.split('\t').collect::<Vec<_>>();
        assert_eq!(columns[2], decoded.opcode().mnemonic(), "{text}");

        let operands = columns.get(3).map_or(0, |ops| ops.split(", ").count());
        assert_eq!(operands, decoded.instruction.num_operands(), "{text}");
    }
}

#[test]
fn test_negative_and_extreme_immediates() {
    let lines = [
        i(Opcode::Subi, 1, 2, -3),
        d(Opcode::Ldur, 1, 2, 511),
        b(-4),
        cb(Opcode::Cbz, 1, -1),
        im(Opcode::Movk, 1, 65535, 2),
    ];
    let rendered = listing(&Program::from_lines(&lines, 96));

    let assembly = rendered
        .iter()
        .map(|line| line.splitn(3, '\t').nth(2).unwrap())
        .collect::<Vec<_>>();
    assert_eq!(
        assembly,
        vec![
            "SUBI\tR1, R2, #-3",
            "LDUR\tR1, [R2, #511]",
            "B\t#-4",
            "CBZ\tR1, #-1",
            "MOVK\tR1, 65535, LSL 32",
        ]
    );
}

#[test]
fn test_listing_addresses_skip_malformed_lines() {
    let lines = [
        nop(),
        "1".repeat(31),
        "1".repeat(33),
        "0000000000000000000000000000000x".to_string(),
        nop(),
    ];
    let rendered = listing(&Program::from_lines(&lines, 96));

    assert_eq!(rendered.len(), 5);
    assert!(rendered[0].ends_with("\t96\tNOP"));
    assert_eq!(rendered[1], format!("{} Invalid binary string!", "1".repeat(31)));
    assert_eq!(rendered[2], format!("{} Invalid binary string!", "1".repeat(32)));
    assert_eq!(
        rendered[3],
        "0000000000000000000000000000000x Invalid binary string!"
    );
    assert!(rendered[4].ends_with("\t100\tNOP"));
}
