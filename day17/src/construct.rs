/*
 * Reconstructing register A so that a program prints itself.
 *
 * Every program handled here has the shape:
 *
 *    until A == 0:
 *      - output some function of the low bits of A (and of higher bits of A)
 *      - A = A >> 3
 *
 * So the last symbol printed only depends on the top 3 bits of A, the one
 * before it on the top 6 bits, and so on. Building A from the most
 * significant chunk down, one symbol per chunk, turns the search into a
 * backtracking walk over at most 8 choices per level.
 *
 * For REFERENCE_PROGRAM = [bst 4], [bxl 5], [cdv 5], [bxl 6], [bxc 3], [out 5], [adv 3], [jnz 0]:
 *    B = A & 111
 *    B = B xor 101
 *    C = A >> B
 *    B = B xor 110          => B = (A & 111) xor 011
 *    B = B xor C
 *    out B & 111            => ((A & 111) xor 011 xor (A >> ((A & 111) xor 101))) & 111
 *    A = A >> 3
 */

use std::convert::Infallible;

use crate::cpu::{Cpu, CpuError, Registers};

pub const REFERENCE_PROGRAM: [u64; 16] = [2, 4, 1, 5, 7, 5, 1, 6, 4, 3, 5, 5, 0, 3, 3, 0];

/// Symbol printed by one loop iteration of [`REFERENCE_PROGRAM`] for the current A.
pub fn reference_symbol(a: u64) -> u64 {
    let low = a & 0b111;
    ((low ^ 0b011) ^ (a >> (low ^ 0b101))) & 0b111
}

/// `remaining` symbols are still unmatched; this level targets symbol `remaining - 1`.
fn construction_helper<E>(
    a: u64,
    remaining: usize,
    accept: &mut impl FnMut(u64, usize) -> Result<bool, E>,
) -> Result<Option<u64>, E> {
    if remaining == 0 {
        return Ok(Some(a));
    }
    let Some(base) = a.checked_mul(8) else {
        return Ok(None);
    };

    let index = remaining - 1;
    for next in 0..8 {
        let test_a = base | next;
        if accept(test_a, index)? {
            if let Some(result) = construction_helper(test_a, index, accept)? {
                return Ok(Some(result));
            }
        }
    }
    Ok(None)
}

/// Depth first search for A, last symbol first.
///
/// Higher chunks are fixed before lower ones and each level tries chunks
/// 0 through 7 in ascending order, so the first complete match is also the
/// smallest A. `emit` gives the symbol printed by one loop iteration for a
/// given A.
pub fn construct_with(symbols: &[u64], emit: impl Fn(u64) -> u64) -> Option<u64> {
    construction_helper(0, symbols.len(), &mut |test_a, index| {
        Ok::<_, Infallible>(emit(test_a) == symbols[index])
    })
    .unwrap_or_else(|never| match never {})
}

pub fn construct_reference() -> Option<u64> {
    construct_with(&REFERENCE_PROGRAM, reference_symbol)
}

/// Same search as [`construct_with`], but each candidate is checked by running
/// the program and comparing the whole output against the program suffix.
pub fn construct_by_simulation(cpu: &mut Cpu) -> Result<Option<u64>, CpuError> {
    let program = cpu.program().to_vec();
    construction_helper(0, program.len(), &mut |test_a, index| -> Result<bool, CpuError> {
        let output = cpu.execute(Registers::with_a(test_a))?;
        Ok(output == &program[index..])
    })
}

/// Linear scan over `0..limit`.
pub fn find_self_referential(cpu: &mut Cpu, limit: u64) -> Result<Option<u64>, CpuError> {
    for a in 0..limit {
        if cpu.is_self_referential(Registers::with_a(a))? {
            return Ok(Some(a));
        }
    }
    Ok(None)
}
