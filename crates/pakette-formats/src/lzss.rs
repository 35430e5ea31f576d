//! LZSS chunk decompressor
//!
//! Compressed chunk payloads use a classic flag-byte-driven sliding-window
//! scheme. A flag register announces eight tokens at a time, low bit first:
//! bit 1 is a literal byte, bit 0 is a two-byte back-reference into a
//! 512-byte ring buffer carrying a 9-bit ring position and a match length.
//! Literals and match bytes are both written back into the ring as they are
//! emitted, so a match may legally overlap bytes it is producing.
//!
//! Running out of input mid-token is the format's end-of-stream signal, not
//! an error; compressed chunks carry no terminator of their own.

/// Ring buffer size. Positions in match tokens are 9 bits.
pub const RING_SIZE: usize = 512;

/// Longest match a token can encode.
pub const MAX_MATCH: usize = 66;

const RING_BITS: usize = 9;
const THRESHOLD: usize = 2;

/// Decompress `input` into `output`, returning the number of bytes written.
///
/// `output` must be sized from the chunk's declared uncompressed size;
/// decoding stops once it is full. The compressed stream itself never
/// dictates how much is written.
pub fn decompress(input: &[u8], output: &mut [u8]) -> usize {
    let mut ring = [0u8; RING_SIZE];
    // Pre-offset so early back-references hit deterministic (zeroed) bytes.
    let mut ring_pos = RING_SIZE - MAX_MATCH;
    let mut flags: u32 = 0;
    let mut inp = 0usize;
    let mut out = 0usize;

    loop {
        flags >>= 1;
        if flags & 0x100 == 0 {
            let Some(&b) = input.get(inp) else { break };
            inp += 1;
            // Low byte holds the next 8 token kinds; 0xff00 marks refill.
            flags = u32::from(b) | 0xff00;
        }

        if flags & 1 != 0 {
            let Some(&b) = input.get(inp) else { break };
            inp += 1;
            if out == output.len() {
                break;
            }
            output[out] = b;
            out += 1;
            ring[ring_pos] = b;
            ring_pos = (ring_pos + 1) & (RING_SIZE - 1);
        } else {
            let Some(&lo) = input.get(inp) else { break };
            let Some(&hi) = input.get(inp + 1) else { break };
            inp += 2;

            // 9-bit position: low 8 bits in `lo`, bit 8 in the top of `hi`.
            let pos = usize::from(lo) | ((usize::from(hi) >> (16 - RING_BITS)) << 8);
            let len = (usize::from(hi) & (0xff >> (RING_BITS - 8))) + THRESHOLD;

            // len + 1 bytes, copied strictly one at a time: the source range
            // may run into bytes this same match has just written.
            for k in 0..=len {
                let b = ring[(pos + k) & (RING_SIZE - 1)];
                if out == output.len() {
                    return out;
                }
                output[out] = b;
                out += 1;
                ring[ring_pos] = b;
                ring_pos = (ring_pos + 1) & (RING_SIZE - 1);
            }
        }
    }

    out
}
