//! Vectorized byte counting used to pre-size bulk token buffers.
//!
//! [`count_byte`] returns exactly what a naive scalar scan would return;
//! the vector paths are a throughput optimization with no observable
//! difference. The hot case is counting separators in the unread suffix of
//! a line so [`Tokens::into_vec`](crate::Tokens::into_vec) can allocate its
//! output once.

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[cfg(target_arch = "x86_64")]
const AVX2_WIDTH: usize = 32;
#[cfg(target_arch = "x86_64")]
const SSE2_WIDTH: usize = 16;
#[cfg(target_arch = "aarch64")]
const NEON_WIDTH: usize = 16;

/// Count occurrences of `needle` in `haystack`.
///
/// Dispatches to the widest vector path the host supports; inputs shorter
/// than one vector chunk take the scalar scan directly.
#[inline]
pub fn count_byte(haystack: &[u8], needle: u8) -> usize {
    #[cfg(target_arch = "x86_64")]
    {
        if haystack.len() >= AVX2_WIDTH && is_x86_feature_detected!("avx2") {
            return unsafe { count_avx2(haystack, needle) };
        }
        if haystack.len() >= SSE2_WIDTH && is_x86_feature_detected!("sse2") {
            return unsafe { count_sse2(haystack, needle) };
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        if haystack.len() >= NEON_WIDTH {
            return unsafe { count_neon(haystack, needle) };
        }
    }

    count_scalar(haystack, needle)
}

/// Reference implementation; also handles short tails.
#[inline]
fn count_scalar(haystack: &[u8], needle: u8) -> usize {
    haystack.iter().filter(|&&b| b == needle).count()
}

/// 32-byte AVX2 chunks: compare against a broadcast needle, extract the
/// match bitmask, popcount.
///
/// A tail longer than half a chunk re-scans the last full-width window
/// ending at `len` and shifts the already-counted overlap out of the mask
/// before the popcount, so nothing in the overlap region is counted twice;
/// shorter tails finish with the scalar loop.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn count_avx2(haystack: &[u8], needle: u8) -> usize {
    debug_assert!(haystack.len() >= AVX2_WIDTH);

    unsafe {
        let target = _mm256_set1_epi8(needle as i8);
        let mut count = 0usize;
        let mut i = 0usize;

        while i + AVX2_WIDTH <= haystack.len() {
            let chunk = _mm256_loadu_si256(haystack.as_ptr().add(i).cast());
            let eq = _mm256_cmpeq_epi8(chunk, target);
            count += (_mm256_movemask_epi8(eq) as u32).count_ones() as usize;
            i += AVX2_WIDTH;
        }

        let remaining = haystack.len() - i;
        if remaining > AVX2_WIDTH / 2 {
            let chunk =
                _mm256_loadu_si256(haystack.as_ptr().add(haystack.len() - AVX2_WIDTH).cast());
            let eq = _mm256_cmpeq_epi8(chunk, target);
            // Bit j of the mask is position len - WIDTH + j; the low
            // WIDTH - remaining bits were counted by the chunk loop.
            let mask = (_mm256_movemask_epi8(eq) as u32) >> (AVX2_WIDTH - remaining);
            count + mask.count_ones() as usize
        } else {
            count + count_scalar(&haystack[i..], needle)
        }
    }
}

/// 16-byte SSE2 chunks; same tail handling as the AVX2 path.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
unsafe fn count_sse2(haystack: &[u8], needle: u8) -> usize {
    debug_assert!(haystack.len() >= SSE2_WIDTH);

    unsafe {
        let target = _mm_set1_epi8(needle as i8);
        let mut count = 0usize;
        let mut i = 0usize;

        while i + SSE2_WIDTH <= haystack.len() {
            let chunk = _mm_loadu_si128(haystack.as_ptr().add(i).cast());
            let eq = _mm_cmpeq_epi8(chunk, target);
            count += (_mm_movemask_epi8(eq) as u32).count_ones() as usize;
            i += SSE2_WIDTH;
        }

        let remaining = haystack.len() - i;
        if remaining > SSE2_WIDTH / 2 {
            let chunk = _mm_loadu_si128(haystack.as_ptr().add(haystack.len() - SSE2_WIDTH).cast());
            let eq = _mm_cmpeq_epi8(chunk, target);
            let mask = (_mm_movemask_epi8(eq) as u32) >> (SSE2_WIDTH - remaining);
            count + mask.count_ones() as usize
        } else {
            count + count_scalar(&haystack[i..], needle)
        }
    }
}

/// 16-byte NEON chunks: compare, mask matches to 1, horizontal add.
///
/// NEON has no movemask equivalent, so each chunk contributes its lane sum
/// directly; the tail falls back to the scalar loop.
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
unsafe fn count_neon(haystack: &[u8], needle: u8) -> usize {
    debug_assert!(haystack.len() >= NEON_WIDTH);

    unsafe {
        let target = vdupq_n_u8(needle);
        let one = vdupq_n_u8(1);
        let mut count = 0usize;
        let mut i = 0usize;

        while i + NEON_WIDTH <= haystack.len() {
            let chunk = vld1q_u8(haystack.as_ptr().add(i));
            let eq = vceqq_u8(chunk, target);
            count += vaddlvq_u8(vandq_u8(eq, one)) as usize;
            i += NEON_WIDTH;
        }

        count + count_scalar(&haystack[i..], needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    /// Deterministic mix of separators and payload bytes.
    fn pattern(len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| if i % 3 == 0 { b' ' } else { b'a' + (i % 7) as u8 })
            .collect()
    }

    #[test_case(0)]
    #[test_case(1)]
    #[test_case(15)]
    #[test_case(16)]
    #[test_case(17)]
    #[test_case(24)]
    #[test_case(31)]
    #[test_case(32)]
    #[test_case(33)]
    #[test_case(48)]
    #[test_case(63)]
    #[test_case(64)]
    #[test_case(65)]
    #[test_case(100)]
    #[test_case(1000)]
    fn test_count_matches_scalar_across_chunk_boundaries(len: usize) {
        let haystack = pattern(len);
        assert_eq!(
            count_byte(&haystack, b' '),
            count_scalar(&haystack, b' '),
            "length {len}"
        );
    }

    #[test]
    fn test_count_empty() {
        assert_eq!(count_byte(b"", b' '), 0);
    }

    #[test]
    fn test_count_no_matches() {
        let haystack = vec![b'x'; 100];
        assert_eq!(count_byte(&haystack, b' '), 0);
    }

    #[test]
    fn test_count_all_matches() {
        let haystack = vec![b','; 100];
        assert_eq!(count_byte(&haystack, b','), 100);
    }

    #[test_case(33)]
    #[test_case(47)]
    #[test_case(49)]
    fn test_count_needle_at_edges(len: usize) {
        // A match in the final position exercises the overlap masking.
        let mut haystack = vec![b'x'; len];
        haystack[0] = b' ';
        haystack[len - 1] = b' ';
        assert_eq!(count_byte(&haystack, b' '), 2);
    }

    #[test]
    fn test_count_single_byte_haystacks() {
        assert_eq!(count_byte(b" ", b' '), 1);
        assert_eq!(count_byte(b"x", b' '), 0);
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_vector_paths_match_scalar_directly() {
        for len in [16, 17, 25, 32, 40, 50, 64, 95, 128] {
            let haystack = pattern(len);
            let expected = count_scalar(&haystack, b' ');
            if len >= SSE2_WIDTH && is_x86_feature_detected!("sse2") {
                assert_eq!(unsafe { count_sse2(&haystack, b' ') }, expected);
            }
            if len >= AVX2_WIDTH && is_x86_feature_detected!("avx2") {
                assert_eq!(unsafe { count_avx2(&haystack, b' ') }, expected);
            }
        }
    }
}
