//! SIMD Dispatch System for SignalBench
//!
//! Runtime SIMD feature detection with cached dispatch tables.
//! Supports AVX2, SSE4.1 and NEON (ARM) on `i8` lanes.
//!
//! # Design
//! - Detection happens once per process
//! - Dispatch tables are function pointers, resolved per level
//! - A level is only ever dispatched to after the CPU reported it
//! - Every kernel handles the remainder lanes with the scalar reference code,
//!   so output is byte-identical to `crate::scalar`

use std::sync::OnceLock;

use sb_core::Sample;

use crate::scalar;

// ============ SIMD Level Detection ============

/// Detected SIMD capability level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SimdLevel {
    /// No usable SIMD
    Scalar = 0,
    /// SSE4.1 (128-bit, 16 i8 lanes)
    Sse41 = 1,
    /// AVX2 (256-bit, 32 i8 lanes)
    Avx2 = 2,
    /// ARM NEON (128-bit, 16 i8 lanes)
    Neon = 3,
}

impl SimdLevel {
    pub const ALL: [SimdLevel; 4] = [
        SimdLevel::Scalar,
        SimdLevel::Sse41,
        SimdLevel::Avx2,
        SimdLevel::Neon,
    ];

    /// Number of `i8` samples processed per vector instruction
    pub const fn lanes(self) -> usize {
        match self {
            SimdLevel::Scalar => 1,
            SimdLevel::Sse41 | SimdLevel::Neon => 16,
            SimdLevel::Avx2 => 32,
        }
    }

    /// Get human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            SimdLevel::Scalar => "Scalar",
            SimdLevel::Sse41 => "SSE4.1",
            SimdLevel::Avx2 => "AVX2",
            SimdLevel::Neon => "NEON",
        }
    }

    /// Whether the running CPU can execute this level
    pub fn is_supported(self) -> bool {
        match self {
            SimdLevel::Scalar => true,
            #[cfg(target_arch = "x86_64")]
            SimdLevel::Sse41 => is_x86_feature_detected!("sse4.1"),
            #[cfg(target_arch = "x86_64")]
            SimdLevel::Avx2 => is_x86_feature_detected!("avx2"),
            #[cfg(target_arch = "aarch64")]
            SimdLevel::Neon => std::arch::is_aarch64_feature_detected!("neon"),
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }

    /// Every vector level the running CPU supports, lowest first
    pub fn supported_vector_levels() -> Vec<SimdLevel> {
        Self::ALL
            .into_iter()
            .filter(|level| *level != SimdLevel::Scalar && level.is_supported())
            .collect()
    }
}

impl std::fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Global SIMD level detection (computed once)
static DETECTED_SIMD_LEVEL: OnceLock<SimdLevel> = OnceLock::new();

/// Detect the best available SIMD level
pub fn detect_simd_level() -> SimdLevel {
    *DETECTED_SIMD_LEVEL.get_or_init(|| {
        let level = [SimdLevel::Avx2, SimdLevel::Sse41, SimdLevel::Neon]
            .into_iter()
            .find(|level| level.is_supported())
            .unwrap_or(SimdLevel::Scalar);
        log::debug!("SIMD detection: {} ({} lanes)", level.name(), level.lanes());
        level
    })
}

/// Get the current SIMD level (cached)
#[inline]
pub fn simd_level() -> SimdLevel {
    detect_simd_level()
}

// ============ Dispatch Function Types ============

/// Function pointer type for truncation
pub type TruncateFn = fn(&[Sample], &mut [Sample]);

/// Function pointer type for convolution with the reference kernel
pub type ConvolveFn = fn(&[Sample], &mut [Sample]);

// ============ Dispatch Tables ============

/// Dispatch table for the vector transforms of one SIMD level
#[derive(Debug, Clone, Copy)]
pub struct VectorDispatch {
    /// Clamp into the truncation bounds
    pub truncate: TruncateFn,
    /// Convolve with the reference kernel
    pub convolve: ConvolveFn,
    /// SIMD level used
    pub level: SimdLevel,
}

impl VectorDispatch {
    /// Dispatch table for the detected level, `None` when the CPU has no SIMD
    pub fn get() -> Option<&'static Self> {
        static DISPATCH: OnceLock<Option<VectorDispatch>> = OnceLock::new();
        DISPATCH
            .get_or_init(|| Self::for_level(detect_simd_level()))
            .as_ref()
    }

    /// Dispatch table for a specific level, `None` if the CPU cannot run it
    pub fn for_level(level: SimdLevel) -> Option<Self> {
        if level == SimdLevel::Scalar || !level.is_supported() {
            return None;
        }

        match level {
            #[cfg(target_arch = "x86_64")]
            SimdLevel::Avx2 => Some(Self {
                truncate: truncate_avx2,
                convolve: convolve_avx2,
                level,
            }),
            #[cfg(target_arch = "x86_64")]
            SimdLevel::Sse41 => Some(Self {
                truncate: truncate_sse41,
                convolve: convolve_sse41,
                level,
            }),
            #[cfg(target_arch = "aarch64")]
            SimdLevel::Neon => Some(Self {
                truncate: truncate_neon,
                convolve: convolve_neon,
                level,
            }),
            _ => None,
        }
    }
}

// ============ Shared Helpers ============

/// Output indices whose whole kernel window lies inside a signal of `len` samples.
///
/// Outputs before `start` and from `end` on need zero padding and are
/// computed with `scalar::convolve_at`.
#[inline]
pub fn interior_range(len: usize) -> std::ops::Range<usize> {
    let start = sb_core::KERNEL_OFFSET;
    let end = (len + sb_core::KERNEL_OFFSET + 1).saturating_sub(sb_core::KERNEL_LEN);
    start..end.max(start)
}

/// Scalar edge pass shared by all vector convolution kernels
#[cfg_attr(not(any(target_arch = "x86_64", target_arch = "aarch64")), allow(dead_code))]
#[inline]
fn convolve_edges(input: &[Sample], output: &mut [Sample], head_end: usize, tail_start: usize) {
    let len = output.len();
    for (i, out) in output.iter_mut().enumerate().take(head_end.min(len)) {
        *out = scalar::convolve_at(input, i);
    }
    for i in tail_start..len {
        output[i] = scalar::convolve_at(input, i);
    }
}

// ============ x86_64 SIMD Implementations ============

#[cfg(target_arch = "x86_64")]
mod x86_impl {
    use super::*;
    use sb_core::{KERNEL, KERNEL_OFFSET, KERNEL_SHIFT, TRUNCATE_THRESHOLD};
    use std::arch::x86_64::*;

    // --- SSE4.1 (128-bit, 16 i8 lanes) ---

    #[target_feature(enable = "sse4.1")]
    pub unsafe fn truncate_sse41_impl(input: &[Sample], output: &mut [Sample]) {
        unsafe {
            let upper = _mm_set1_epi8(TRUNCATE_THRESHOLD);
            let lower = _mm_set1_epi8(-TRUNCATE_THRESHOLD);
            let len = input.len().min(output.len());
            let simd_len = len - (len % 16);
            let src = input.as_ptr();
            let dst = output.as_mut_ptr();

            for i in (0..simd_len).step_by(16) {
                let v = _mm_loadu_si128(src.add(i) as *const __m128i);
                let clamped = _mm_max_epi8(_mm_min_epi8(v, upper), lower);
                _mm_storeu_si128(dst.add(i) as *mut __m128i, clamped);
            }

            debug_assert!(simd_len <= len, "SSE4.1 truncate remainder bounds check failed");
            scalar::truncate_into(&input[simd_len..len], &mut output[simd_len..len]);
        }
    }

    /// Interior outputs in 16-lane blocks from `from`, returns the first index not written.
    ///
    /// `end` must not exceed `interior_range(input.len()).end`.
    #[target_feature(enable = "sse4.1")]
    unsafe fn convolve_interior_sse41(
        input: &[Sample],
        output: &mut [Sample],
        from: usize,
        end: usize,
    ) -> usize {
        unsafe {
            let src = input.as_ptr();
            let dst = output.as_mut_ptr();

            let mut i = from;
            while i + 16 <= end {
                let mut acc_lo = _mm_setzero_si128();
                let mut acc_hi = _mm_setzero_si128();

                for (j, &k) in KERNEL.iter().enumerate() {
                    let tap = _mm_set1_epi16(k as i16);
                    let v = _mm_loadu_si128(src.add(i - KERNEL_OFFSET + j) as *const __m128i);
                    let lo = _mm_cvtepi8_epi16(v);
                    let hi = _mm_cvtepi8_epi16(_mm_srli_si128::<8>(v));
                    acc_lo = _mm_add_epi16(acc_lo, _mm_mullo_epi16(lo, tap));
                    acc_hi = _mm_add_epi16(acc_hi, _mm_mullo_epi16(hi, tap));
                }

                let lo = _mm_srai_epi16::<{ KERNEL_SHIFT }>(acc_lo);
                let hi = _mm_srai_epi16::<{ KERNEL_SHIFT }>(acc_hi);
                // Saturating narrow back to i8
                _mm_storeu_si128(dst.add(i) as *mut __m128i, _mm_packs_epi16(lo, hi));
                i += 16;
            }
            i
        }
    }

    #[target_feature(enable = "sse4.1")]
    pub unsafe fn convolve_sse41_impl(input: &[Sample], output: &mut [Sample]) {
        unsafe {
            let len = input.len().min(output.len());
            let input = &input[..len];
            let output = &mut output[..len];
            let interior = interior_range(len);

            let done = convolve_interior_sse41(input, output, interior.start, interior.end);
            convolve_edges(input, output, interior.start, done);
        }
    }

    // --- AVX2 (256-bit, 32 i8 lanes) ---

    #[target_feature(enable = "avx2")]
    pub unsafe fn truncate_avx2_impl(input: &[Sample], output: &mut [Sample]) {
        unsafe {
            let upper = _mm256_set1_epi8(TRUNCATE_THRESHOLD);
            let lower = _mm256_set1_epi8(-TRUNCATE_THRESHOLD);
            let len = input.len().min(output.len());
            let simd_len = len - (len % 32);
            let src = input.as_ptr();
            let dst = output.as_mut_ptr();

            for i in (0..simd_len).step_by(32) {
                let v = _mm256_loadu_si256(src.add(i) as *const __m256i);
                let clamped = _mm256_max_epi8(_mm256_min_epi8(v, upper), lower);
                _mm256_storeu_si256(dst.add(i) as *mut __m256i, clamped);
            }

            // Remainder with SSE4.1 (AVX2 implies it)
            if simd_len < len {
                truncate_sse41_impl(&input[simd_len..len], &mut output[simd_len..len]);
            }
        }
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn convolve_avx2_impl(input: &[Sample], output: &mut [Sample]) {
        unsafe {
            let len = input.len().min(output.len());
            let input = &input[..len];
            let output = &mut output[..len];
            let interior = interior_range(len);
            let src = input.as_ptr();
            let dst = output.as_mut_ptr();

            let mut i = interior.start;
            while i + 32 <= interior.end {
                let mut acc_a = _mm256_setzero_si256();
                let mut acc_b = _mm256_setzero_si256();

                for (j, &k) in KERNEL.iter().enumerate() {
                    let tap = _mm256_set1_epi16(k as i16);
                    let p = src.add(i - KERNEL_OFFSET + j);
                    let a = _mm256_cvtepi8_epi16(_mm_loadu_si128(p as *const __m128i));
                    let b = _mm256_cvtepi8_epi16(_mm_loadu_si128(p.add(16) as *const __m128i));
                    acc_a = _mm256_add_epi16(acc_a, _mm256_mullo_epi16(a, tap));
                    acc_b = _mm256_add_epi16(acc_b, _mm256_mullo_epi16(b, tap));
                }

                let a = _mm256_srai_epi16::<{ KERNEL_SHIFT }>(acc_a);
                let b = _mm256_srai_epi16::<{ KERNEL_SHIFT }>(acc_b);
                // packs works per 128-bit lane: reorder quadwords back to sample order
                let packed = _mm256_packs_epi16(a, b);
                let ordered = _mm256_permute4x64_epi64::<0b11_01_10_00>(packed);
                _mm256_storeu_si256(dst.add(i) as *mut __m256i, ordered);
                i += 32;
            }

            // Remaining interior blocks with SSE4.1 (AVX2 implies it)
            let done = convolve_interior_sse41(input, output, i, interior.end);
            convolve_edges(input, output, interior.start, done);
        }
    }
}

// ============ ARM NEON Implementations ============

#[cfg(target_arch = "aarch64")]
mod arm_impl {
    use super::*;
    use sb_core::{KERNEL, KERNEL_OFFSET, KERNEL_SHIFT, TRUNCATE_THRESHOLD};
    use std::arch::aarch64::*;

    pub unsafe fn truncate_neon_impl(input: &[Sample], output: &mut [Sample]) {
        unsafe {
            let upper = vdupq_n_s8(TRUNCATE_THRESHOLD);
            let lower = vdupq_n_s8(-TRUNCATE_THRESHOLD);
            let len = input.len().min(output.len());
            let simd_len = len - (len % 16);
            let src = input.as_ptr();
            let dst = output.as_mut_ptr();

            for i in (0..simd_len).step_by(16) {
                let v = vld1q_s8(src.add(i));
                let clamped = vmaxq_s8(vminq_s8(v, upper), lower);
                vst1q_s8(dst.add(i), clamped);
            }

            debug_assert!(simd_len <= len, "NEON truncate remainder bounds check failed");
            scalar::truncate_into(&input[simd_len..len], &mut output[simd_len..len]);
        }
    }

    pub unsafe fn convolve_neon_impl(input: &[Sample], output: &mut [Sample]) {
        unsafe {
            let len = input.len().min(output.len());
            let input = &input[..len];
            let output = &mut output[..len];
            let interior = interior_range(len);
            let src = input.as_ptr();
            let dst = output.as_mut_ptr();

            let mut i = interior.start;
            while i + 16 <= interior.end {
                let mut acc_lo = vdupq_n_s16(0);
                let mut acc_hi = vdupq_n_s16(0);

                for (j, &k) in KERNEL.iter().enumerate() {
                    let v = vld1q_s8(src.add(i - KERNEL_OFFSET + j));
                    acc_lo = vmlaq_n_s16(acc_lo, vmovl_s8(vget_low_s8(v)), k as i16);
                    acc_hi = vmlaq_n_s16(acc_hi, vmovl_s8(vget_high_s8(v)), k as i16);
                }

                let lo = vqmovn_s16(vshrq_n_s16::<{ KERNEL_SHIFT }>(acc_lo));
                let hi = vqmovn_s16(vshrq_n_s16::<{ KERNEL_SHIFT }>(acc_hi));
                vst1q_s8(dst.add(i), vcombine_s8(lo, hi));
                i += 16;
            }

            convolve_edges(input, output, interior.start, i);
        }
    }
}

// ============ Safe Wrapper Functions ============
//
// Only reachable through `VectorDispatch::for_level`, which checks
// `SimdLevel::is_supported` before handing out these pointers.

#[cfg(target_arch = "x86_64")]
fn truncate_sse41(input: &[Sample], output: &mut [Sample]) {
    unsafe { x86_impl::truncate_sse41_impl(input, output) }
}

#[cfg(target_arch = "x86_64")]
fn convolve_sse41(input: &[Sample], output: &mut [Sample]) {
    unsafe { x86_impl::convolve_sse41_impl(input, output) }
}

#[cfg(target_arch = "x86_64")]
fn truncate_avx2(input: &[Sample], output: &mut [Sample]) {
    unsafe { x86_impl::truncate_avx2_impl(input, output) }
}

#[cfg(target_arch = "x86_64")]
fn convolve_avx2(input: &[Sample], output: &mut [Sample]) {
    unsafe { x86_impl::convolve_avx2_impl(input, output) }
}

#[cfg(target_arch = "aarch64")]
fn truncate_neon(input: &[Sample], output: &mut [Sample]) {
    unsafe { arm_impl::truncate_neon_impl(input, output) }
}

#[cfg(target_arch = "aarch64")]
fn convolve_neon(input: &[Sample], output: &mut [Sample]) {
    unsafe { arm_impl::convolve_neon_impl(input, output) }
}

// ============ Tests ============
