//! Sample and signal types

/// Quantized amplitude sample (signed 8-bit)
pub type Sample = i8;

/// Saturate a wide intermediate value into the sample range
#[inline]
pub fn saturate(value: i32) -> Sample {
    value.clamp(Sample::MIN as i32, Sample::MAX as i32) as Sample
}

/// Fixed-length sequence of samples
///
/// A signal is immutable once built. Transforms read a `&Signal` and return
/// a freshly allocated one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Signal {
    samples: Vec<Sample>,
}

impl Signal {
    /// All-zero signal
    pub fn zeros(len: usize) -> Self {
        Self {
            samples: vec![0; len],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Hand the buffer over to the caller
    #[inline]
    pub fn into_vec(self) -> Vec<Sample> {
        self.samples
    }

    /// Index of the first differing sample, `Some(min_len)` on length mismatch
    pub fn first_difference(&self, other: &Signal) -> Option<usize> {
        let diff = self
            .samples
            .iter()
            .zip(other.samples.iter())
            .position(|(a, b)| a != b);
        match diff {
            Some(i) => Some(i),
            None if self.len() != other.len() => Some(self.len().min(other.len())),
            None => None,
        }
    }

    /// Smallest and largest sample, `None` for an empty signal
    pub fn range(&self) -> Option<(Sample, Sample)> {
        let min = *self.samples.iter().min()?;
        let max = *self.samples.iter().max()?;
        Some((min, max))
    }
}

impl From<Vec<Sample>> for Signal {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

impl From<&[Sample]> for Signal {
    fn from(samples: &[Sample]) -> Self {
        Self {
            samples: samples.to_vec(),
        }
    }
}

impl FromIterator<Sample> for Signal {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl AsRef<[Sample]> for Signal {
    fn as_ref(&self) -> &[Sample] {
        &self.samples
    }
}

impl<'a> IntoIterator for &'a Signal {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
