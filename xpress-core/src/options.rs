//! Decoder configuration.

/// What a decoder does with a back-reference that reaches before the start
/// of the output.
///
/// Only the plain XPRESS decoder consults this; the Huffman decoder always
/// rejects such matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetPolicy {
    /// Fail with [`crate::XpressError::InvalidDistance`].
    #[default]
    Reject,
    /// Drop the match and keep decoding.
    Skip,
}

/// Options shared by all decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of output bytes, or `None` for no ceiling.
    ///
    /// A short input can legally request a very large output, so callers
    /// decoding untrusted data should set this.
    pub max_output: Option<usize>,
    /// Handling of out-of-range back-references.
    pub offset_policy: OffsetPolicy,
}

impl DecodeOptions {
    /// Reject every malformed construct. This is the default.
    pub const STRICT: Self = Self {
        max_output: None,
        offset_policy: OffsetPolicy::Reject,
    };

    /// Skip out-of-range matches instead of failing.
    pub const LENIENT: Self = Self {
        max_output: None,
        offset_policy: OffsetPolicy::Skip,
    };

    /// Create options with the default settings.
    pub fn new() -> Self {
        Self::STRICT
    }

    /// Set the output ceiling.
    pub fn with_max_output(mut self, limit: usize) -> Self {
        self.max_output = Some(limit);
        self
    }

    /// Set the out-of-range back-reference policy.
    pub fn with_offset_policy(mut self, policy: OffsetPolicy) -> Self {
        self.offset_policy = policy;
        self
    }

    /// Initial output capacity for an input of `input_len` bytes.
    pub fn capacity_hint(&self, input_len: usize, ratio: usize) -> usize {
        let hint = input_len.saturating_mul(ratio);
        match self.max_output {
            Some(limit) => hint.min(limit),
            None => hint,
        }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::STRICT
    }
}
