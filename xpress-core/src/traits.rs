//! Core decoder trait and the state every decoder reports.

use crate::error::{Result, XpressError};

/// Observable state of a decoder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DecodeState {
    /// No decode has run since construction or the last reset.
    #[default]
    Ready,
    /// A decode is in progress.
    Decoding,
    /// The last decode reached the end of its stream.
    Done,
    /// The last decode failed with the given error.
    Failed(XpressError),
}

/// A whole-buffer decompressor.
///
/// The full compressed input must be resident; each call to
/// [`Decompressor::decompress`] decodes one complete stream and builds all of
/// its working state from scratch.
pub trait Decompressor {
    /// Decode a complete stream.
    ///
    /// On failure the partial output is discarded.
    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>>;

    /// State left behind by the last call.
    fn state(&self) -> &DecodeState;

    /// Reset the decoder to [`DecodeState::Ready`].
    fn reset(&mut self);

    /// Check if the last decode completed successfully.
    fn is_finished(&self) -> bool {
        matches!(self.state(), DecodeState::Done)
    }
}

/// Run `decode` while tracking the outcome in `state`.
///
/// Shared by the decoder implementations so they agree on state transitions.
pub fn run_tracked<F>(state: &mut DecodeState, decode: F) -> Result<Vec<u8>>
where
    F: FnOnce() -> Result<Vec<u8>>,
{
    *state = DecodeState::Decoding;
    match decode() {
        Ok(output) => {
            *state = DecodeState::Done;
            Ok(output)
        }
        Err(err) => {
            *state = DecodeState::Failed(err.clone());
            Err(err)
        }
    }
}
