//! Error types for form sharing.
//!
//! Only markup preprocessing can fail an extraction pass. Lookups that find
//! nothing are normal and never surface as errors.

use thiserror::Error;

/// Failure while expanding macros or templates in form markup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PreprocessError {
    /// More than one `<macros>` block.
    #[error("form contains {count} <macros> blocks; at most one is allowed")]
    DuplicateMacros {
        /// Number of blocks found.
        count: usize,
    },

    /// A `<macros>` block without a closing tag.
    #[error("<macros> block is not terminated")]
    UnterminatedMacros,

    /// A macro definition line without `=`.
    #[error("malformed macro definition: '{line}'")]
    MalformedMacro {
        /// The offending line, trimmed.
        line: String,
    },

    /// A `<repeat>` block without a closing tag.
    #[error("<repeat> block is not terminated")]
    UnterminatedRepeat,

    /// A `<repeat>` block without a `<template>`.
    #[error("<repeat> block has no <template>")]
    MissingTemplate,

    /// A `<repeat>` block with more than one `<template>`.
    #[error("<repeat> block has {count} <template> elements; exactly one is allowed")]
    MultipleTemplates {
        /// Number of templates found.
        count: usize,
    },
}

/// Error type for building a shareable form.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ShareError {
    /// Macro or template expansion failed, so no dependencies could be computed.
    #[error("unable to process macros and templates when making form shareable: {0}")]
    Preprocess(#[from] PreprocessError),
}

/// Result type alias for sharing operations.
pub type Result<T> = std::result::Result<T, ShareError>;
