//! REST resource implementations.

pub mod discount_code;

pub use discount_code::{
    DiscountCode, DiscountCodeBatch, DiscountCodeClient, DiscountCodeCountOptions,
    DiscountCodeEnvelope, DiscountCodeError, DiscountCodeListOptions, DiscountCodeService,
    DiscountCodesEnvelope,
};
