//! Types of the authorizations service (`/api/authorizations/v1`).

pub mod access_review;

pub use access_review::{
    AccessReviewRequest, AccessReviewRequestBuilder, AccessReviewResponse,
    AccessReviewResponseBuilder, SelfAccessReviewRequest, SelfAccessReviewRequestBuilder,
    SelfAccessReviewResponse, SelfAccessReviewResponseBuilder,
};
