//! Clients of the authorizations service (`/api/authorizations/v1`).

use ocm_authorizations::{
    AccessReviewRequest, AccessReviewResponse, SelfAccessReviewRequest, SelfAccessReviewResponse,
};

use crate::request::PostRequest;
use crate::resource::resource_client;

resource_client!(AuthorizationsClient);

impl AuthorizationsClient {
    pub fn access_review(&self) -> AccessReviewClient {
        AccessReviewClient::new(self.0.child("access_review"))
    }

    pub fn self_access_review(&self) -> SelfAccessReviewClient {
        SelfAccessReviewClient::new(self.0.child("self_access_review"))
    }
}

resource_client!(
    /// Reviews whether an account may perform an action on a resource.
    AccessReviewClient
);

impl AccessReviewClient {
    pub fn post(&self) -> PostRequest<AccessReviewRequest, AccessReviewResponse> {
        self.0.post()
    }
}

resource_client!(
    /// Same as [`AccessReviewClient`], for the account that owns the token.
    SelfAccessReviewClient
);

impl SelfAccessReviewClient {
    pub fn post(&self) -> PostRequest<SelfAccessReviewRequest, SelfAccessReviewResponse> {
        self.0.post()
    }
}
