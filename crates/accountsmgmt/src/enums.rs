use ocm_core::ocm_enum;

ocm_enum! {
    /// Action that a permission allows on a resource.
    pub enum Action {
        Create => "create",
        Delete => "delete",
        Get => "get",
        List => "list",
        Update => "update",
    }
}
